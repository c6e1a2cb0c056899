use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: i64,
    pub message: String,
    pub post_id: i64,
    pub user_id: i64,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub message: String,
    pub post_id: i64,
    pub user_id: i64,
}

/// Only the message is editable; a comment never moves between posts.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CommentChanges {
    #[validate(length(min = 1, max = 10000, message = "Message must be 1-10000 characters"))]
    pub message: Option<String>,
}

impl CommentChanges {
    pub fn apply(self, comment: &mut Comment) {
        if let Some(message) = self.message {
            comment.message = message;
        }
    }
}

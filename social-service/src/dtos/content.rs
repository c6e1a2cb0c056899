//! Create payloads and like bodies. Partial updates deserialize straight
//! into the `*Changes` model types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{NewComment, NewCompany, NewPost};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub parent_company_id: Option<i64>,
    #[validate(length(max = 255))]
    pub industry: Option<String>,
    #[validate(length(max = 255))]
    pub sub_industry: Option<String>,
    #[validate(length(max = 255))]
    pub headquarters: Option<String>,
    pub date_incorporated: Option<NaiveDate>,
}

impl CreateCompanyRequest {
    /// The owner is always the caller, whatever the payload says.
    pub fn into_new(self, owner: i64) -> NewCompany {
        NewCompany {
            name: self.name,
            description: self.description,
            parent_company_id: self.parent_company_id,
            industry: self.industry,
            sub_industry: self.sub_industry,
            headquarters: self.headquarters,
            date_incorporated: self.date_incorporated,
            user_id: owner,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
    pub description: Option<String>,
    pub company_id: Option<i64>,
}

impl CreatePostRequest {
    pub fn into_new(self, owner: i64) -> NewPost {
        NewPost {
            title: self.title,
            description: self.description,
            company_id: self.company_id,
            user_id: owner,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 10000, message = "Message must be 1-10000 characters"))]
    pub message: String,
    pub post_id: i64,
}

impl CreateCommentRequest {
    pub fn into_new(self, owner: i64) -> NewComment {
        NewComment {
            message: self.message,
            post_id: self.post_id,
            user_id: owner,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CommentFilter {
    pub post_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LikeRequest {
    #[serde(alias = "post_id", alias = "comment_id")]
    #[validate(range(min = 1, message = "target_id must be positive"))]
    pub target_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LikeResponse {
    pub liked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_supplied_owner_is_ignored() {
        let req: CreatePostRequest =
            serde_json::from_str(r#"{"title":"Hello","user_id":999}"#).unwrap();
        let new = req.into_new(4);
        assert_eq!(new.user_id, 4);
    }

    #[test]
    fn like_request_accepts_entity_alias() {
        let req: LikeRequest = serde_json::from_str(r#"{"post_id":7}"#).unwrap();
        assert_eq!(req.target_id, 7);
        assert!(req.validate().is_ok());

        let req: LikeRequest = serde_json::from_str(r#"{"target_id":0}"#).unwrap();
        assert!(req.validate().is_err());
    }
}

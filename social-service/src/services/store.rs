//! Storage seams. Handlers hold an `Arc<dyn Store>`; the toggle engine holds
//! an `Arc<dyn RelationStore>`. Both are implemented by `Database` and
//! `MemoryStore`.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    Comment, CommentChanges, Company, CompanyChanges, LikeKey, NewComment, NewCompany, NewPost,
    NewUser, Post, PostChanges, TargetType, ToggleOutcome, User,
};

#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("duplicate {0}")]
    Duplicate(String),

    /// A foreign key pointed at a row that does not exist.
    #[error("missing reference: {0}")]
    MissingReference(String),

    /// A row seen earlier in the transaction was deleted by someone else.
    #[error("row vanished before it could be deleted")]
    Vanished,

    #[error("storage failure: {0}")]
    Transient(#[from] anyhow::Error),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;
    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn create_company(&self, company: NewCompany) -> Result<Company, StoreError>;
    async fn find_company(&self, id: i64) -> Result<Option<Company>, StoreError>;
    async fn list_companies(&self) -> Result<Vec<Company>, StoreError>;
    /// Returns `None` when the row no longer exists.
    async fn update_company(
        &self,
        id: i64,
        changes: CompanyChanges,
    ) -> Result<Option<Company>, StoreError>;
    async fn delete_company(&self, id: i64) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create_post(&self, post: NewPost) -> Result<Post, StoreError>;
    async fn find_post(&self, id: i64) -> Result<Option<Post>, StoreError>;
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError>;
    async fn update_post(&self, id: i64, changes: PostChanges)
        -> Result<Option<Post>, StoreError>;
    /// Also removes the post's comments and every like on the post or on
    /// those comments.
    async fn delete_post(&self, id: i64) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create_comment(&self, comment: NewComment) -> Result<Comment, StoreError>;
    async fn find_comment(&self, id: i64) -> Result<Option<Comment>, StoreError>;
    async fn list_comments(&self, post_id: Option<i64>) -> Result<Vec<Comment>, StoreError>;
    async fn update_comment(
        &self,
        id: i64,
        changes: CommentChanges,
    ) -> Result<Option<Comment>, StoreError>;
    /// Also removes likes on the comment.
    async fn delete_comment(&self, id: i64) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait Store:
    UserRepository + CompanyRepository + PostRepository + CommentRepository + Send + Sync
{
    async fn health_check(&self) -> Result<(), StoreError>;
}

/// Like relation, keyed uniquely by `(actor_id, target_id, target_type)`.
#[async_trait]
pub trait RelationStore: Send + Sync {
    /// One transactional check-then-act attempt. Reports
    /// `StoreError::Duplicate` when the insert loses a race to a concurrent
    /// insert and `StoreError::Vanished` when the delete finds nothing left.
    async fn toggle_once(&self, key: LikeKey) -> Result<ToggleOutcome, StoreError>;

    /// Deletes the relation if present.
    async fn remove(&self, key: LikeKey) -> Result<bool, StoreError>;

    async fn count(&self, target_id: i64, target_type: TargetType) -> Result<i64, StoreError>;
}

//! In-process store for tests and local development.
//!
//! Mirrors the Postgres constraints: unique usernames and emails, foreign
//! keys on company and post references, one like per key, and the same
//! cascade on delete.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use super::store::{
    CommentRepository, CompanyRepository, PostRepository, RelationStore, Store, StoreError,
    UserRepository,
};
use crate::models::{
    Comment, CommentChanges, Company, CompanyChanges, LikeKey, NewComment, NewCompany, NewPost,
    NewUser, Post, PostChanges, TargetType, ToggleOutcome, User,
};

#[derive(Default)]
struct Inner {
    next_id: i64,
    users: BTreeMap<i64, User>,
    companies: BTreeMap<i64, Company>,
    posts: BTreeMap<i64, Post>,
    comments: BTreeMap<i64, Comment>,
    likes: HashSet<LikeKey>,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn like_count(&self, target_id: i64, target_type: TargetType) -> i64 {
        self.likes
            .iter()
            .filter(|k| k.target_id == target_id && k.target_type == target_type)
            .count() as i64
    }

    fn with_post_likes(&self, post: &Post) -> Post {
        Post {
            likes: self.like_count(post.id, TargetType::Post),
            ..post.clone()
        }
    }

    fn with_comment_likes(&self, comment: &Comment) -> Comment {
        Comment {
            likes: self.like_count(comment.id, TargetType::Comment),
            ..comment.clone()
        }
    }

    fn target_exists(&self, key: &LikeKey) -> bool {
        match key.target_type {
            TargetType::Post => self.posts.contains_key(&key.target_id),
            TargetType::Comment => self.comments.contains_key(&key.target_id),
        }
    }

    fn check_company_ref(&self, company_id: Option<i64>, what: &str) -> Result<(), StoreError> {
        match company_id {
            Some(id) if !self.companies.contains_key(&id) => {
                Err(StoreError::MissingReference(what.to_string()))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn inner(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|e| StoreError::Transient(anyhow::anyhow!("Memory store mutex poisoned: {}", e)))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner()?;

        if inner.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate("email".to_string()));
        }
        if inner.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::Duplicate("username".to_string()));
        }

        let id = inner.next_id();
        let stored = User {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash.into_string(),
            created_at: Utc::now(),
        };
        inner.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.inner()?.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .inner()?
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .inner()?
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[async_trait]
impl CompanyRepository for MemoryStore {
    async fn create_company(&self, company: NewCompany) -> Result<Company, StoreError> {
        let mut inner = self.inner()?;
        inner.check_company_ref(company.parent_company_id, "parent company")?;

        let id = inner.next_id();
        let stored = Company {
            id,
            name: company.name,
            description: company.description,
            parent_company_id: company.parent_company_id,
            industry: company.industry,
            sub_industry: company.sub_industry,
            headquarters: company.headquarters,
            date_incorporated: company.date_incorporated,
            user_id: Some(company.user_id),
        };
        inner.companies.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_company(&self, id: i64) -> Result<Option<Company>, StoreError> {
        Ok(self.inner()?.companies.get(&id).cloned())
    }

    async fn list_companies(&self) -> Result<Vec<Company>, StoreError> {
        Ok(self.inner()?.companies.values().cloned().collect())
    }

    async fn update_company(
        &self,
        id: i64,
        changes: CompanyChanges,
    ) -> Result<Option<Company>, StoreError> {
        let mut inner = self.inner()?;
        if let Some(parent) = changes.parent_company_id {
            inner.check_company_ref(parent, "parent company")?;
        }

        let Some(company) = inner.companies.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply(company);
        Ok(Some(company.clone()))
    }

    async fn delete_company(&self, id: i64) -> Result<bool, StoreError> {
        let mut inner = self.inner()?;
        if inner.companies.remove(&id).is_none() {
            return Ok(false);
        }

        // ON DELETE SET NULL
        for company in inner.companies.values_mut() {
            if company.parent_company_id == Some(id) {
                company.parent_company_id = None;
            }
        }
        for post in inner.posts.values_mut() {
            if post.company_id == Some(id) {
                post.company_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn create_post(&self, post: NewPost) -> Result<Post, StoreError> {
        let mut inner = self.inner()?;
        inner.check_company_ref(post.company_id, "company")?;

        let id = inner.next_id();
        let now = Utc::now();
        let stored = Post {
            id,
            title: post.title,
            description: post.description,
            company_id: post.company_id,
            user_id: post.user_id,
            likes: 0,
            created_at: now,
            updated_at: now,
        };
        inner.posts.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_post(&self, id: i64) -> Result<Option<Post>, StoreError> {
        let inner = self.inner()?;
        Ok(inner.posts.get(&id).map(|p| inner.with_post_likes(p)))
    }

    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let inner = self.inner()?;
        Ok(inner
            .posts
            .values()
            .map(|p| inner.with_post_likes(p))
            .collect())
    }

    async fn update_post(
        &self,
        id: i64,
        changes: PostChanges,
    ) -> Result<Option<Post>, StoreError> {
        let mut inner = self.inner()?;
        if let Some(company_id) = changes.company_id {
            inner.check_company_ref(company_id, "company")?;
        }

        let Some(post) = inner.posts.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply(post);
        post.updated_at = Utc::now();
        let updated = post.clone();
        Ok(Some(inner.with_post_likes(&updated)))
    }

    async fn delete_post(&self, id: i64) -> Result<bool, StoreError> {
        let mut inner = self.inner()?;
        if inner.posts.remove(&id).is_none() {
            return Ok(false);
        }

        let comment_ids: HashSet<i64> = inner
            .comments
            .values()
            .filter(|c| c.post_id == id)
            .map(|c| c.id)
            .collect();
        inner.comments.retain(|cid, _| !comment_ids.contains(cid));
        inner.likes.retain(|k| match k.target_type {
            TargetType::Post => k.target_id != id,
            TargetType::Comment => !comment_ids.contains(&k.target_id),
        });
        Ok(true)
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn create_comment(&self, comment: NewComment) -> Result<Comment, StoreError> {
        let mut inner = self.inner()?;
        if !inner.posts.contains_key(&comment.post_id) {
            return Err(StoreError::MissingReference("post".to_string()));
        }

        let id = inner.next_id();
        let now = Utc::now();
        let stored = Comment {
            id,
            message: comment.message,
            post_id: comment.post_id,
            user_id: comment.user_id,
            likes: 0,
            created_at: now,
            updated_at: now,
        };
        inner.comments.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_comment(&self, id: i64) -> Result<Option<Comment>, StoreError> {
        let inner = self.inner()?;
        Ok(inner.comments.get(&id).map(|c| inner.with_comment_likes(c)))
    }

    async fn list_comments(&self, post_id: Option<i64>) -> Result<Vec<Comment>, StoreError> {
        let inner = self.inner()?;
        Ok(inner
            .comments
            .values()
            .filter(|c| post_id.map_or(true, |pid| c.post_id == pid))
            .map(|c| inner.with_comment_likes(c))
            .collect())
    }

    async fn update_comment(
        &self,
        id: i64,
        changes: CommentChanges,
    ) -> Result<Option<Comment>, StoreError> {
        let mut inner = self.inner()?;
        let Some(comment) = inner.comments.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply(comment);
        comment.updated_at = Utc::now();
        let updated = comment.clone();
        Ok(Some(inner.with_comment_likes(&updated)))
    }

    async fn delete_comment(&self, id: i64) -> Result<bool, StoreError> {
        let mut inner = self.inner()?;
        if inner.comments.remove(&id).is_none() {
            return Ok(false);
        }
        inner
            .likes
            .retain(|k| !(k.target_type == TargetType::Comment && k.target_id == id));
        Ok(true)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        self.inner().map(|_| ())
    }
}

#[async_trait]
impl RelationStore for MemoryStore {
    async fn toggle_once(&self, key: LikeKey) -> Result<ToggleOutcome, StoreError> {
        let existed = self.inner()?.likes.contains(&key);

        // Gap between read and write, as in a READ COMMITTED transaction.
        tokio::task::yield_now().await;

        let mut inner = self.inner()?;
        if !inner.target_exists(&key) {
            return Err(StoreError::MissingReference(key.target_type.to_string()));
        }
        if existed {
            if inner.likes.remove(&key) {
                Ok(ToggleOutcome::Removed)
            } else {
                Err(StoreError::Vanished)
            }
        } else if inner.likes.insert(key) {
            Ok(ToggleOutcome::Added)
        } else {
            Err(StoreError::Duplicate("like".to_string()))
        }
    }

    async fn remove(&self, key: LikeKey) -> Result<bool, StoreError> {
        Ok(self.inner()?.likes.remove(&key))
    }

    async fn count(&self, target_id: i64, target_type: TargetType) -> Result<i64, StoreError> {
        Ok(self.inner()?.like_count(target_id, target_type))
    }
}

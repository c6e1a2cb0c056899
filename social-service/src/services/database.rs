//! PostgreSQL storage.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};

use super::store::{
    CommentRepository, CompanyRepository, PostRepository, RelationStore, Store, StoreError,
    UserRepository,
};
use crate::config::DatabaseConfig;
use crate::models::{
    Comment, CommentChanges, Company, CompanyChanges, LikeKey, NewComment, NewCompany, NewPost,
    NewUser, Post, PostChanges, TargetType, ToggleOutcome, User,
};

const POST_COLUMNS: &str = r#"
    p.id, p.title, p.description, p.company_id, p.user_id,
    (SELECT COUNT(*) FROM likes l WHERE l.target_type = 'post' AND l.target_id = p.id) AS likes,
    p.created_at, p.updated_at
"#;

const COMMENT_COLUMNS: &str = r#"
    c.id, c.message, c.post_id, c.user_id,
    (SELECT COUNT(*) FROM likes l WHERE l.target_type = 'comment' AND l.target_id = c.id) AS likes,
    c.created_at, c.updated_at
"#;

const COMPANY_COLUMNS: &str = "id, name, description, parent_company_id, industry, sub_industry, \
     headquarters, date_incorporated, user_id";

fn transient(context: &str, e: sqlx::Error) -> StoreError {
    StoreError::Transient(anyhow::anyhow!("{}: {}", context, e))
}

/// Maps foreign key violations to `MissingReference(what)`.
fn write_error(context: &str, what: &str, e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
            StoreError::MissingReference(what.to_string())
        }
        _ => transient(context, e),
    }
}

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(config), fields(service = "social-service"))]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .connect(&config.url)
            .await
            .map_err(|e| transient("Failed to connect", e))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Run embedded migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Transient(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    async fn fetch_post<'e, E>(executor: E, id: i64) -> Result<Option<Post>, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        sqlx::query_as::<_, Post>(&format!("SELECT {} FROM posts p WHERE p.id = $1", POST_COLUMNS))
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    async fn fetch_comment<'e, E>(executor: E, id: i64) -> Result<Option<Comment>, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        sqlx::query_as::<_, Comment>(&format!(
            "SELECT {} FROM comments c WHERE c.id = $1",
            COMMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(executor)
        .await
    }
}

#[async_trait]
impl UserRepository for Database {
    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, created_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.password_hash.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                let field = match db_err.constraint() {
                    Some(c) if c.contains("username") => "username",
                    _ => "email",
                };
                StoreError::Duplicate(field.to_string())
            }
            _ => transient("Failed to create user", e),
        })
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| transient("Failed to fetch user", e))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| transient("Failed to fetch user by email", e))
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| transient("Failed to fetch user by username", e))
    }
}

#[async_trait]
impl CompanyRepository for Database {
    async fn create_company(&self, company: NewCompany) -> Result<Company, StoreError> {
        sqlx::query_as::<_, Company>(&format!(
            r#"
            INSERT INTO companies (name, description, parent_company_id, industry, sub_industry,
                                   headquarters, date_incorporated, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            COMPANY_COLUMNS
        ))
        .bind(&company.name)
        .bind(&company.description)
        .bind(company.parent_company_id)
        .bind(&company.industry)
        .bind(&company.sub_industry)
        .bind(&company.headquarters)
        .bind(company.date_incorporated)
        .bind(company.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error("Failed to create company", "parent company", e))
    }

    async fn find_company(&self, id: i64) -> Result<Option<Company>, StoreError> {
        sqlx::query_as::<_, Company>(&format!(
            "SELECT {} FROM companies WHERE id = $1",
            COMPANY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| transient("Failed to fetch company", e))
    }

    async fn list_companies(&self) -> Result<Vec<Company>, StoreError> {
        sqlx::query_as::<_, Company>(&format!(
            "SELECT {} FROM companies ORDER BY id",
            COMPANY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| transient("Failed to list companies", e))
    }

    async fn update_company(
        &self,
        id: i64,
        changes: CompanyChanges,
    ) -> Result<Option<Company>, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| transient("Failed to begin transaction", e))?;

        let current = sqlx::query_as::<_, Company>(&format!(
            "SELECT {} FROM companies WHERE id = $1 FOR UPDATE",
            COMPANY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| transient("Failed to lock company", e))?;

        let Some(mut company) = current else {
            tx.rollback().await.ok();
            return Ok(None);
        };
        changes.apply(&mut company);

        let updated = sqlx::query_as::<_, Company>(&format!(
            r#"
            UPDATE companies
            SET name = $2, description = $3, parent_company_id = $4, industry = $5,
                sub_industry = $6, headquarters = $7, date_incorporated = $8
            WHERE id = $1
            RETURNING {}
            "#,
            COMPANY_COLUMNS
        ))
        .bind(id)
        .bind(&company.name)
        .bind(&company.description)
        .bind(company.parent_company_id)
        .bind(&company.industry)
        .bind(&company.sub_industry)
        .bind(&company.headquarters)
        .bind(company.date_incorporated)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| write_error("Failed to update company", "parent company", e))?;

        tx.commit()
            .await
            .map_err(|e| transient("Failed to commit transaction", e))?;

        Ok(Some(updated))
    }

    async fn delete_company(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| transient("Failed to delete company", e))?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl PostRepository for Database {
    async fn create_post(&self, post: NewPost) -> Result<Post, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| transient("Failed to begin transaction", e))?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO posts (title, description, company_id, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&post.title)
        .bind(&post.description)
        .bind(post.company_id)
        .bind(post.user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| write_error("Failed to create post", "company", e))?;

        let created = Self::fetch_post(&mut *tx, id)
            .await
            .map_err(|e| transient("Failed to read back post", e))?
            .ok_or_else(|| StoreError::Transient(anyhow::anyhow!("Inserted post {} missing", id)))?;

        tx.commit()
            .await
            .map_err(|e| transient("Failed to commit transaction", e))?;

        Ok(created)
    }

    async fn find_post(&self, id: i64) -> Result<Option<Post>, StoreError> {
        Self::fetch_post(&self.pool, id)
            .await
            .map_err(|e| transient("Failed to fetch post", e))
    }

    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        sqlx::query_as::<_, Post>(&format!(
            "SELECT {} FROM posts p ORDER BY p.id",
            POST_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| transient("Failed to list posts", e))
    }

    async fn update_post(
        &self,
        id: i64,
        changes: PostChanges,
    ) -> Result<Option<Post>, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| transient("Failed to begin transaction", e))?;

        let current = sqlx::query_as::<_, Post>(&format!(
            "SELECT {} FROM posts p WHERE p.id = $1 FOR UPDATE",
            POST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| transient("Failed to lock post", e))?;

        let Some(mut post) = current else {
            tx.rollback().await.ok();
            return Ok(None);
        };
        changes.apply(&mut post);

        sqlx::query(
            r#"
            UPDATE posts
            SET title = $2, description = $3, company_id = $4, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&post.title)
        .bind(&post.description)
        .bind(post.company_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| write_error("Failed to update post", "company", e))?;

        let updated = Self::fetch_post(&mut *tx, id)
            .await
            .map_err(|e| transient("Failed to read back post", e))?;

        tx.commit()
            .await
            .map_err(|e| transient("Failed to commit transaction", e))?;

        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete_post(&self, id: i64) -> Result<bool, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| transient("Failed to begin transaction", e))?;

        // Row locks wait out in-flight toggles holding FOR SHARE on these
        // targets, so the like delete below sees their rows.
        let locked = sqlx::query_scalar::<_, i64>("SELECT id FROM posts WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| transient("Failed to lock post", e))?;
        if locked.is_none() {
            tx.rollback().await.ok();
            return Ok(false);
        }

        sqlx::query("SELECT id FROM comments WHERE post_id = $1 FOR UPDATE")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| transient("Failed to lock comments", e))?;

        sqlx::query(
            r#"
            DELETE FROM likes
            WHERE (target_type = 'post' AND target_id = $1)
               OR (target_type = 'comment'
                   AND target_id IN (SELECT id FROM comments WHERE post_id = $1))
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| transient("Failed to delete post likes", e))?;

        // Comments go with the post through ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| transient("Failed to delete post", e))?;

        tx.commit()
            .await
            .map_err(|e| transient("Failed to commit transaction", e))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CommentRepository for Database {
    async fn create_comment(&self, comment: NewComment) -> Result<Comment, StoreError> {
        sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (message, post_id, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, message, post_id, user_id, 0::BIGINT AS likes, created_at, updated_at
            "#,
        )
        .bind(&comment.message)
        .bind(comment.post_id)
        .bind(comment.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error("Failed to create comment", "post", e))
    }

    async fn find_comment(&self, id: i64) -> Result<Option<Comment>, StoreError> {
        Self::fetch_comment(&self.pool, id)
            .await
            .map_err(|e| transient("Failed to fetch comment", e))
    }

    async fn list_comments(&self, post_id: Option<i64>) -> Result<Vec<Comment>, StoreError> {
        sqlx::query_as::<_, Comment>(&format!(
            "SELECT {} FROM comments c WHERE ($1::BIGINT IS NULL OR c.post_id = $1) ORDER BY c.id",
            COMMENT_COLUMNS
        ))
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| transient("Failed to list comments", e))
    }

    async fn update_comment(
        &self,
        id: i64,
        changes: CommentChanges,
    ) -> Result<Option<Comment>, StoreError> {
        let Some(message) = changes.message else {
            return self.find_comment(id).await;
        };

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| transient("Failed to begin transaction", e))?;

        let result = sqlx::query(
            "UPDATE comments SET message = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(&message)
        .execute(&mut *tx)
        .await
        .map_err(|e| transient("Failed to update comment", e))?;

        if result.rows_affected() == 0 {
            tx.rollback().await.ok();
            return Ok(None);
        }

        let updated = Self::fetch_comment(&mut *tx, id)
            .await
            .map_err(|e| transient("Failed to read back comment", e))?;

        tx.commit()
            .await
            .map_err(|e| transient("Failed to commit transaction", e))?;

        Ok(updated)
    }

    async fn delete_comment(&self, id: i64) -> Result<bool, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| transient("Failed to begin transaction", e))?;

        let locked =
            sqlx::query_scalar::<_, i64>("SELECT id FROM comments WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| transient("Failed to lock comment", e))?;
        if locked.is_none() {
            tx.rollback().await.ok();
            return Ok(false);
        }

        sqlx::query("DELETE FROM likes WHERE target_type = 'comment' AND target_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| transient("Failed to delete comment likes", e))?;

        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| transient("Failed to delete comment", e))?;

        tx.commit()
            .await
            .map_err(|e| transient("Failed to commit transaction", e))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Store for Database {
    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| transient("Health check failed", e))?;
        Ok(())
    }
}

#[async_trait]
impl RelationStore for Database {
    async fn toggle_once(&self, key: LikeKey) -> Result<ToggleOutcome, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| transient("Failed to begin transaction", e))?;

        // Serializes toggles on one key for the rest of the transaction.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(format!(
                "like:{}:{}:{}",
                key.actor_id, key.target_id, key.target_type
            ))
            .execute(&mut *tx)
            .await
            .map_err(|e| transient("Failed to lock like key", e))?;

        // Holds the target until commit so a concurrent delete cannot orphan
        // the row inserted below.
        let target_lock = match key.target_type {
            TargetType::Post => "SELECT id FROM posts WHERE id = $1 FOR SHARE",
            TargetType::Comment => "SELECT id FROM comments WHERE id = $1 FOR SHARE",
        };
        let target = sqlx::query_scalar::<_, i64>(target_lock)
            .bind(key.target_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| transient("Failed to lock like target", e))?;
        if target.is_none() {
            tx.rollback().await.ok();
            return Err(StoreError::MissingReference(key.target_type.to_string()));
        }

        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT actor_id FROM likes WHERE actor_id = $1 AND target_id = $2 AND target_type = $3",
        )
        .bind(key.actor_id)
        .bind(key.target_id)
        .bind(key.target_type.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| transient("Failed to read like", e))?;

        let outcome = if existing.is_none() {
            let inserted = sqlx::query(
                "INSERT INTO likes (actor_id, target_id, target_type) VALUES ($1, $2, $3)",
            )
            .bind(key.actor_id)
            .bind(key.target_id)
            .bind(key.target_type.as_str())
            .execute(&mut *tx)
            .await;

            match inserted {
                Ok(_) => ToggleOutcome::Added,
                Err(sqlx::Error::Database(ref db_err)) if db_err.is_unique_violation() => {
                    tx.rollback().await.ok();
                    return Err(StoreError::Duplicate("like".to_string()));
                }
                Err(e) => return Err(transient("Failed to insert like", e)),
            }
        } else {
            let deleted = sqlx::query(
                "DELETE FROM likes WHERE actor_id = $1 AND target_id = $2 AND target_type = $3",
            )
            .bind(key.actor_id)
            .bind(key.target_id)
            .bind(key.target_type.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| transient("Failed to delete like", e))?;

            if deleted.rows_affected() == 0 {
                tx.rollback().await.ok();
                return Err(StoreError::Vanished);
            }
            ToggleOutcome::Removed
        };

        tx.commit()
            .await
            .map_err(|e| transient("Failed to commit transaction", e))?;

        Ok(outcome)
    }

    async fn remove(&self, key: LikeKey) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "DELETE FROM likes WHERE actor_id = $1 AND target_id = $2 AND target_type = $3",
        )
        .bind(key.actor_id)
        .bind(key.target_id)
        .bind(key.target_type.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| transient("Failed to remove like", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, target_id: i64, target_type: TargetType) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM likes WHERE target_id = $1 AND target_type = $2",
        )
        .bind(target_id)
        .bind(target_type.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| transient("Failed to count likes", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn connect() -> Database {
        let url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/social_test".to_string());
        let db = Database::connect(&DatabaseConfig {
            url,
            max_connections: 5,
            min_connections: 1,
        })
        .await
        .expect("connect");
        db.run_migrations().await.expect("migrate");
        db
    }

    async fn seed_post(db: &Database) -> (User, Post) {
        let stamp = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let user = db
            .create_user(NewUser {
                username: format!("toggle-{}", stamp),
                email: format!("toggle-{}@example.com", stamp),
                password_hash: crate::utils::PasswordHashString::new("x".to_string()),
            })
            .await
            .unwrap();
        let post = db
            .create_post(NewPost {
                title: "toggle target".to_string(),
                description: None,
                company_id: None,
                user_id: user.id,
            })
            .await
            .unwrap();
        (user, post)
    }

    #[tokio::test]
    #[ignore] // Requires running PostgreSQL
    async fn test_toggle_round_trip() {
        let db = connect().await;
        let (user, post) = seed_post(&db).await;
        let key = LikeKey::new(user.id, post.id, TargetType::Post);

        assert_eq!(db.toggle_once(key).await.unwrap(), ToggleOutcome::Added);
        assert_eq!(db.count(post.id, TargetType::Post).await.unwrap(), 1);
        assert_eq!(db.toggle_once(key).await.unwrap(), ToggleOutcome::Removed);
        assert_eq!(db.count(post.id, TargetType::Post).await.unwrap(), 0);
    }

    #[tokio::test]
    #[ignore] // Requires running PostgreSQL
    async fn test_toggle_on_deleted_target() {
        let db = connect().await;
        let (user, post) = seed_post(&db).await;
        assert!(db.delete_post(post.id).await.unwrap());

        let result = db
            .toggle_once(LikeKey::new(user.id, post.id, TargetType::Post))
            .await;
        assert!(matches!(result, Err(StoreError::MissingReference(_))));
        assert_eq!(db.count(post.id, TargetType::Post).await.unwrap(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    #[ignore] // Requires running PostgreSQL
    async fn test_concurrent_toggles_resolve_without_errors() {
        use crate::services::ToggleEngine;
        use std::sync::Arc;

        let db = Arc::new(connect().await);
        let (user, post) = seed_post(&db).await;
        let engine = ToggleEngine::new(db.clone(), Duration::from_secs(10));

        let mut expected = 0i64;
        for round in 0..20 {
            let handles: Vec<_> = (0..24)
                .map(|_| {
                    let engine = engine.clone();
                    let (actor, target) = (user.id, post.id);
                    tokio::spawn(async move { engine.toggle(actor, target, TargetType::Post).await })
                })
                .collect();

            let mut added = 0i64;
            let mut removed = 0i64;
            for handle in handles {
                match handle.await.unwrap() {
                    Ok(ToggleOutcome::Added) => added += 1,
                    Ok(ToggleOutcome::Removed) => removed += 1,
                    Err(e) => panic!("round {}: toggle surfaced {}", round, e),
                }
            }

            expected += added - removed;
            let rows = db.count(post.id, TargetType::Post).await.unwrap();
            assert!(rows == 0 || rows == 1, "round {}: {} rows", round, rows);
            assert_eq!(rows, expected, "round {}: net toggles disagree with rows", round);
        }
    }
}

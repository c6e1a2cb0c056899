//! User accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::PasswordHashString;

/// Stored user row. Holds the password digest, so it is never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn password_hash(&self) -> PasswordHashString {
        PasswordHashString::new(self.password_hash.clone())
    }

    /// Convert to sanitized response (no sensitive fields).
    pub fn sanitized(&self) -> SanitizedUser {
        SanitizedUser {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizedUser {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Insert payload; the digest is produced by a `CredentialStore` beforehand.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: PasswordHashString,
}

//! Authenticated caller, rebuilt from a bearer token on every request.

use chrono::{DateTime, Utc};

use super::User;

/// Fields a token is issued for. Never carries credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityFields {
    pub user_id: i64,
    pub username: String,
    pub email: String,
}

impl From<&User> for IdentityFields {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// Immutable view of the caller for the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    user_id: i64,
    username: String,
    email: String,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl Identity {
    pub fn new(
        fields: IdentityFields,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: fields.user_id,
            username: fields.username,
            email: fields.email,
            issued_at,
            expires_at,
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

use async_trait::async_trait;

use super::ServiceError;
use crate::utils::{hash_password, verify_password, Password, PasswordHashString};

/// One-way password hashing.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<PasswordHashString, ServiceError>;
    async fn verify(
        &self,
        digest: &PasswordHashString,
        password: &Password,
    ) -> Result<bool, ServiceError>;
}

/// Argon2id with default parameters. Hashing runs on the blocking pool.
#[derive(Debug, Clone, Default)]
pub struct Argon2Credentials;

#[async_trait]
impl CredentialStore for Argon2Credentials {
    async fn hash(&self, password: &Password) -> Result<PasswordHashString, ServiceError> {
        let password = password.clone();
        tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| ServiceError::Internal(anyhow::anyhow!("Hashing task failed: {}", e)))?
            .map_err(ServiceError::Internal)
    }

    async fn verify(
        &self,
        digest: &PasswordHashString,
        password: &Password,
    ) -> Result<bool, ServiceError> {
        let password = password.clone();
        let digest = digest.clone();
        tokio::task::spawn_blocking(move || verify_password(&password, &digest))
            .await
            .map_err(|e| ServiceError::Internal(anyhow::anyhow!("Verify task failed: {}", e)))?
            .map_err(ServiceError::Internal)
    }
}

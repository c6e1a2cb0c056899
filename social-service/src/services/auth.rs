use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::{
    dtos::auth::{AuthResponse, LoginRequest, SignupRequest},
    models::{IdentityFields, NewUser, User},
    services::{
        store::{Store, StoreError, UserRepository},
        CredentialStore, ServiceError, TokenService,
    },
    utils::{Password, PasswordHashString},
};

/// Verified against when the email is unknown, so that both login failures
/// cost one hash verification.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn Store>,
    credentials: Arc<dyn CredentialStore>,
    tokens: TokenService,
    decoy_digest: Arc<OnceCell<PasswordHashString>>,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn Store>,
        credentials: Arc<dyn CredentialStore>,
        tokens: TokenService,
    ) -> Self {
        Self {
            store,
            credentials,
            tokens,
            decoy_digest: Arc::new(OnceCell::new()),
        }
    }

    pub async fn signup(&self, req: SignupRequest) -> Result<AuthResponse, ServiceError> {
        if self.store.find_user_by_email(&req.email).await?.is_some() {
            return Err(ServiceError::EmailAlreadyRegistered);
        }

        if self
            .store
            .find_user_by_username(&req.username)
            .await?
            .is_some()
        {
            return Err(ServiceError::UsernameTaken);
        }

        let password_hash = self
            .credentials
            .hash(&Password::new(req.password))
            .await?;

        // The checks above can race a concurrent signup; the unique
        // constraints settle it.
        let user = self
            .store
            .create_user(NewUser {
                username: req.username,
                email: req.email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                StoreError::Duplicate(ref what) if what == "username" => ServiceError::UsernameTaken,
                StoreError::Duplicate(_) => ServiceError::EmailAlreadyRegistered,
                other => ServiceError::Store(other),
            })?;

        tracing::info!(user_id = user.id, "User signed up");

        self.token_response(&user, "signup successful")
    }

    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse, ServiceError> {
        let user = match self.store.find_user_by_email(&req.email).await? {
            Some(user) => user,
            None => {
                let decoy = self
                    .decoy_digest
                    .get_or_try_init(|| async {
                        self.credentials
                            .hash(&Password::new(DECOY_PASSWORD.to_string()))
                            .await
                    })
                    .await?;
                self.credentials
                    .verify(decoy, &Password::new(req.password))
                    .await?;

                tracing::warn!("Login failed: unknown email");
                return Err(ServiceError::InvalidCredentials);
            }
        };

        let matches = self
            .credentials
            .verify(&user.password_hash(), &Password::new(req.password))
            .await?;

        if !matches {
            tracing::warn!(user_id = user.id, "Login failed: password mismatch");
            return Err(ServiceError::InvalidCredentials);
        }

        tracing::info!(user_id = user.id, "User logged in");

        self.token_response(&user, "login successful")
    }

    fn token_response(&self, user: &User, message: &str) -> Result<AuthResponse, ServiceError> {
        let token = self
            .tokens
            .issue(&IdentityFields::from(user))
            .map_err(|e| ServiceError::Internal(anyhow::Error::new(e)))?;

        Ok(AuthResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.tokens.ttl_seconds(),
            user: user.sanitized(),
            message: message.to_string(),
        })
    }
}

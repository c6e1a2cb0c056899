//! Services layer for social-service.
//!
//! Token issuance, credential hashing, ownership policy, the like toggle
//! engine and the storage backends behind them.

mod auth;
mod credentials;
mod database;
pub mod error;
mod jwt;
mod memory;
pub mod metrics;
pub mod ownership;
pub mod store;
pub mod toggle;

pub use auth::AuthService;
pub use credentials::{Argon2Credentials, CredentialStore};
pub use database::Database;
pub use error::ServiceError;
pub use jwt::{IdentityClaims, TokenError, TokenService};
pub use memory::MemoryStore;
pub use ownership::{authorize, require_owner, Decision, Owned};
pub use store::{
    CommentRepository, CompanyRepository, PostRepository, RelationStore, Store, StoreError,
    UserRepository,
};
pub use toggle::{ToggleEngine, ToggleError};

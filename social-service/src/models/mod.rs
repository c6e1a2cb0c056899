pub mod comment;
pub mod company;
pub mod identity;
pub mod like;
pub mod post;
pub mod user;

pub use comment::{Comment, CommentChanges, NewComment};
pub use company::{Company, CompanyChanges, NewCompany};
pub use identity::{Identity, IdentityFields};
pub use like::{LikeKey, TargetType, ToggleOutcome};
pub use post::{NewPost, Post, PostChanges};
pub use user::{NewUser, SanitizedUser, User};

use serde::{Deserialize, Deserializer};

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`) in partial updates. Pair with `#[serde(default)]`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

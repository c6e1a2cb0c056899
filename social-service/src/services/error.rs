use service_core::error::AppError;
use thiserror::Error;

use super::store::StoreError;
use super::toggle::ToggleError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Toggle(#[from] ToggleError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("You do not own this {0}")]
    Forbidden(&'static str),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(what) => {
                AppError::Conflict(anyhow::anyhow!("Duplicate {}", what))
            }
            StoreError::MissingReference(what) => {
                AppError::BadRequest(anyhow::anyhow!("Referenced {} does not exist", what))
            }
            StoreError::Vanished => {
                AppError::DatabaseError(anyhow::anyhow!("Row vanished mid-transaction"))
            }
            StoreError::Transient(e) => AppError::DatabaseError(e),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Store(e) => AppError::from(e),
            ServiceError::Toggle(ToggleError::TargetMissing(target_type)) => {
                AppError::NotFound(anyhow::anyhow!(
                    "{} not found",
                    capitalize(target_type.as_str())
                ))
            }
            ServiceError::Toggle(e) => AppError::InternalError(anyhow::Error::new(e)),
            ServiceError::Internal(e) => AppError::InternalError(e),
            ServiceError::InvalidCredentials => {
                AppError::Unauthorized(anyhow::anyhow!("Invalid email or password"))
            }
            ServiceError::EmailAlreadyRegistered => {
                AppError::Conflict(anyhow::anyhow!("Email already registered"))
            }
            ServiceError::UsernameTaken => {
                AppError::Conflict(anyhow::anyhow!("Username already taken"))
            }
            ServiceError::NotFound(kind) => {
                AppError::NotFound(anyhow::anyhow!("{} not found", capitalize(kind)))
            }
            ServiceError::Forbidden(kind) => {
                AppError::Forbidden(anyhow::anyhow!("You do not own this {}", kind))
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TargetType;
    use service_core::axum::{http::StatusCode, response::IntoResponse};

    fn status(err: ServiceError) -> StatusCode {
        AppError::from(err).into_response().status()
    }

    #[test]
    fn maps_to_http_statuses() {
        assert_eq!(status(ServiceError::InvalidCredentials), StatusCode::UNAUTHORIZED);
        assert_eq!(status(ServiceError::EmailAlreadyRegistered), StatusCode::CONFLICT);
        assert_eq!(status(ServiceError::NotFound("post")), StatusCode::NOT_FOUND);
        assert_eq!(status(ServiceError::Forbidden("post")), StatusCode::FORBIDDEN);
        assert_eq!(
            status(ServiceError::Store(StoreError::MissingReference("company".into()))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(ServiceError::Toggle(ToggleError::TimedOut)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn toggle_on_deleted_target_is_not_found() {
        let err = AppError::from(ServiceError::Toggle(ToggleError::TargetMissing(
            TargetType::Post,
        )));
        assert_eq!(err.to_string(), "Not found: Post not found");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn not_found_message_is_capitalized() {
        let err = AppError::from(ServiceError::NotFound("comment"));
        assert_eq!(err.to_string(), "Not found: Comment not found");
    }
}

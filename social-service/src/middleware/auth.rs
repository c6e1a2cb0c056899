use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use service_core::error::AppError;

use crate::{models::Identity, services::metrics::AUTH_REJECTIONS_TOTAL, AppState};

/// Rejects the request with a generic 401 unless it carries a valid bearer
/// token. On success the caller's `Identity` is stored in the request
/// extensions for `AuthUser`.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = bearer_token(req.headers()) else {
        AUTH_REJECTIONS_TOTAL.with_label_values(&["missing"]).inc();
        tracing::warn!(reason = "missing", "Rejected unauthenticated request");
        return Err(unauthorized());
    };

    let identity = match state.tokens.validate(token) {
        Ok(identity) => identity,
        Err(e) => {
            AUTH_REJECTIONS_TOTAL.with_label_values(&[e.reason()]).inc();
            tracing::warn!(reason = e.reason(), "Rejected bearer token");
            return Err(unauthorized());
        }
    };

    tracing::debug!(user_id = identity.user_id(), "Authenticated request");
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

fn unauthorized() -> AppError {
    AppError::Unauthorized(anyhow::anyhow!("Authentication required"))
}

/// Extractor for the authenticated caller.
pub struct AuthUser(pub Identity);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(unauthorized)
    }
}

use service_core::{
    axum::{extract::State, http::StatusCode, response::IntoResponse, Json},
    error::AppError,
};

use crate::{
    dtos::{auth::LoginRequest, MessageResponse},
    utils::ValidatedJson,
    AppState,
};

/// Login with email and password
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let res = state.auth_service.login(req).await?;
    Ok((StatusCode::OK, Json(res)))
}

/// Tokens are stateless; logging out is the client discarding its token.
pub async fn logout() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(MessageResponse {
            message: "logout successful".to_string(),
        }),
    )
}

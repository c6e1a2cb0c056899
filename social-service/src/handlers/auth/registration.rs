use service_core::{
    axum::{extract::State, http::StatusCode, response::IntoResponse, Json},
    error::AppError,
};

use crate::{dtos::auth::SignupRequest, utils::ValidatedJson, AppState};

/// Create an account and return a token for it.
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let res = state.auth_service.signup(req).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

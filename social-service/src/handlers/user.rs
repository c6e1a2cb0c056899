use service_core::{
    axum::{extract::State, response::IntoResponse, Json},
    error::AppError,
};

use crate::{
    middleware::AuthUser,
    services::{ServiceError, UserRepository},
    AppState,
};

pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .store
        .find_user(identity.user_id())
        .await?
        .ok_or(ServiceError::NotFound("user"))?;

    Ok(Json(user.sanitized()))
}

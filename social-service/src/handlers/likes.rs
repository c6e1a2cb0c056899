use service_core::{
    axum::{extract::State, response::IntoResponse, Json},
    error::AppError,
};

use crate::{
    dtos::content::{LikeRequest, LikeResponse},
    middleware::AuthUser,
    models::{Identity, TargetType},
    services::{CommentRepository, PostRepository, ServiceError},
    utils::ValidatedJson,
    AppState,
};

pub async fn like_post(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    ValidatedJson(req): ValidatedJson<LikeRequest>,
) -> Result<impl IntoResponse, AppError> {
    if state.store.find_post(req.target_id).await?.is_none() {
        return Err(ServiceError::NotFound("post").into());
    }
    toggle(&state, &identity, req.target_id, TargetType::Post).await
}

pub async fn like_comment(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    ValidatedJson(req): ValidatedJson<LikeRequest>,
) -> Result<impl IntoResponse, AppError> {
    if state.store.find_comment(req.target_id).await?.is_none() {
        return Err(ServiceError::NotFound("comment").into());
    }
    toggle(&state, &identity, req.target_id, TargetType::Comment).await
}

async fn toggle(
    state: &AppState,
    identity: &Identity,
    target_id: i64,
    target_type: TargetType,
) -> Result<Json<LikeResponse>, AppError> {
    let outcome = state
        .toggles
        .toggle(identity.user_id(), target_id, target_type)
        .await
        .map_err(ServiceError::from)?;

    Ok(Json(LikeResponse {
        liked: outcome.liked(),
    }))
}

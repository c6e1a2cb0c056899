use service_core::{
    axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
        Json,
    },
    error::AppError,
};

use crate::{
    dtos::content::CreatePostRequest,
    middleware::AuthUser,
    models::PostChanges,
    services::{require_owner, PostRepository, ServiceError},
    utils::ValidatedJson,
    AppState,
};

pub async fn list_posts(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.store.list_posts().await?))
}

pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    ValidatedJson(req): ValidatedJson<CreatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let post = state
        .store
        .create_post(req.into_new(identity.user_id()))
        .await?;

    tracing::info!(post_id = post.id, user_id = identity.user_id(), "Post created");
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn get_post(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let post = state
        .store
        .find_post(id)
        .await?
        .ok_or(ServiceError::NotFound("post"))?;
    Ok(Json(post))
}

pub async fn update_post(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(changes): ValidatedJson<PostChanges>,
) -> Result<impl IntoResponse, AppError> {
    require_owner(state.store.find_post(id).await?, &identity)?;

    let post = state
        .store
        .update_post(id, changes)
        .await?
        .ok_or(ServiceError::NotFound("post"))?;
    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    require_owner(state.store.find_post(id).await?, &identity)?;

    if !state.store.delete_post(id).await? {
        return Err(ServiceError::NotFound("post").into());
    }

    tracing::info!(post_id = id, user_id = identity.user_id(), "Post deleted");
    Ok(StatusCode::NO_CONTENT)
}

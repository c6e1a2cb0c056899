use service_core::{
    axum::{
        extract::{Path, Query, State},
        http::StatusCode,
        response::IntoResponse,
        Json,
    },
    error::AppError,
};

use crate::{
    dtos::content::{CommentFilter, CreateCommentRequest},
    middleware::AuthUser,
    models::CommentChanges,
    services::{require_owner, CommentRepository, PostRepository, ServiceError},
    utils::ValidatedJson,
    AppState,
};

pub async fn list_comments(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(filter): Query<CommentFilter>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.store.list_comments(filter.post_id).await?))
}

pub async fn create_comment(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    ValidatedJson(req): ValidatedJson<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    if state.store.find_post(req.post_id).await?.is_none() {
        return Err(ServiceError::NotFound("post").into());
    }

    let comment = state
        .store
        .create_comment(req.into_new(identity.user_id()))
        .await?;

    tracing::info!(
        comment_id = comment.id,
        post_id = comment.post_id,
        user_id = identity.user_id(),
        "Comment created"
    );
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn get_comment(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let comment = state
        .store
        .find_comment(id)
        .await?
        .ok_or(ServiceError::NotFound("comment"))?;
    Ok(Json(comment))
}

pub async fn update_comment(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(changes): ValidatedJson<CommentChanges>,
) -> Result<impl IntoResponse, AppError> {
    require_owner(state.store.find_comment(id).await?, &identity)?;

    let comment = state
        .store
        .update_comment(id, changes)
        .await?
        .ok_or(ServiceError::NotFound("comment"))?;
    Ok(Json(comment))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    require_owner(state.store.find_comment(id).await?, &identity)?;

    if !state.store.delete_comment(id).await? {
        return Err(ServiceError::NotFound("comment").into());
    }

    tracing::info!(comment_id = id, user_id = identity.user_id(), "Comment deleted");
    Ok(StatusCode::NO_CONTENT)
}

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
    dtos::content::CreateCompanyRequest,
    middleware::AuthUser,
    models::CompanyChanges,
    services::{require_owner, CompanyRepository, ServiceError},
    utils::ValidatedJson,
    AppState,
};

pub async fn list_companies(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.store.list_companies().await?))
}

pub async fn create_company(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    ValidatedJson(req): ValidatedJson<CreateCompanyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let company = state
        .store
        .create_company(req.into_new(identity.user_id()))
        .await?;

    tracing::info!(company_id = company.id, user_id = identity.user_id(), "Company created");
    Ok((StatusCode::CREATED, Json(company)))
}

pub async fn get_company(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let company = state
        .store
        .find_company(id)
        .await?
        .ok_or(ServiceError::NotFound("company"))?;
    Ok(Json(company))
}

pub async fn update_company(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(changes): ValidatedJson<CompanyChanges>,
) -> Result<impl IntoResponse, AppError> {
    if changes.parent_company_id == Some(Some(id)) {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "A company cannot be its own parent"
        )));
    }

    require_owner(state.store.find_company(id).await?, &identity)?;

    let company = state
        .store
        .update_company(id, changes)
        .await?
        .ok_or(ServiceError::NotFound("company"))?;
    Ok(Json(company))
}

pub async fn delete_company(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    require_owner(state.store.find_company(id).await?, &identity)?;

    if !state.store.delete_company(id).await? {
        return Err(ServiceError::NotFound("company").into());
    }

    tracing::info!(company_id = id, user_id = identity.user_id(), "Company deleted");
    Ok(StatusCode::NO_CONTENT)
}

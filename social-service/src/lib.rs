pub mod config;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

use std::sync::Arc;

use service_core::axum::{
    extract::State,
    http::{header, HeaderValue, Method, Request},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Json, Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    request_id_middleware, security_headers_middleware, REQUEST_ID_HEADER,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SocialConfig;
use crate::services::{
    Argon2Credentials, AuthService, RelationStore, Store, ToggleEngine, TokenService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: SocialConfig,
    pub tokens: TokenService,
    pub auth_service: AuthService,
    pub store: Arc<dyn Store>,
    pub toggles: ToggleEngine,
}

impl AppState {
    /// Wires the token, auth and toggle services over the given backends.
    pub fn new(
        config: SocialConfig,
        store: Arc<dyn Store>,
        relations: Arc<dyn RelationStore>,
    ) -> Result<Self, AppError> {
        let tokens = TokenService::new(&config.jwt.secret, config.jwt.token_ttl_minutes)
            .map_err(AppError::ConfigError)?;

        let auth_service = AuthService::new(
            store.clone(),
            Arc::new(Argon2Credentials),
            tokens.clone(),
        );

        let toggles = ToggleEngine::new(relations, config.toggle.timeout());

        Ok(Self {
            config,
            tokens,
            auth_service,
            store,
            toggles,
        })
    }
}

pub fn build_router(state: AppState) -> Result<Router, AppError> {
    let protected = Router::new()
        .route("/users/me", get(handlers::user::get_me))
        .route(
            "/companies",
            get(handlers::companies::list_companies).post(handlers::companies::create_company),
        )
        .route(
            "/companies/:id",
            get(handlers::companies::get_company)
                .patch(handlers::companies::update_company)
                .put(handlers::companies::update_company)
                .delete(handlers::companies::delete_company),
        )
        .route(
            "/posts",
            get(handlers::posts::list_posts).post(handlers::posts::create_post),
        )
        .route(
            "/posts/:id",
            get(handlers::posts::get_post)
                .patch(handlers::posts::update_post)
                .put(handlers::posts::update_post)
                .delete(handlers::posts::delete_post),
        )
        .route(
            "/comments",
            get(handlers::comments::list_comments).post(handlers::comments::create_comment),
        )
        .route(
            "/comments/:id",
            get(handlers::comments::get_comment)
                .patch(handlers::comments::update_comment)
                .put(handlers::comments::update_comment)
                .delete(handlers::comments::delete_comment),
        )
        .route("/likepost", post(handlers::likes::like_post))
        .route("/likecomment", post(handlers::likes::like_comment))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    let origins = &state.config.security.allowed_origins;
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins = origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>().map_err(|e| {
                    AppError::ConfigError(anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(origins)
    };

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(handlers::metrics::metrics))
        .route("/signup", post(handlers::auth::signup))
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .merge(protected)
        .with_state(state)
        .layer(from_fn(middleware::metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
            let request_id = request
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");

            tracing::info_span!(
                "http_request",
                request_id = %request_id,
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        }))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(allow_origin)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]),
        );

    Ok(app)
}

/// Reports liveness and whether the storage backend answers.
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.store.health_check().await.map_err(|e| {
        tracing::error!(error = %e, "Storage health check failed");
        AppError::ServiceUnavailable
    })?;

    Ok(Json(serde_json::json!({
        "status": "healthy",
        "service": state.config.service_name,
        "version": state.config.service_version,
        "environment": format!("{:?}", state.config.environment),
        "checks": {
            "storage": "up"
        }
    })))
}

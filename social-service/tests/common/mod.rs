//! Shared setup for social-service integration tests.
//!
//! Every test gets its own router over a fresh in-memory store, so tests
//! never share rows.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use service_core::config::Config;
use social_service::{
    build_router,
    config::SocialConfig,
    services::{MemoryStore, RelationStore, Store},
    AppState,
};
use std::sync::Arc;
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const PASSWORD: &str = "correct horse battery staple";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
}

pub fn test_config() -> SocialConfig {
    SocialConfig::from_lookup(Config::default(), |key| {
        match key {
            "STORAGE_BACKEND" => Some("memory"),
            "JWT_SECRET" => Some(TEST_SECRET),
            "LOG_LEVEL" => Some("error"),
            _ => None,
        }
        .map(str::to_string)
    })
    .expect("test config should be valid")
}

pub fn spawn_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(
        test_config(),
        store.clone() as Arc<dyn Store>,
        store.clone() as Arc<dyn RelationStore>,
    )
    .expect("Failed to build app state");
    let router = build_router(state.clone()).expect("Failed to build router");

    TestApp {
        router,
        state,
        store,
    }
}

pub async fn raw(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

/// Sends a request and returns the status with the decoded JSON body
/// (`Value::Null` for an empty body).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let response = raw(app, method, uri, token, body).await;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

pub struct TestUser {
    pub id: i64,
    pub token: String,
}

pub async fn signup(app: &Router, username: &str) -> TestUser {
    let (status, body) = send(
        app,
        Method::POST,
        "/signup",
        None,
        Some(json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": PASSWORD,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);

    TestUser {
        id: body["user"]["id"].as_i64().unwrap(),
        token: body["token"].as_str().unwrap().to_string(),
    }
}

pub async fn create_post(app: &Router, user: &TestUser, title: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/posts",
        Some(&user.token),
        Some(json!({ "title": title, "description": "body text" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create post failed: {}", body);
    body
}

pub async fn create_comment(app: &Router, user: &TestUser, post_id: i64, message: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/comments",
        Some(&user.token),
        Some(json!({ "post_id": post_id, "message": message })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create comment failed: {}", body);
    body
}

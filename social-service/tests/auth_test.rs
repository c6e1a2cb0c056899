mod common;

use axum::http::{Method, StatusCode};
use common::{send, signup, spawn_app, PASSWORD};
use serde_json::json;

#[tokio::test]
async fn signup_returns_token_and_sanitized_user() {
    let app = spawn_app();

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/signup",
        None,
        Some(json!({
            "username": "ada",
            "email": "ada@example.com",
            "password": PASSWORD,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "signup successful");
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 10080 * 60);
    assert_eq!(body["user"]["username"], "ada");
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    let raw = body.to_string();
    assert!(!raw.contains("password"));
    assert!(!raw.contains(PASSWORD));
}

#[tokio::test]
async fn signup_rejects_duplicate_email_and_username() {
    let app = spawn_app();
    signup(&app.router, "ada").await;

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/signup",
        None,
        Some(json!({
            "username": "someone-else",
            "email": "ada@example.com",
            "password": PASSWORD,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/signup",
        None,
        Some(json!({
            "username": "ada",
            "email": "other@example.com",
            "password": PASSWORD,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn signup_validates_payload() {
    let app = spawn_app();

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/signup",
        None,
        Some(json!({ "username": "ada", "email": "not-an-email", "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation error");

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/signup",
        None,
        Some(json!({ "username": "ada" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_issues_a_working_token() {
    let app = spawn_app();
    let user = signup(&app.router, "grace").await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/login",
        None,
        Some(json!({ "email": "grace@example.com", "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "login successful");
    assert_eq!(body["user"]["id"], user.id);

    let token = body["token"].as_str().unwrap();
    let (status, me) = send(&app.router, Method::GET, "/users/me", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], user.id);
    assert_eq!(me["username"], "grace");
    assert!(me.get("password_hash").is_none());
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = spawn_app();
    signup(&app.router, "grace").await;

    let (wrong_password, wrong_body) = send(
        &app.router,
        Method::POST,
        "/login",
        None,
        Some(json!({ "email": "grace@example.com", "password": "nope" })),
    )
    .await;
    let (unknown_email, unknown_body) = send(
        &app.router,
        Method::POST,
        "/login",
        None,
        Some(json!({ "email": "nobody@example.com", "password": PASSWORD })),
    )
    .await;

    assert_eq!(wrong_password, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body["error"], "Invalid email or password");
}

#[tokio::test]
async fn logout_is_stateless() {
    let app = spawn_app();
    let user = signup(&app.router, "ada").await;

    let (status, body) = send(&app.router, Method::POST, "/logout", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "logout successful");

    // No server-side revocation: the token keeps working until it expires.
    let (status, _) = send(&app.router, Method::GET, "/users/me", Some(&user.token), None).await;
    assert_eq!(status, StatusCode::OK);
}

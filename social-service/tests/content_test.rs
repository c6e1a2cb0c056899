mod common;

use axum::http::{Method, StatusCode};
use common::{create_comment, create_post, send, signup, spawn_app};
use serde_json::json;

#[tokio::test]
async fn post_owner_comes_from_the_token() {
    let app = spawn_app();
    let alice = signup(&app.router, "alice").await;

    let (status, post) = send(
        &app.router,
        Method::POST,
        "/posts",
        Some(&alice.token),
        Some(json!({ "title": "Hello", "user_id": 999 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(post["user_id"], alice.id);
    assert_eq!(post["likes"], 0);
    assert_eq!(post["company_id"], serde_json::Value::Null);
}

#[tokio::test]
async fn reads_are_visible_to_any_authenticated_caller() {
    let app = spawn_app();
    let alice = signup(&app.router, "alice").await;
    let bob = signup(&app.router, "bob").await;

    create_post(&app.router, &alice, "one").await;
    create_post(&app.router, &alice, "two").await;

    let (status, posts) = send(&app.router, Method::GET, "/posts", Some(&bob.token), None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<_> = posts
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles.len(), 2);
    assert!(titles.contains(&"one".to_string()));
    assert!(titles.contains(&"two".to_string()));
}

#[tokio::test]
async fn invalid_payloads_are_rejected() {
    let app = spawn_app();
    let alice = signup(&app.router, "alice").await;

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/posts",
        Some(&alice.token),
        Some(json!({ "title": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/companies",
        Some(&alice.token),
        Some(json!({ "description": "no name" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/posts",
        Some(&alice.token),
        Some(json!({ "title": "Orphan", "company_id": 4242 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("company"));
}

#[tokio::test]
async fn comments_require_an_existing_post() {
    let app = spawn_app();
    let alice = signup(&app.router, "alice").await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/comments",
        Some(&alice.token),
        Some(json!({ "post_id": 4242, "message": "hello?" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Post not found");
}

#[tokio::test]
async fn comments_can_be_filtered_by_post() {
    let app = spawn_app();
    let alice = signup(&app.router, "alice").await;

    let first = create_post(&app.router, &alice, "first").await;
    let second = create_post(&app.router, &alice, "second").await;
    let first_id = first["id"].as_i64().unwrap();
    let second_id = second["id"].as_i64().unwrap();

    create_comment(&app.router, &alice, first_id, "a").await;
    create_comment(&app.router, &alice, first_id, "b").await;
    create_comment(&app.router, &alice, second_id, "c").await;

    let (_, all) = send(&app.router, Method::GET, "/comments", Some(&alice.token), None).await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (status, filtered) = send(
        &app.router,
        Method::GET,
        &format!("/comments?post_id={}", first_id),
        Some(&alice.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let filtered = filtered.as_array().unwrap();
    assert_eq!(filtered.len(), 2);
    assert!(filtered.iter().all(|c| c["post_id"] == first_id));
}

#[tokio::test]
async fn deleting_a_post_removes_its_comments() {
    let app = spawn_app();
    let alice = signup(&app.router, "alice").await;

    let post = create_post(&app.router, &alice, "short-lived").await;
    let post_id = post["id"].as_i64().unwrap();
    let comment = create_comment(&app.router, &alice, post_id, "bye").await;

    let (status, _) = send(
        &app.router,
        Method::DELETE,
        &format!("/posts/{}", post_id),
        Some(&alice.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app.router,
        Method::GET,
        &format!("/comments/{}", comment["id"]),
        Some(&alice.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_company_detaches_its_posts() {
    let app = spawn_app();
    let alice = signup(&app.router, "alice").await;

    let (_, company) = send(
        &app.router,
        Method::POST,
        "/companies",
        Some(&alice.token),
        Some(json!({ "name": "Acme" })),
    )
    .await;
    let company_id = company["id"].as_i64().unwrap();

    let (status, post) = send(
        &app.router,
        Method::POST,
        "/posts",
        Some(&alice.token),
        Some(json!({ "title": "News", "company_id": company_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(post["company_id"], company_id);

    send(
        &app.router,
        Method::DELETE,
        &format!("/companies/{}", company_id),
        Some(&alice.token),
        None,
    )
    .await;

    let (status, post) = send(
        &app.router,
        Method::GET,
        &format!("/posts/{}", post["id"]),
        Some(&alice.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(post["company_id"], serde_json::Value::Null);
}

#[tokio::test]
async fn company_cannot_parent_itself() {
    let app = spawn_app();
    let alice = signup(&app.router, "alice").await;

    let (_, company) = send(
        &app.router,
        Method::POST,
        "/companies",
        Some(&alice.token),
        Some(json!({ "name": "Acme" })),
    )
    .await;
    let id = company["id"].as_i64().unwrap();
    let uri = format!("/companies/{}", id);

    let (status, body) = send(
        &app.router,
        Method::PATCH,
        &uri,
        Some(&alice.token),
        Some(json!({ "parent_company_id": id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "A company cannot be its own parent");

    let (_, unchanged) = send(&app.router, Method::GET, &uri, Some(&alice.token), None).await;
    assert_eq!(unchanged["parent_company_id"], serde_json::Value::Null);
}

mod common;

use axum::http::{Method, StatusCode};
use common::{create_comment, create_post, send, signup, spawn_app};
use serde_json::json;

#[tokio::test]
async fn only_the_owner_may_change_a_post() {
    let app = spawn_app();
    let alice = signup(&app.router, "alice").await;
    let bob = signup(&app.router, "bob").await;

    let post = create_post(&app.router, &alice, "Mine").await;
    let uri = format!("/posts/{}", post["id"]);

    let (status, body) = send(
        &app.router,
        Method::PATCH,
        &uri,
        Some(&bob.token),
        Some(json!({ "title": "Hijacked" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "You do not own this post");

    let (status, _) = send(&app.router, Method::DELETE, &uri, Some(&bob.token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, unchanged) = send(&app.router, Method::GET, &uri, Some(&bob.token), None).await;
    assert_eq!(unchanged["title"], "Mine");

    let (status, updated) = send(
        &app.router,
        Method::PATCH,
        &uri,
        Some(&alice.token),
        Some(json!({ "title": "Still mine" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Still mine");
    assert_eq!(updated["description"], "body text");
    assert_eq!(updated["user_id"], alice.id);

    let (status, _) = send(&app.router, Method::DELETE, &uri, Some(&alice.token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app.router, Method::GET, &uri, Some(&alice.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_resources_are_not_found_before_forbidden() {
    let app = spawn_app();
    let bob = signup(&app.router, "bob").await;

    for uri in ["/posts/9999", "/comments/9999", "/companies/9999"] {
        let (status, _) = send(
            &app.router,
            Method::PATCH,
            uri,
            Some(&bob.token),
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "PATCH {}", uri);

        let (status, _) = send(&app.router, Method::DELETE, uri, Some(&bob.token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "DELETE {}", uri);
    }
}

#[tokio::test]
async fn only_the_owner_may_change_a_comment() {
    let app = spawn_app();
    let alice = signup(&app.router, "alice").await;
    let bob = signup(&app.router, "bob").await;

    // Bob comments on Alice's post; the post owner gets no rights over it.
    let post = create_post(&app.router, &alice, "Open thread").await;
    let comment = create_comment(&app.router, &bob, post["id"].as_i64().unwrap(), "first").await;
    let uri = format!("/comments/{}", comment["id"]);

    let (status, _) = send(
        &app.router,
        Method::PUT,
        &uri,
        Some(&alice.token),
        Some(json!({ "message": "edited by alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app.router, Method::DELETE, &uri, Some(&alice.token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, updated) = send(
        &app.router,
        Method::PUT,
        &uri,
        Some(&bob.token),
        Some(json!({ "message": "edited" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["message"], "edited");
}

#[tokio::test]
async fn only_the_owner_may_change_a_company() {
    let app = spawn_app();
    let alice = signup(&app.router, "alice").await;
    let bob = signup(&app.router, "bob").await;

    let (status, company) = send(
        &app.router,
        Method::POST,
        "/companies",
        Some(&alice.token),
        Some(json!({ "name": "Acme", "industry": "Tools", "user_id": bob.id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(company["user_id"], alice.id);

    let uri = format!("/companies/{}", company["id"]);

    let (status, body) = send(
        &app.router,
        Method::PATCH,
        &uri,
        Some(&bob.token),
        Some(json!({ "name": "Bob's now" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "You do not own this company");

    let (status, updated) = send(
        &app.router,
        Method::PATCH,
        &uri,
        Some(&alice.token),
        Some(json!({ "industry": null, "headquarters": "Springfield" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Acme");
    assert_eq!(updated["industry"], serde_json::Value::Null);
    assert_eq!(updated["headquarters"], "Springfield");

    let (status, _) = send(&app.router, Method::DELETE, &uri, Some(&bob.token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app.router, Method::DELETE, &uri, Some(&alice.token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

//! End-to-end session flow through the HTTP router, in-memory stores.

mod common;

use axum::http::{Method, StatusCode};
use chirpy_core::auth::jwt::validate_access_token;
use serde_json::json;
use uuid::Uuid;

use common::{SECRET, app, login, register, send};

#[tokio::test]
async fn register_does_not_echo_password() {
    let (app, _) = app();
    let (status, json) = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({ "email": "saul@example.com", "password": "bettercall" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["email"], "saul@example.com");
    assert!(json.get("password").is_none());
    assert!(json.get("hashed_password").is_none());
}

#[tokio::test]
async fn overlong_password_is_rejected_not_truncated() {
    let (app, _) = app();
    let prefix = "a".repeat(72);
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({ "email": "saul@example.com", "password": format!("{prefix}first") })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    register(&app, "kim@example.com", &"a".repeat(71)).await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": "kim@example.com", "password": format!("{prefix}second") })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let (app, _) = app();
    register(&app, "saul@example.com", "bettercall").await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({ "email": "saul@example.com", "password": "other" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_returns_verifiable_access_and_usable_refresh() {
    let (app, _) = app();
    let user_id = register(&app, "walt@example.com", "hunter22").await;

    let (status, json) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": "walt@example.com", "password": "hunter22" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], user_id.as_str());
    assert_eq!(json["email"], "walt@example.com");

    let access = json["access_token"].as_str().unwrap();
    let verified = validate_access_token(access, SECRET.as_bytes()).unwrap();
    assert_eq!(verified.to_string(), user_id);

    let refresh = json["refresh_token"].as_str().unwrap();
    let (status, json) = send(&app, Method::POST, "/api/refresh", Some(refresh), None).await;
    assert_eq!(status, StatusCode::OK);
    let renewed = json["access_token"].as_str().unwrap();
    assert_eq!(
        validate_access_token(renewed, SECRET.as_bytes()).unwrap().to_string(),
        user_id
    );
}

#[tokio::test]
async fn wrong_password_and_unknown_email_get_the_same_answer() {
    let (app, _) = app();
    register(&app, "walt@example.com", "hunter22").await;

    let (wrong_status, wrong) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": "walt@example.com", "password": "nope" })),
    )
    .await;
    let (unknown_status, unknown) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": "gus@example.com", "password": "hunter22" })),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong, unknown);
    assert_eq!(wrong["message"], "Incorrect email or password");
    assert!(wrong.get("access_token").is_none());
    assert!(wrong.get("refresh_token").is_none());
}

#[tokio::test]
async fn blank_login_fields_are_a_bad_request() {
    let (app, _) = app();
    let (status, json) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": "", "password": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn refresh_is_reusable_until_revoked() {
    let (app, _) = app();
    register(&app, "walt@example.com", "hunter22").await;
    let (_, refresh) = login(&app, "walt@example.com", "hunter22").await;

    for _ in 0..3 {
        let (status, _) = send(&app, Method::POST, "/api/refresh", Some(&refresh), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, _) = send(&app, Method::POST, "/api/revoke", Some(&refresh), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, json) = send(&app, Method::POST, "/api/refresh", Some(&refresh), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "unauthorized");

    // Revoking again is not an error.
    let (status, _) = send(&app, Method::POST, "/api/revoke", Some(&refresh), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn refresh_and_revoke_need_a_bearer_header() {
    let (app, _) = app();
    let (status, _) = send(&app, Method::POST, "/api/refresh", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&app, Method::POST, "/api/revoke", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&app, Method::POST, "/api/revoke", Some("unknown"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_token_is_not_an_access_token() {
    let (app, _) = app();
    register(&app, "walt@example.com", "hunter22").await;
    let (_, refresh) = login(&app, "walt@example.com", "hunter22").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/chirps",
        Some(&refresh),
        Some(json!({ "body": "hello" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn update_user_changes_own_credentials() {
    let (app, _) = app();
    let user_id = register(&app, "walt@example.com", "hunter22").await;
    let (access, _) = login(&app, "walt@example.com", "hunter22").await;

    let (status, json) = send(
        &app,
        Method::PUT,
        "/api/users",
        Some(&access),
        Some(json!({ "email": "heisenberg@example.com", "password": "bluesky" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], user_id.as_str());
    assert_eq!(json["email"], "heisenberg@example.com");

    login(&app, "heisenberg@example.com", "bluesky").await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": "walt@example.com", "password": "hunter22" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn update_user_without_token_is_unauthorized() {
    let (app, _) = app();
    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/users",
        Some("not-a-token"),
        Some(json!({ "email": "x@example.com", "password": "y" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn delete_chirp_enforces_ownership() {
    let (app, _) = app();
    register(&app, "walt@example.com", "hunter22").await;
    register(&app, "jesse@example.com", "yeahscience").await;
    let (walt, _) = login(&app, "walt@example.com", "hunter22").await;
    let (jesse, _) = login(&app, "jesse@example.com", "yeahscience").await;

    let (status, chirp) = send(
        &app,
        Method::POST,
        "/api/chirps",
        Some(&walt),
        Some(json!({ "body": "Say my name" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/chirps/{}", chirp["id"].as_str().unwrap());

    let (status, json) = send(&app, Method::DELETE, &uri, Some(&jesse), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"], "forbidden");

    // Reads are open to anyone, even without a token.
    let (status, json) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["body"], "Say my name");

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&walt), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_missing_chirp_is_not_found() {
    let (app, _) = app();
    register(&app, "walt@example.com", "hunter22").await;
    let (walt, _) = login(&app, "walt@example.com", "hunter22").await;

    let uri = format!("/api/chirps/{}", Uuid::new_v4());
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&walt), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

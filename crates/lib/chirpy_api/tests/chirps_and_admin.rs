//! Chirp posting rules, listing, and the admin hit counter.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{app, login, register, send};

#[tokio::test]
async fn posted_chirps_are_cleaned_and_listed_oldest_first() {
    let (app, _) = app();
    let walt_id = register(&app, "walt@example.com", "hunter22").await;
    let jesse_id = register(&app, "jesse@example.com", "yeahscience").await;
    let (walt, _) = login(&app, "walt@example.com", "hunter22").await;
    let (jesse, _) = login(&app, "jesse@example.com", "yeahscience").await;

    let (status, json) = send(
        &app,
        Method::POST,
        "/api/chirps",
        Some(&walt),
        Some(json!({ "body": "What a Kerfuffle today" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["body"], "What a **** today");
    assert_eq!(json["user_id"], walt_id.as_str());

    send(
        &app,
        Method::POST,
        "/api/chirps",
        Some(&jesse),
        Some(json!({ "body": "Yeah science" })),
    )
    .await;

    let (status, json) = send(&app, Method::GET, "/api/chirps", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let bodies: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["body"].as_str().unwrap())
        .collect();
    assert_eq!(bodies, vec!["What a **** today", "Yeah science"]);

    let uri = format!("/api/chirps?author_id={jesse_id}");
    let (_, json) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["user_id"], jesse_id.as_str());
}

#[tokio::test]
async fn long_chirps_are_rejected() {
    let (app, _) = app();
    register(&app, "walt@example.com", "hunter22").await;
    let (walt, _) = login(&app, "walt@example.com", "hunter22").await;

    let (status, json) = send(
        &app,
        Method::POST,
        "/api/chirps",
        Some(&walt),
        Some(json!({ "body": "x".repeat(141) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Chirp is too long");
}

#[tokio::test]
async fn posting_requires_a_token() {
    let (app, _) = app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/chirps",
        None,
        Some(json!({ "body": "anonymous" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn validate_chirp_masks_profanity() {
    let (app, _) = app();
    let (status, json) = send(
        &app,
        Method::POST,
        "/api/validate_chirp",
        None,
        Some(json!({ "body": "sharbert is fornax" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cleaned_body"], "**** is ****");
}

#[tokio::test]
async fn healthz_is_ok() {
    let (app, _) = app();
    let (status, _) = send(&app, Method::GET, "/api/healthz", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn app_hits_are_counted_and_reset() {
    let (app, state) = app();
    send(&app, Method::GET, "/app/", None, None).await;
    send(&app, Method::GET, "/app/missing.txt", None, None).await;
    assert_eq!(state.hits.get(), 2);

    // Admin endpoints are not counted.
    let (status, _) = send(&app, Method::GET, "/admin/metrics", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.hits.get(), 2);

    let (status, _) = send(&app, Method::POST, "/admin/reset", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.hits.get(), 0);
}

//! Shared helpers: an in-memory app and a one-shot request driver.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chirpy_api::{AppState, config::ApiConfig};
use serde_json::Value;
use tower::ServiceExt;

pub const SECRET: &str = "integration-secret";

pub fn test_config() -> ApiConfig {
    ApiConfig {
        bind_addr: "127.0.0.1:0".into(),
        pg_connection_url: String::new(),
        jwt_secret: SECRET.into(),
        filepath_root: ".".into(),
    }
}

pub fn app() -> (Router, AppState) {
    let state = AppState::in_memory(test_config());
    (chirpy_api::router(state.clone()), state)
}

/// Send one request and return the status and parsed JSON body (`Null` if empty
/// or not JSON).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.expect("request");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Register a user, returning its id.
pub async fn register(app: &Router, email: &str, password: &str) -> String {
    let (status, json) = send(
        app,
        Method::POST,
        "/api/users",
        None,
        Some(serde_json::json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {json}");
    json["id"].as_str().expect("id").to_string()
}

/// Log in, returning `(access_token, refresh_token)`.
pub async fn login(app: &Router, email: &str, password: &str) -> (String, String) {
    let (status, json) = send(
        app,
        Method::POST,
        "/api/login",
        None,
        Some(serde_json::json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {json}");
    (
        json["access_token"].as_str().expect("access_token").to_string(),
        json["refresh_token"].as_str().expect("refresh_token").to_string(),
    )
}

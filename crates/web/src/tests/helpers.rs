use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::Value;
use storage::Database;
use tower::util::ServiceExt;

use crate::middleware::auth::ApiKeys;
use crate::routes;

pub fn test_app(api_keys: &str) -> Router {
    test_app_with(Database::in_memory(), api_keys)
}

pub fn test_app_with(db: Database, api_keys: &str) -> Router {
    routes::router(db, ApiKeys::from_comma_separated(api_keys))
}

/// Sends one request and returns the status plus the JSON body
/// (`Value::Null` when the body is empty or not JSON).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

pub async fn create(app: &Router, body: Value) -> Value {
    let (status, json) = send(app, "POST", "/api/athletes", Some(body), None).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", json);
    json
}

pub async fn list(app: &Router) -> Vec<Value> {
    let (status, json) = send(app, "GET", "/api/athletes", None, None).await;
    assert_eq!(status, StatusCode::OK);
    json.as_array().cloned().expect("athlete list should be an array")
}

/// Sends a raw body as-is, optionally without a content type.
pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    body: &str,
    content_type: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }

    let request = builder.body(Body::from(body.to_string())).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

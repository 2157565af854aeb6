use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::Value;
use server::auth::jwt::JwtKeys;
use server::state::AppState;
use shared_types::{FeatureFlags, ServerSettings, UserRole};
use tower::ServiceExt;

/// Signing secret shared by the test router and the tokens it accepts.
pub const TEST_SECRET: &[u8] = b"permitflow-test-secret";

fn keys() -> JwtKeys {
    JwtKeys::from_secret(TEST_SECRET)
}

/// Build a test router over freshly seeded collections.
/// Every call gets its own store, so tests never see each other's commands.
pub fn test_app() -> Router {
    build(FeatureFlags::default(), ServerSettings::default())
}

/// Build a test router with a very tight rate limit for testing 429 responses.
pub fn test_app_rate_limited(max_requests: u32) -> Router {
    let flags = FeatureFlags {
        rate_limit: true,
        ..FeatureFlags::default()
    };
    let settings = ServerSettings {
        max_requests_per_minute: max_requests,
        ..ServerSettings::default()
    };
    build(flags, settings)
}

fn build(flags: FeatureFlags, settings: ServerSettings) -> Router {
    server::openapi::api_router(AppState::seeded(keys()), &flags, &settings)
}

/// A valid bearer token for `role`.
pub fn token(role: UserRole) -> String {
    keys()
        .issue(
            &format!("test-{}", role.as_str()),
            "Test User",
            role,
            Some("Petroleum Commission"),
            chrono::Duration::hours(1),
        )
        .unwrap()
}

/// GET a route anonymously.
pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, req).await
}

/// GET a route with a bearer token.
pub async fn get_with_token(app: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    send(app, req).await
}

/// POST JSON with a bearer token.
pub async fn post_json_with_token(
    app: &Router,
    uri: &str,
    body: &str,
    token: &str,
) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, req).await
}

/// POST JSON WITHOUT a token (for testing missing identity).
pub async fn post_json(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, req).await
}

/// Send a request through the router and parse the response.
pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, _, body_bytes) = send_raw(app, req).await;

    let body: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&body_bytes).to_string(),
        ))
    };

    (status, body)
}

/// Send a request and return raw bytes + status + headers (for non-JSON responses like CSV).
pub async fn send_raw(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(req)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    (status, headers, body_bytes.to_vec())
}

/// Ids of the records in a paginated list body.
pub fn ids(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .map(|rows| {
            rows.iter()
                .filter_map(|r| r["id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

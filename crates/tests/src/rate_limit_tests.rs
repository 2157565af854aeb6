use axum::body::Body;
use axum::http::{Request, StatusCode};
use shared_types::UserRole;

use crate::common::{self, get_with_token, send, token};

fn from_ip(uri: &str, ip: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-forwarded-for", ip)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_rate_limit_returns_429_when_exceeded() {
    // Allow only 2 requests per 60s window
    let app = common::test_app_rate_limited(2);

    let (s1, _) = send(&app, from_ip("/api/applications", "10.0.0.1")).await;
    assert_eq!(s1, StatusCode::OK, "First request should pass");

    let (s2, _) = send(&app, from_ip("/api/payments", "10.0.0.1")).await;
    assert_eq!(s2, StatusCode::OK, "Second request should pass");

    let (s3, body) = send(&app, from_ip("/api/visas", "10.0.0.1")).await;
    assert_eq!(s3, StatusCode::TOO_MANY_REQUESTS, "Third request should be rate limited");
    assert_eq!(body["kind"], "RateLimited");
}

#[tokio::test]
async fn test_rate_limit_separate_keys() {
    let app = common::test_app_rate_limited(1);

    let (s1, _) = send(&app, from_ip("/api/applications", "10.0.0.1")).await;
    assert_eq!(s1, StatusCode::OK);

    let (s2, _) = send(&app, from_ip("/api/applications", "10.0.0.2")).await;
    assert_eq!(s2, StatusCode::OK);

    let (s3, _) = send(&app, from_ip("/api/applications", "10.0.0.1")).await;
    assert_eq!(s3, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_rate_limit_keys_by_token_subject() {
    let app = common::test_app_rate_limited(1);

    let (s1, _) = get_with_token(&app, "/api/session", &token(UserRole::Officer)).await;
    assert_eq!(s1, StatusCode::OK);

    let (s2, _) = get_with_token(&app, "/api/session", &token(UserRole::Finance)).await;
    assert_eq!(s2, StatusCode::OK);

    let (s3, _) = get_with_token(&app, "/api/session", &token(UserRole::Officer)).await;
    assert_eq!(s3, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_health_is_not_rate_limited() {
    let app = common::test_app_rate_limited(1);
    for _ in 0..3 {
        let (status, _) = common::get(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
    }
}

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use shared_types::UserRole;

use crate::common::{get, get_with_token, test_app, token};

#[tokio::test]
async fn session_reports_identity_and_dashboard() {
    let app = test_app();
    let (status, body) = get_with_token(&app, "/api/session", &token(UserRole::Finance)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subject"], "test-finance");
    assert_eq!(body["role"], "finance");
    assert_eq!(body["organization"], "Petroleum Commission");
    assert_eq!(body["dashboard"], "/finance/dashboard");
}

#[tokio::test]
async fn every_role_lands_on_its_own_dashboard() {
    let app = test_app();
    for role in UserRole::ALL {
        let (_, body) = get_with_token(&app, "/api/session", &token(role)).await;
        assert_eq!(body["dashboard"], shared_types::route_for(role), "{role:?}");
    }
}

#[tokio::test]
async fn anonymous_session_is_unauthorized() {
    let app = test_app();
    let (status, body) = get(&app, "/api/session").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "Unauthorized");
}

#[tokio::test]
async fn token_signed_with_another_secret_is_ignored() {
    let app = test_app();
    let foreign = server::auth::jwt::JwtKeys::from_secret(b"someone-else")
        .issue("intruder", "Intruder", UserRole::Admin, None, chrono::Duration::hours(1))
        .unwrap();
    let (status, _) = get_with_token(&app, "/api/session", &foreign).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

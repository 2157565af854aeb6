use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{get, test_app};

#[tokio::test]
async fn health_reports_record_counts() {
    let app = test_app();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["records"]["applications"], 5);
    assert_eq!(body["records"]["local-content-plans"], 4);
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn docs_are_served() {
    let app = test_app();
    let (status, _) = get(&app, "/docs").await;
    assert_eq!(status, StatusCode::OK);
}

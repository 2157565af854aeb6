use axum::http::StatusCode;

use crate::common::{get, test_app};

#[tokio::test]
async fn get_returns_the_record() {
    let app = test_app();
    let (status, body) = get(&app, "/api/visas/VISA-2024-002").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "VISA-2024-002");
    assert_eq!(body["status"], "Approved");
}

#[tokio::test]
async fn get_missing_returns_404() {
    let app = test_app();
    let (status, body) = get(&app, "/api/applications/APP-1999-999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "NotFound");
}

#[tokio::test]
async fn ids_are_scoped_to_their_collection() {
    let app = test_app();
    let (status, _) = get(&app, "/api/payments/APP-2024-001").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unscored_inspection_omits_score() {
    let app = test_app();
    let (status, body) = get(&app, "/api/inspections/INS-2024-004").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["score"].is_null());
}

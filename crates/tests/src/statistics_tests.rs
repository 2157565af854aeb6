use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{get, test_app};

#[tokio::test]
async fn payment_statistics_cover_the_whole_collection() {
    let app = test_app();
    let (status, body) = get(&app, "/api/payments/statistics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);
    assert_eq!(body["by_status"]["Paid"], 2);
    assert_eq!(body["by_status"]["Overdue"], 1);
    assert_eq!(body["numeric_total"], 727_500.0);
}

#[tokio::test]
async fn statistics_follow_the_filter() {
    let app = test_app();
    let (_, body) = get(&app, "/api/applications/statistics?location=Takoradi").await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["by_status"]["Pending"], 1);
    assert_eq!(body["by_status"]["Under Review"], 1);
    assert_eq!(body["numeric_total"], 5_900_000.0);
}

#[tokio::test]
async fn types_without_a_numeric_field_omit_the_total() {
    let app = test_app();
    let (_, body) = get(&app, "/api/notifications/statistics").await;
    assert_eq!(body["total"], 4);
    assert!(body.get("numeric_total").is_none());
}

#[tokio::test]
async fn statistics_is_not_treated_as_an_id() {
    let app = test_app();
    let (status, body) = get(&app, "/api/visas/statistics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("total").is_some());
}

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{get, ids, test_app};

#[tokio::test]
async fn every_collection_lists() {
    let app = test_app();
    for segment in [
        "applications",
        "payments",
        "local-content-plans",
        "inspections",
        "visas",
        "notifications",
    ] {
        let (status, body) = get(&app, &format!("/api/{segment}")).await;
        assert_eq!(status, StatusCode::OK, "{segment}");
        assert!(body["meta"]["total"].as_i64().unwrap_or(0) > 0, "{segment} is empty");
    }
}

#[tokio::test]
async fn pagination_is_applied_after_filtering() {
    let app = test_app();
    let (_, body) = get(&app, "/api/applications?page=2&limit=2").await;
    assert_eq!(ids(&body), vec!["APP-2024-003", "APP-2024-004"]);
    assert_eq!(body["meta"]["total"], 5);
    assert_eq!(body["meta"]["total_pages"], 3);
    assert_eq!(body["meta"]["has_next"], true);
    assert_eq!(body["meta"]["has_prev"], true);
}

#[tokio::test]
async fn out_of_range_pagination_is_clamped() {
    let app = test_app();
    let (_, body) = get(&app, "/api/applications?page=0&limit=1000").await;
    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["meta"]["limit"], 100);
}

#[tokio::test]
async fn page_far_past_the_end_is_empty() {
    let app = test_app();
    let (status, body) = get(&app, "/api/applications?page=9223372036854775807").await;
    assert_eq!(status, StatusCode::OK);
    assert!(ids(&body).is_empty());
    assert_eq!(body["meta"]["total"], 5);
    assert_eq!(body["meta"]["has_next"], false);
}

#[tokio::test]
async fn payment_amount_and_status() {
    let app = test_app();
    let (_, body) = get(&app, "/api/payments?status=Paid&minAmount=100000").await;
    assert_eq!(ids(&body), vec!["PAY-2024-001"]);
}

#[tokio::test]
async fn unpaid_payments_never_match_a_paid_date_range() {
    let app = test_app();
    let (_, body) = get(&app, "/api/payments?paidFrom=2024-01-01").await;
    assert_eq!(ids(&body), vec!["PAY-2024-001", "PAY-2024-005"]);
}

#[tokio::test]
async fn unscored_inspections_never_match_a_score_range() {
    let app = test_app();
    let (_, body) = get(&app, "/api/inspections?minScore=0").await;
    assert_eq!(ids(&body), vec!["INS-2024-001", "INS-2024-002"]);

    let (_, body) = get(&app, "/api/inspections?max_score=60").await;
    assert_eq!(ids(&body), vec!["INS-2024-002"]);
}

#[tokio::test]
async fn notification_search_covers_message_text() {
    let app = test_app();
    let (_, body) = get(&app, "/api/notifications?searchTerm=takoradi").await;
    assert_eq!(ids(&body), vec!["NOT-2024-003"]);
}

#[tokio::test]
async fn visa_nationality_filter() {
    let app = test_app();
    let (_, body) = get(&app, "/api/visas?nationality=French").await;
    assert_eq!(ids(&body), vec!["VISA-2023-014"]);
}

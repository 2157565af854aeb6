use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{get, ids, test_app};

#[tokio::test]
async fn no_criteria_returns_everything_in_seed_order() {
    let app = test_app();
    let (status, body) = get(&app, "/api/applications").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        ids(&body),
        vec!["APP-2024-001", "APP-2024-002", "APP-2024-003", "APP-2024-004", "APP-2024-005"]
    );
    assert_eq!(body["meta"]["total"], 5);
    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["meta"]["limit"], 20);
}

#[tokio::test]
async fn status_filter_finds_the_approved_application() {
    let app = test_app();
    let (status, body) = get(&app, "/api/applications?status=Approved").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["APP-2024-003"]);
    assert_eq!(body["data"][0]["company_name"], "Offshore Dynamics");
}

#[tokio::test]
async fn search_term_accepts_camel_case_key() {
    let app = test_app();
    let (_, body) = get(&app, "/api/applications?searchTerm=global").await;
    assert_eq!(ids(&body), vec!["APP-2024-002"]);

    let (_, body) = get(&app, "/api/applications?search_term=GLOBAL").await;
    assert_eq!(ids(&body), vec!["APP-2024-002"]);
}

#[tokio::test]
async fn value_range_is_inclusive() {
    let app = test_app();
    let (_, body) = get(&app, "/api/applications?minValue=2500000&maxValue=3400000").await;
    assert_eq!(ids(&body), vec!["APP-2024-001", "APP-2024-004"]);
}

#[tokio::test]
async fn all_sentinel_and_blank_values_impose_nothing() {
    let app = test_app();
    let (_, body) = get(&app, "/api/applications?status=all&priority=&location=Takoradi").await;
    assert_eq!(ids(&body), vec!["APP-2024-001", "APP-2024-004"]);
}

#[tokio::test]
async fn date_range_combines_with_other_criteria() {
    let app = test_app();
    let (_, body) = get(
        &app,
        "/api/applications?dateFrom=2024-02-01&dateTo=2024-03-10&status=Pending",
    )
    .await;
    assert_eq!(ids(&body), vec!["APP-2024-002", "APP-2024-004"]);
}

#[tokio::test]
async fn unparseable_bounds_are_ignored() {
    let app = test_app();
    let (status, body) = get(&app, "/api/applications?dateFrom=soon&minValue=lots").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 5);
}

#[tokio::test]
async fn unknown_keys_are_ignored() {
    let app = test_app();
    let (_, body) = get(&app, "/api/applications?colour=blue").await;
    assert_eq!(body["meta"]["total"], 5);
}

#[tokio::test]
async fn no_match_is_an_empty_page() {
    let app = test_app();
    let (status, body) = get(&app, "/api/applications?searchTerm=nonexistent").await;
    assert_eq!(status, StatusCode::OK);
    assert!(ids(&body).is_empty());
    assert_eq!(body["meta"]["total"], 0);
}

#[tokio::test]
async fn value_range_excludes_values_below_the_minimum() {
    let app = test_app();
    let (_, body) = get(&app, "/api/applications?minValue=2000000&maxValue=3000000").await;
    assert_eq!(ids(&body), vec!["APP-2024-001"]);
    assert_eq!(body["data"][0]["company_name"], "TechDrill Solutions Ltd");
}

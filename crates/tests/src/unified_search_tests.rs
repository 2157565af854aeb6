use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use pretty_assertions::assert_eq;

use crate::common::{get, send_raw, test_app};

#[tokio::test]
async fn search_spans_collections_with_facets() {
    let app = test_app();
    let (status, body) = get(&app, "/api/search?q=tullow").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);

    let facets: Vec<(String, i64)> = body["facets"]["by_entity_type"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| {
            (
                f["entity_type"].as_str().unwrap_or_default().to_string(),
                f["count"].as_i64().unwrap_or_default(),
            )
        })
        .collect();
    assert_eq!(facets.len(), 5);
    assert!(facets.iter().all(|(_, n)| *n == 1));

    assert_eq!(body["results"][0]["id"], "APP-2024-004");
    assert_eq!(body["results"][0]["url"], "/applications/APP-2024-004");
}

#[tokio::test]
async fn entity_types_restrict_the_search() {
    let app = test_app();
    let (_, body) = get(&app, "/api/search?q=tullow&entity_types=visa,notification").await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["results"][0]["id"], "VISA-2024-001");
    assert_eq!(body["results"][1]["id"], "NOT-2024-001");
}

#[tokio::test]
async fn search_paginates() {
    let app = test_app();
    let (_, body) = get(&app, "/api/search?q=tullow&page=3&per_page=2").await;
    assert_eq!(body["total"], 5);
    assert_eq!(body["results"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn empty_query_is_a_bad_request() {
    let app = test_app();
    let (status, body) = get(&app, "/api/search?q=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "BadRequest");
}

#[tokio::test]
async fn export_returns_csv() {
    let app = test_app();
    let req = Request::builder()
        .uri("/api/search/export?q=tullow&entity_types=application")
        .body(Body::empty())
        .unwrap();
    let (status, headers, bytes) = send_raw(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/csv; charset=utf-8");

    let csv = String::from_utf8(bytes).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("ID,Entity Type,Title,Subtitle,Status"));
    let row = lines.next().unwrap();
    assert!(row.starts_with("APP-2024-004,application,"), "{row}");
    assert!(row.ends_with(",Pending"), "{row}");
    assert_eq!(lines.next(), None);
}

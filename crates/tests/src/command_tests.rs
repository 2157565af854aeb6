use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use shared_types::UserRole;

use crate::common::{get, post_json, post_json_with_token, test_app, token};

const APPROVE: &str = r#"{"action":"approve","notes":"Conditions met"}"#;

#[tokio::test]
async fn commands_require_identity() {
    let app = test_app();
    let (status, body) = post_json(&app, "/api/applications/APP-2024-002/commands", APPROVE).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "Unauthorized");
}

#[tokio::test]
async fn invalid_token_is_treated_as_anonymous() {
    let app = test_app();
    let (status, _) = post_json_with_token(
        &app,
        "/api/applications/APP-2024-002/commands",
        APPROVE,
        "not-a-jwt",
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn operator_may_not_approve() {
    let app = test_app();
    let (status, body) = post_json_with_token(
        &app,
        "/api/applications/APP-2024-002/commands",
        APPROVE,
        &token(UserRole::Operator),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["kind"], "Forbidden");
}

#[tokio::test]
async fn officer_approves_pending_application() {
    let app = test_app();
    let (status, body) = post_json_with_token(
        &app,
        "/api/applications/APP-2024-002/commands",
        APPROVE,
        &token(UserRole::Officer),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["action"], "approve");
    assert_eq!(body["previous_status"], "Pending");
    assert_eq!(body["status"], "Approved");
    assert_eq!(body["record"]["decision_notes"], "Conditions met");

    // The change is visible to later reads.
    let (_, body) = get(&app, "/api/applications/APP-2024-002").await;
    assert_eq!(body["status"], "Approved");
}

#[tokio::test]
async fn empty_reject_reason_is_unprocessable() {
    let app = test_app();
    let (status, body) = post_json_with_token(
        &app,
        "/api/applications/APP-2024-001/commands",
        r#"{"action":"reject","reason":""}"#,
        &token(UserRole::Officer),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "ValidationError");
    assert!(body["field_errors"]["reason"].is_string());
}

#[tokio::test]
async fn deciding_a_decided_application_conflicts() {
    let app = test_app();
    let (status, body) = post_json_with_token(
        &app,
        "/api/applications/APP-2024-003/commands",
        r#"{"action":"reject","reason":"Late objection"}"#,
        &token(UserRole::Admin),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "Conflict");
}

#[tokio::test]
async fn unsupported_action_is_a_bad_request() {
    let app = test_app();
    let (status, body) = post_json_with_token(
        &app,
        "/api/applications/APP-2024-002/commands",
        r#"{"action":"mark_read"}"#,
        &token(UserRole::Officer),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "BadRequest");
}

#[tokio::test]
async fn missing_record_is_not_found() {
    let app = test_app();
    let (status, _) = post_json_with_token(
        &app,
        "/api/visas/VISA-1999-001/commands",
        APPROVE,
        &token(UserRole::Immigration),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn operator_withdraws_application() {
    let app = test_app();
    let (status, body) = post_json_with_token(
        &app,
        "/api/applications/APP-2024-004/commands",
        r#"{"action":"withdraw"}"#,
        &token(UserRole::Operator),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Withdrawn");
}

#[tokio::test]
async fn finance_marks_overdue_payment_paid() {
    let app = test_app();
    let (status, body) = post_json_with_token(
        &app,
        "/api/payments/PAY-2024-003/commands",
        r#"{"action":"mark_paid","reference":"GCB-771204"}"#,
        &token(UserRole::Finance),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["previous_status"], "Overdue");
    assert_eq!(body["record"]["reference"], "GCB-771204");
    assert!(body["record"]["paid_date"].is_string());
}

#[tokio::test]
async fn officer_may_not_mark_payments_paid() {
    let app = test_app();
    let (status, _) = post_json_with_token(
        &app,
        "/api/payments/PAY-2024-002/commands",
        r#"{"action":"mark_paid","reference":"GCB-1"}"#,
        &token(UserRole::Officer),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn compliance_approves_submitted_plan() {
    let app = test_app();
    let (status, body) = post_json_with_token(
        &app,
        "/api/local-content-plans/LCP-2024-002/commands",
        r#"{"action":"approve"}"#,
        &token(UserRole::Compliance),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["previous_status"], "Submitted");
    assert_eq!(body["status"], "Approved");
}

#[tokio::test]
async fn draft_plan_cannot_be_decided() {
    let app = test_app();
    let (status, _) = post_json_with_token(
        &app,
        "/api/local-content-plans/LCP-2024-004/commands",
        r#"{"action":"approve"}"#,
        &token(UserRole::Compliance),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn immigration_rejects_pending_visa() {
    let app = test_app();
    let (status, body) = post_json_with_token(
        &app,
        "/api/visas/VISA-2024-003/commands",
        r#"{"action":"reject","reason":"Position can be filled locally"}"#,
        &token(UserRole::Immigration),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Rejected");
    assert_eq!(body["record"]["decision_notes"], "Position can be filled locally");
}

#[tokio::test]
async fn any_role_reads_and_archives_notifications() {
    let app = test_app();
    let operator = token(UserRole::Operator);

    let (status, body) = post_json_with_token(
        &app,
        "/api/notifications/NOT-2024-001/commands",
        r#"{"action":"mark_read"}"#,
        &operator,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Read");

    let (status, _) = post_json_with_token(
        &app,
        "/api/notifications/NOT-2024-001/commands",
        r#"{"action":"mark_read"}"#,
        &operator,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = post_json_with_token(
        &app,
        "/api/notifications/NOT-2024-001/commands",
        r#"{"action":"archive"}"#,
        &operator,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Archived");
}

#[tokio::test]
async fn inspections_take_no_commands() {
    let app = test_app();
    let (status, _) = post_json_with_token(
        &app,
        "/api/inspections/INS-2024-001/commands",
        APPROVE,
        &token(UserRole::Admin),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

pub mod applications;
pub mod inspections;
pub mod local_content_plans;
pub mod notifications;
pub mod payments;
pub mod records;
pub mod session;
pub mod unified_search;
pub mod visas;

use axum::{routing::{get, post}, Router};
use crate::state::AppState;

/// Build the combined REST API router.
///
/// `/statistics` is registered next to `/{id}`; axum prefers the static
/// segment, so no record id can shadow it.
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Session
        .route("/api/session", get(session::current_session))
        // Unified search
        .route("/api/search", get(unified_search::unified_search))
        .route("/api/search/export", get(unified_search::export_search))
        // Applications
        .route("/api/applications", get(applications::list_applications))
        .route("/api/applications/statistics", get(applications::application_statistics))
        .route("/api/applications/{id}", get(applications::get_application))
        .route("/api/applications/{id}/commands", post(applications::application_command))
        // Payments
        .route("/api/payments", get(payments::list_payments))
        .route("/api/payments/statistics", get(payments::payment_statistics))
        .route("/api/payments/{id}", get(payments::get_payment))
        .route("/api/payments/{id}/commands", post(payments::payment_command))
        // Local content plans
        .route("/api/local-content-plans", get(local_content_plans::list_local_content_plans))
        .route("/api/local-content-plans/statistics", get(local_content_plans::local_content_statistics))
        .route("/api/local-content-plans/{id}", get(local_content_plans::get_local_content_plan))
        .route("/api/local-content-plans/{id}/commands", post(local_content_plans::local_content_command))
        // Inspections (read-only)
        .route("/api/inspections", get(inspections::list_inspections))
        .route("/api/inspections/statistics", get(inspections::inspection_statistics))
        .route("/api/inspections/{id}", get(inspections::get_inspection))
        // Visas
        .route("/api/visas", get(visas::list_visas))
        .route("/api/visas/statistics", get(visas::visa_statistics))
        .route("/api/visas/{id}", get(visas::get_visa))
        .route("/api/visas/{id}/commands", post(visas::visa_command))
        // Notifications
        .route("/api/notifications", get(notifications::list_notifications))
        .route("/api/notifications/statistics", get(notifications::notification_statistics))
        .route("/api/notifications/{id}", get(notifications::get_notification))
        .route("/api/notifications/{id}/commands", post(notifications::notification_command))
}

/// Build the REST API router with rate limiting applied.
pub fn api_router_with_rate_limit(
    rate_limit: crate::rate_limit::RateLimitState,
) -> Router<AppState> {
    api_router().layer(axum::middleware::from_fn_with_state(
        rate_limit,
        crate::rate_limit::rate_limit_middleware,
    ))
}

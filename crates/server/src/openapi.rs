use axum::Router;
use shared_types::{
    // Shared
    AppError, AppErrorKind, EntityKind, PaginationMeta, Priority,
    RecordStatistics, SessionResponse, UserRole,
    // Commands
    ApproveCommand, MarkPaidCommand, RecordCommand, RejectCommand,
    // Applications
    Application, ApplicationStatus, LicenseType,
    // Payments
    Payment, PaymentCategory, PaymentStatus,
    // Local content
    LocalContentPlan, PlanCategory, PlanStatus,
    // Inspections
    InspectionReport, InspectionStatus, InspectionType,
    // Visas
    ExpatriateVisa, VisaStatus, VisaType,
    // Notifications
    Notification, NotificationCategory, NotificationStatus,
    // Search
    FacetCount, SearchFacets, UnifiedSearchResponse, UnifiedSearchResult,
    // Config
    FeatureFlags, ServerSettings,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable};

use crate::auth::middleware::auth_middleware;
use crate::health;
use crate::rate_limit::RateLimitState;
use crate::rest;
use crate::state::AppState;
use crate::telemetry::OtelTraceLayer;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Session
        rest::session::current_session,
        // Search
        rest::unified_search::unified_search,
        rest::unified_search::export_search,
        // Applications
        rest::applications::list_applications,
        rest::applications::application_statistics,
        rest::applications::get_application,
        rest::applications::application_command,
        // Payments
        rest::payments::list_payments,
        rest::payments::payment_statistics,
        rest::payments::get_payment,
        rest::payments::payment_command,
        // Local content plans
        rest::local_content_plans::list_local_content_plans,
        rest::local_content_plans::local_content_statistics,
        rest::local_content_plans::get_local_content_plan,
        rest::local_content_plans::local_content_command,
        // Inspections
        rest::inspections::list_inspections,
        rest::inspections::inspection_statistics,
        rest::inspections::get_inspection,
        // Visas
        rest::visas::list_visas,
        rest::visas::visa_statistics,
        rest::visas::get_visa,
        rest::visas::visa_command,
        // Notifications
        rest::notifications::list_notifications,
        rest::notifications::notification_statistics,
        rest::notifications::get_notification,
        rest::notifications::notification_command,
        // Health
        health::health_check,
    ),
    components(schemas(
        AppError, AppErrorKind, EntityKind, PaginationMeta, Priority,
        RecordStatistics, SessionResponse, UserRole,
        ApproveCommand, MarkPaidCommand, RecordCommand, RejectCommand,
        Application, ApplicationStatus, LicenseType,
        Payment, PaymentCategory, PaymentStatus,
        LocalContentPlan, PlanCategory, PlanStatus,
        InspectionReport, InspectionStatus, InspectionType,
        ExpatriateVisa, VisaStatus, VisaType,
        Notification, NotificationCategory, NotificationStatus,
        FacetCount, SearchFacets, UnifiedSearchResponse, UnifiedSearchResult,
        health::HealthResponse,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "session", description = "Identity of the signed-in user"),
        (name = "search", description = "Text search across every record type"),
        (name = "applications", description = "Licence and permit applications"),
        (name = "payments", description = "Fees and payment tracking"),
        (name = "local-content", description = "Local content plan review"),
        (name = "inspections", description = "Facility inspection reports"),
        (name = "visas", description = "Expatriate visa and work permit requests"),
        (name = "notifications", description = "User notifications"),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "Permitflow API",
        description = "Multi-role permitting and compliance administration API",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Registers the `bearer` scheme the command and session endpoints refer to.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Build an Axum router that serves the API docs at `/docs`, the REST
/// API at `/api/*`, and `/health`.
///
/// Bearer tokens are verified for every route. The rate limit covers
/// `/api/*` only; request spans see the verified identity.
pub fn api_router(state: AppState, flags: &FeatureFlags, settings: &ServerSettings) -> Router {
    let api = if flags.rate_limit {
        rest::api_router_with_rate_limit(RateLimitState::per_minute(
            settings.max_requests_per_minute,
        ))
    } else {
        rest::api_router()
    };

    let mut router = Router::new()
        .merge(api)
        .route("/health", axum::routing::get(health::health_check));

    if flags.telemetry {
        router = router.layer(OtelTraceLayer);
    }

    router
        .layer(axum::middleware::from_fn_with_state(
            state.keys.clone(),
            auth_middleware,
        ))
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}

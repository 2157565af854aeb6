use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;

use shared_types::{
    AppError, Application, CommandResult, PaginatedResponse, RecordCommand, RecordStatistics,
};

use super::records::ListQuery;
use crate::auth::extractors::AuthRequired;
use crate::repo::records;
use crate::store::RecordStore;

/// GET /api/applications
#[utoipa::path(
    get,
    path = "/api/applications",
    params(
        ("search_term" = Option<String>, Query, description = "Matches id, company or applicant"),
        ("status" = Option<String>, Query, description = "Exact status label, or `all`"),
        ("license_type" = Option<String>, Query, description = "Exact licence type"),
        ("priority" = Option<String>, Query, description = "Low, Medium or High"),
        ("location" = Option<String>, Query, description = "Exact location"),
        ("date_from" = Option<String>, Query, description = "Submitted on or after (YYYY-MM-DD)"),
        ("date_to" = Option<String>, Query, description = "Submitted on or before (YYYY-MM-DD)"),
        ("min_value" = Option<String>, Query, description = "Minimum licence value"),
        ("max_value" = Option<String>, Query, description = "Maximum licence value"),
        ("page" = Option<i64>, Query, description = "Page number (default 1)"),
        ("limit" = Option<i64>, Query, description = "Page size (default 20, max 100)")
    ),
    responses(
        (status = 200, description = "Matching applications", body = PaginatedResponse<Application>)
    ),
    tag = "applications"
)]
pub async fn list_applications(
    State(store): State<Arc<RecordStore>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<PaginatedResponse<Application>>, AppError> {
    let query = ListQuery::from(params);
    records::list(&store, &query.criteria, query.page, query.limit).map(Json)
}

/// GET /api/applications/statistics
#[utoipa::path(
    get,
    path = "/api/applications/statistics",
    params(
        ("search_term" = Option<String>, Query, description = "Same criteria as the list endpoint")
    ),
    responses(
        (status = 200, description = "Counts over matching applications", body = RecordStatistics)
    ),
    tag = "applications"
)]
pub async fn application_statistics(
    State(store): State<Arc<RecordStore>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<RecordStatistics>, AppError> {
    let query = ListQuery::from(params);
    records::statistics::<Application>(&store, &query.criteria).map(Json)
}

/// GET /api/applications/{id}
#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    params(("id" = String, Path, description = "Application id, e.g. APP-2024-001")),
    responses(
        (status = 200, description = "Application found", body = Application),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "applications"
)]
pub async fn get_application(
    State(store): State<Arc<RecordStore>>,
    Path(id): Path<String>,
) -> Result<Json<Application>, AppError> {
    records::find(&store, &id).map(Json)
}

/// POST /api/applications/{id}/commands
#[utoipa::path(
    post,
    path = "/api/applications/{id}/commands",
    request_body = RecordCommand,
    params(("id" = String, Path, description = "Application id")),
    responses(
        (status = 200, description = "Command applied", body = CommandResult<Application>),
        (status = 400, description = "Action not supported for applications", body = AppError),
        (status = 401, description = "No identity", body = AppError),
        (status = 403, description = "Role may not issue this action", body = AppError),
        (status = 404, description = "Not found", body = AppError),
        (status = 409, description = "Not allowed from the current status", body = AppError),
        (status = 422, description = "Invalid payload", body = AppError)
    ),
    security(("bearer" = [])),
    tag = "applications"
)]
pub async fn application_command(
    State(store): State<Arc<RecordStore>>,
    auth: AuthRequired,
    Path(id): Path<String>,
    Json(command): Json<RecordCommand>,
) -> Result<Json<CommandResult<Application>>, AppError> {
    let role = auth.role()?;
    records::execute(&store, &id, &command, &auth.0, role).map(Json)
}

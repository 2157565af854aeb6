use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;

use shared_types::{
    AppError, CommandResult, LocalContentPlan, PaginatedResponse, RecordCommand, RecordStatistics,
};

use super::records::ListQuery;
use crate::auth::extractors::AuthRequired;
use crate::repo::records;
use crate::store::RecordStore;

#[utoipa::path(
    get,
    path = "/api/local-content-plans",
    params(
        ("search_term" = Option<String>, Query, description = "Matches id, company or plan title"),
        ("status" = Option<String>, Query, description = "Exact status label, or `all`"),
        ("category" = Option<String>, Query, description = "Exact plan category"),
        ("date_from" = Option<String>, Query, description = "Submitted on or after (YYYY-MM-DD)"),
        ("date_to" = Option<String>, Query, description = "Submitted on or before (YYYY-MM-DD)"),
        ("min_budget" = Option<String>, Query, description = "Minimum budget"),
        ("max_budget" = Option<String>, Query, description = "Maximum budget"),
        ("page" = Option<i64>, Query, description = "Page number (default 1)"),
        ("limit" = Option<i64>, Query, description = "Page size (default 20, max 100)")
    ),
    responses(
        (status = 200, description = "Matching plans", body = PaginatedResponse<LocalContentPlan>)
    ),
    tag = "local-content"
)]
pub async fn list_local_content_plans(
    State(store): State<Arc<RecordStore>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<PaginatedResponse<LocalContentPlan>>, AppError> {
    let query = ListQuery::from(params);
    records::list(&store, &query.criteria, query.page, query.limit).map(Json)
}

#[utoipa::path(
    get,
    path = "/api/local-content-plans/statistics",
    responses(
        (status = 200, description = "Counts and budget total over matching plans", body = RecordStatistics)
    ),
    tag = "local-content"
)]
pub async fn local_content_statistics(
    State(store): State<Arc<RecordStore>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<RecordStatistics>, AppError> {
    let query = ListQuery::from(params);
    records::statistics::<LocalContentPlan>(&store, &query.criteria).map(Json)
}

#[utoipa::path(
    get,
    path = "/api/local-content-plans/{id}",
    params(("id" = String, Path, description = "Plan id")),
    responses(
        (status = 200, description = "Plan found", body = LocalContentPlan),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "local-content"
)]
pub async fn get_local_content_plan(
    State(store): State<Arc<RecordStore>>,
    Path(id): Path<String>,
) -> Result<Json<LocalContentPlan>, AppError> {
    records::find(&store, &id).map(Json)
}

/// Approve or reject a submitted plan. Compliance and admin only.
#[utoipa::path(
    post,
    path = "/api/local-content-plans/{id}/commands",
    request_body = RecordCommand,
    params(("id" = String, Path, description = "Plan id")),
    responses(
        (status = 200, description = "Command applied", body = CommandResult<LocalContentPlan>),
        (status = 400, description = "Action not supported for plans", body = AppError),
        (status = 401, description = "No identity", body = AppError),
        (status = 403, description = "Role may not issue this action", body = AppError),
        (status = 404, description = "Not found", body = AppError),
        (status = 409, description = "Plan is not awaiting a decision", body = AppError),
        (status = 422, description = "Invalid payload", body = AppError)
    ),
    security(("bearer" = [])),
    tag = "local-content"
)]
pub async fn local_content_command(
    State(store): State<Arc<RecordStore>>,
    auth: AuthRequired,
    Path(id): Path<String>,
    Json(command): Json<RecordCommand>,
) -> Result<Json<CommandResult<LocalContentPlan>>, AppError> {
    let role = auth.role()?;
    records::execute(&store, &id, &command, &auth.0, role).map(Json)
}

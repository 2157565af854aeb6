use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;

use shared_types::{
    AppError, CommandResult, ExpatriateVisa, PaginatedResponse, RecordCommand, RecordStatistics,
};

use super::records::ListQuery;
use crate::auth::extractors::AuthRequired;
use crate::repo::records;
use crate::store::RecordStore;

#[utoipa::path(
    get,
    path = "/api/visas",
    params(
        ("search_term" = Option<String>, Query, description = "Matches id, applicant, company or position"),
        ("status" = Option<String>, Query, description = "Pending, Approved, Rejected or Expired"),
        ("visa_type" = Option<String>, Query, description = "Exact visa type"),
        ("nationality" = Option<String>, Query, description = "Exact nationality"),
        ("date_from" = Option<String>, Query, description = "Submitted on or after (YYYY-MM-DD)"),
        ("date_to" = Option<String>, Query, description = "Submitted on or before (YYYY-MM-DD)"),
        ("expires_from" = Option<String>, Query, description = "Expires on or after (YYYY-MM-DD)"),
        ("expires_to" = Option<String>, Query, description = "Expires on or before (YYYY-MM-DD)"),
        ("page" = Option<i64>, Query, description = "Page number (default 1)"),
        ("limit" = Option<i64>, Query, description = "Page size (default 20, max 100)")
    ),
    responses(
        (status = 200, description = "Matching visas", body = PaginatedResponse<ExpatriateVisa>)
    ),
    tag = "visas"
)]
pub async fn list_visas(
    State(store): State<Arc<RecordStore>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<PaginatedResponse<ExpatriateVisa>>, AppError> {
    let query = ListQuery::from(params);
    records::list(&store, &query.criteria, query.page, query.limit).map(Json)
}

#[utoipa::path(
    get,
    path = "/api/visas/statistics",
    responses(
        (status = 200, description = "Counts over matching visas", body = RecordStatistics)
    ),
    tag = "visas"
)]
pub async fn visa_statistics(
    State(store): State<Arc<RecordStore>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<RecordStatistics>, AppError> {
    let query = ListQuery::from(params);
    records::statistics::<ExpatriateVisa>(&store, &query.criteria).map(Json)
}

#[utoipa::path(
    get,
    path = "/api/visas/{id}",
    params(("id" = String, Path, description = "Visa id")),
    responses(
        (status = 200, description = "Visa found", body = ExpatriateVisa),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "visas"
)]
pub async fn get_visa(
    State(store): State<Arc<RecordStore>>,
    Path(id): Path<String>,
) -> Result<Json<ExpatriateVisa>, AppError> {
    records::find(&store, &id).map(Json)
}

/// Decide a pending visa. Immigration and admin only.
#[utoipa::path(
    post,
    path = "/api/visas/{id}/commands",
    request_body = RecordCommand,
    params(("id" = String, Path, description = "Visa id")),
    responses(
        (status = 200, description = "Command applied", body = CommandResult<ExpatriateVisa>),
        (status = 400, description = "Action not supported for visas", body = AppError),
        (status = 401, description = "No identity", body = AppError),
        (status = 403, description = "Role may not issue this action", body = AppError),
        (status = 404, description = "Not found", body = AppError),
        (status = 409, description = "Visa is no longer pending", body = AppError),
        (status = 422, description = "Invalid payload", body = AppError)
    ),
    security(("bearer" = [])),
    tag = "visas"
)]
pub async fn visa_command(
    State(store): State<Arc<RecordStore>>,
    auth: AuthRequired,
    Path(id): Path<String>,
    Json(command): Json<RecordCommand>,
) -> Result<Json<CommandResult<ExpatriateVisa>>, AppError> {
    let role = auth.role()?;
    records::execute(&store, &id, &command, &auth.0, role).map(Json)
}

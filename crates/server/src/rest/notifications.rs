use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;

use shared_types::{
    AppError, CommandResult, Notification, PaginatedResponse, RecordCommand, RecordStatistics,
};

use super::records::ListQuery;
use crate::auth::extractors::AuthRequired;
use crate::repo::records;
use crate::store::RecordStore;

/// GET /api/notifications
#[utoipa::path(
    get,
    path = "/api/notifications",
    params(
        ("search_term" = Option<String>, Query, description = "Matches title or message"),
        ("status" = Option<String>, Query, description = "Unread, Read or Archived"),
        ("category" = Option<String>, Query, description = "Exact category"),
        ("priority" = Option<String>, Query, description = "Low, Medium or High"),
        ("date_from" = Option<String>, Query, description = "Created on or after (YYYY-MM-DD)"),
        ("date_to" = Option<String>, Query, description = "Created on or before (YYYY-MM-DD)"),
        ("page" = Option<i64>, Query, description = "Page number (default 1)"),
        ("limit" = Option<i64>, Query, description = "Page size (default 20, max 100)")
    ),
    responses(
        (status = 200, description = "Matching notifications", body = PaginatedResponse<Notification>)
    ),
    tag = "notifications"
)]
pub async fn list_notifications(
    State(store): State<Arc<RecordStore>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<PaginatedResponse<Notification>>, AppError> {
    let query = ListQuery::from(params);
    records::list(&store, &query.criteria, query.page, query.limit).map(Json)
}

#[utoipa::path(
    get,
    path = "/api/notifications/statistics",
    responses(
        (status = 200, description = "Counts over matching notifications", body = RecordStatistics)
    ),
    tag = "notifications"
)]
pub async fn notification_statistics(
    State(store): State<Arc<RecordStore>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<RecordStatistics>, AppError> {
    let query = ListQuery::from(params);
    records::statistics::<Notification>(&store, &query.criteria).map(Json)
}

#[utoipa::path(
    get,
    path = "/api/notifications/{id}",
    params(("id" = String, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Notification found", body = Notification),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "notifications"
)]
pub async fn get_notification(
    State(store): State<Arc<RecordStore>>,
    Path(id): Path<String>,
) -> Result<Json<Notification>, AppError> {
    records::find(&store, &id).map(Json)
}

/// Mark read or archive. Any signed-in role may do either.
#[utoipa::path(
    post,
    path = "/api/notifications/{id}/commands",
    request_body = RecordCommand,
    params(("id" = String, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Command applied", body = CommandResult<Notification>),
        (status = 400, description = "Action not supported for notifications", body = AppError),
        (status = 401, description = "No identity", body = AppError),
        (status = 404, description = "Not found", body = AppError),
        (status = 409, description = "Already read or archived", body = AppError)
    ),
    security(("bearer" = [])),
    tag = "notifications"
)]
pub async fn notification_command(
    State(store): State<Arc<RecordStore>>,
    auth: AuthRequired,
    Path(id): Path<String>,
    Json(command): Json<RecordCommand>,
) -> Result<Json<CommandResult<Notification>>, AppError> {
    let role = auth.role()?;
    records::execute(&store, &id, &command, &auth.0, role).map(Json)
}

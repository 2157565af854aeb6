use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;

use shared_types::{
    AppError, CommandResult, PaginatedResponse, Payment, RecordCommand, RecordStatistics,
};

use super::records::ListQuery;
use crate::auth::extractors::AuthRequired;
use crate::repo::records;
use crate::store::RecordStore;

/// GET /api/payments
#[utoipa::path(
    get,
    path = "/api/payments",
    params(
        ("search_term" = Option<String>, Query, description = "Matches id, company, reference or description"),
        ("status" = Option<String>, Query, description = "Pending, Paid, Overdue or Failed"),
        ("category" = Option<String>, Query, description = "Exact fee category"),
        ("date_from" = Option<String>, Query, description = "Due on or after (YYYY-MM-DD)"),
        ("date_to" = Option<String>, Query, description = "Due on or before (YYYY-MM-DD)"),
        ("paid_from" = Option<String>, Query, description = "Paid on or after (YYYY-MM-DD)"),
        ("paid_to" = Option<String>, Query, description = "Paid on or before (YYYY-MM-DD)"),
        ("min_amount" = Option<String>, Query, description = "Minimum amount"),
        ("max_amount" = Option<String>, Query, description = "Maximum amount"),
        ("page" = Option<i64>, Query, description = "Page number (default 1)"),
        ("limit" = Option<i64>, Query, description = "Page size (default 20, max 100)")
    ),
    responses(
        (status = 200, description = "Matching payments", body = PaginatedResponse<Payment>)
    ),
    tag = "payments"
)]
pub async fn list_payments(
    State(store): State<Arc<RecordStore>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<PaginatedResponse<Payment>>, AppError> {
    let query = ListQuery::from(params);
    records::list(&store, &query.criteria, query.page, query.limit).map(Json)
}

/// GET /api/payments/statistics
#[utoipa::path(
    get,
    path = "/api/payments/statistics",
    responses(
        (status = 200, description = "Counts and amount total over matching payments", body = RecordStatistics)
    ),
    tag = "payments"
)]
pub async fn payment_statistics(
    State(store): State<Arc<RecordStore>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<RecordStatistics>, AppError> {
    let query = ListQuery::from(params);
    records::statistics::<Payment>(&store, &query.criteria).map(Json)
}

#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    params(("id" = String, Path, description = "Payment id")),
    responses(
        (status = 200, description = "Payment found", body = Payment),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "payments"
)]
pub async fn get_payment(
    State(store): State<Arc<RecordStore>>,
    Path(id): Path<String>,
) -> Result<Json<Payment>, AppError> {
    records::find(&store, &id).map(Json)
}

/// POST /api/payments/{id}/commands
///
/// Only `mark_paid` applies to payments, and only the finance and admin
/// roles may issue it.
#[utoipa::path(
    post,
    path = "/api/payments/{id}/commands",
    request_body = RecordCommand,
    params(("id" = String, Path, description = "Payment id")),
    responses(
        (status = 200, description = "Command applied", body = CommandResult<Payment>),
        (status = 400, description = "Action not supported for payments", body = AppError),
        (status = 401, description = "No identity", body = AppError),
        (status = 403, description = "Role may not issue this action", body = AppError),
        (status = 404, description = "Not found", body = AppError),
        (status = 409, description = "Payment is not outstanding", body = AppError),
        (status = 422, description = "Invalid payload", body = AppError)
    ),
    security(("bearer" = [])),
    tag = "payments"
)]
pub async fn payment_command(
    State(store): State<Arc<RecordStore>>,
    auth: AuthRequired,
    Path(id): Path<String>,
    Json(command): Json<RecordCommand>,
) -> Result<Json<CommandResult<Payment>>, AppError> {
    let role = auth.role()?;
    records::execute(&store, &id, &command, &auth.0, role).map(Json)
}

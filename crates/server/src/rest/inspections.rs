use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;

use shared_types::{AppError, InspectionReport, PaginatedResponse, RecordStatistics};

use super::records::ListQuery;
use crate::repo::records;
use crate::store::RecordStore;

/// GET /api/inspections
///
/// Unscored inspections never match a score range.
#[utoipa::path(
    get,
    path = "/api/inspections",
    params(
        ("search_term" = Option<String>, Query, description = "Matches id, facility, inspector or findings"),
        ("status" = Option<String>, Query, description = "Exact status label, or `all`"),
        ("inspection_type" = Option<String>, Query, description = "Routine, Safety, Environmental or Incident"),
        ("priority" = Option<String>, Query, description = "Low, Medium or High"),
        ("location" = Option<String>, Query, description = "Exact location"),
        ("date_from" = Option<String>, Query, description = "Inspected on or after (YYYY-MM-DD)"),
        ("date_to" = Option<String>, Query, description = "Inspected on or before (YYYY-MM-DD)"),
        ("min_score" = Option<String>, Query, description = "Minimum score"),
        ("max_score" = Option<String>, Query, description = "Maximum score"),
        ("page" = Option<i64>, Query, description = "Page number (default 1)"),
        ("limit" = Option<i64>, Query, description = "Page size (default 20, max 100)")
    ),
    responses(
        (status = 200, description = "Matching inspections", body = PaginatedResponse<InspectionReport>)
    ),
    tag = "inspections"
)]
pub async fn list_inspections(
    State(store): State<Arc<RecordStore>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<PaginatedResponse<InspectionReport>>, AppError> {
    let query = ListQuery::from(params);
    records::list(&store, &query.criteria, query.page, query.limit).map(Json)
}

#[utoipa::path(
    get,
    path = "/api/inspections/statistics",
    responses(
        (status = 200, description = "Counts over matching inspections", body = RecordStatistics)
    ),
    tag = "inspections"
)]
pub async fn inspection_statistics(
    State(store): State<Arc<RecordStore>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<RecordStatistics>, AppError> {
    let query = ListQuery::from(params);
    records::statistics::<InspectionReport>(&store, &query.criteria).map(Json)
}

#[utoipa::path(
    get,
    path = "/api/inspections/{id}",
    params(("id" = String, Path, description = "Inspection id")),
    responses(
        (status = 200, description = "Inspection found", body = InspectionReport),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "inspections"
)]
pub async fn get_inspection(
    State(store): State<Arc<RecordStore>>,
    Path(id): Path<String>,
) -> Result<Json<InspectionReport>, AppError> {
    records::find(&store, &id).map(Json)
}

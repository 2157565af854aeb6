use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;

use shared_types::{AppError, UnifiedSearchParams, UnifiedSearchResponse};

use crate::auth::extractors::MaybeAuth;
use crate::repo::search;
use crate::store::RecordStore;

/// Maximum number of results allowed in a CSV export.
const EXPORT_MAX_RESULTS: usize = 500;

/// GET /api/search?q=...&entity_types=...&page=1&per_page=20
///
/// Text search over every collection. Pass `entity_types=application,visa`
/// to restrict it.
#[utoipa::path(
    get,
    path = "/api/search",
    params(UnifiedSearchParams),
    responses(
        (status = 200, description = "Hits with per-type facets", body = UnifiedSearchResponse),
        (status = 400, description = "Empty query", body = AppError)
    ),
    tag = "search"
)]
pub async fn unified_search(
    State(store): State<Arc<RecordStore>>,
    MaybeAuth(claims): MaybeAuth,
    Query(params): Query<UnifiedSearchParams>,
) -> Result<Json<UnifiedSearchResponse>, AppError> {
    let response = search::unified_search(&store, &params)?;
    tracing::debug!(
        user = claims.as_ref().map(|c| c.sub.as_str()).unwrap_or("anonymous"),
        q = %params.q,
        total = response.total,
        "unified search"
    );
    Ok(Json(response))
}

/// GET /api/search/export?q=...&entity_types=...
///
/// Same query as the search endpoint, returned as a CSV download of up to
/// 500 rows with columns: ID, Entity Type, Title, Subtitle, Status.
#[utoipa::path(
    get,
    path = "/api/search/export",
    params(UnifiedSearchParams),
    responses(
        (status = 200, description = "CSV of matching records", content_type = "text/csv", body = String),
        (status = 400, description = "Empty query", body = AppError)
    ),
    tag = "search"
)]
pub async fn export_search(
    State(store): State<Arc<RecordStore>>,
    Query(params): Query<UnifiedSearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let hits = search::export_hits(&store, &params, EXPORT_MAX_RESULTS)?;

    let mut csv = String::from("ID,Entity Type,Title,Subtitle,Status\n");
    for hit in &hits {
        let row = [
            hit.id.as_str(),
            hit.entity_type.as_str(),
            hit.title.as_str(),
            hit.subtitle.as_str(),
            hit.status.as_str(),
        ];
        let escaped: Vec<String> = row.iter().map(|v| csv_escape(v)).collect();
        csv.push_str(&escaped.join(","));
        csv.push('\n');
    }

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"search-results.csv\"",
            ),
        ],
        csv,
    ))
}

/// Quotes a CSV field when it contains a separator, quote or line break.
fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

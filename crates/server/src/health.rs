use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use crate::store::RecordStore;

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Record the application start time. Call once during startup.
pub fn record_start_time() {
    START_TIME.get_or_init(Instant::now);
}

/// Health check response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub version: String,
    /// Records held per collection, keyed by URL segment.
    pub records: BTreeMap<String, usize>,
}

/// Health check handler.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(store): State<Arc<RecordStore>>) -> Json<HealthResponse> {
    let (status, records) = match store.counts() {
        Ok(counts) => ("ok".to_string(), counts),
        Err(e) => (format!("degraded: {}", e.message), BTreeMap::new()),
    };

    let uptime = START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0);

    Json(HealthResponse {
        status,
        uptime_seconds: uptime,
        version: env!("CARGO_PKG_VERSION").to_string(),
        records,
    })
}

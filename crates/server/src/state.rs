use axum::extract::FromRef;
use std::sync::Arc;

use crate::auth::jwt::JwtKeys;
use crate::store::RecordStore;

/// Shared application state passed to Axum handlers via `State`.
/// Derives `FromRef` so handlers can extract `State<Arc<RecordStore>>`
/// or `State<JwtKeys>` directly.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub store: Arc<RecordStore>,
    pub keys: JwtKeys,
}

impl AppState {
    /// State over freshly seeded collections.
    pub fn seeded(keys: JwtKeys) -> Self {
        Self {
            store: Arc::new(RecordStore::seeded()),
            keys,
        }
    }
}

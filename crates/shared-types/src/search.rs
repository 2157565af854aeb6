use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::EntityKind;

/// Where a search is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    #[default]
    Idle,
    Loading,
    Done,
}

/// What a finished search produced.
///
/// `Empty` means the search ran and nothing matched; `Failed` means it
/// could not run at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum SearchOutcome<T> {
    Results(Vec<T>),
    Empty,
    Failed(AppError),
}

impl<T> SearchOutcome<T> {
    /// `Results` for a non-empty set, `Empty` otherwise.
    pub fn from_results(results: Vec<T>) -> Self {
        if results.is_empty() {
            SearchOutcome::Empty
        } else {
            SearchOutcome::Results(results)
        }
    }

    pub fn results(&self) -> &[T] {
        match self {
            SearchOutcome::Results(r) => r,
            SearchOutcome::Empty | SearchOutcome::Failed(_) => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SearchOutcome::Failed(_))
    }
}

/// Observable state of a search box.
///
/// Every submission carries a generation number; completions for an
/// older generation than the last `begin` are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchState<T> {
    pub phase: SearchPhase,
    pub generation: u64,
    /// Last published outcome. Kept while a newer search is loading.
    #[serde(default)]
    pub outcome: Option<SearchOutcome<T>>,
}

impl<T> Default for SearchState<T> {
    fn default() -> Self {
        Self {
            phase: SearchPhase::Idle,
            generation: 0,
            outcome: None,
        }
    }
}

impl<T> SearchState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, generation: u64) {
        self.phase = SearchPhase::Loading;
        self.generation = generation;
    }

    /// Publish `outcome` for `generation`. Returns false when the
    /// generation is stale and the state was left untouched.
    pub fn complete(&mut self, generation: u64, outcome: SearchOutcome<T>) -> bool {
        if generation != self.generation || self.phase != SearchPhase::Loading {
            return false;
        }
        self.phase = SearchPhase::Done;
        self.outcome = Some(outcome);
        true
    }

    pub fn reset(&mut self) {
        self.phase = SearchPhase::Idle;
        self.outcome = None;
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SearchPhase::Loading
    }
}

/// A hit from the cross-collection search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UnifiedSearchResult {
    pub id: String,
    pub entity_type: EntityKind,
    pub title: String,
    pub subtitle: String,
    pub status: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FacetCount {
    pub entity_type: EntityKind,
    pub count: i64,
}

/// Hit counts per entity type, in [`EntityKind::ALL`] order, zero counts omitted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SearchFacets {
    pub by_entity_type: Vec<FacetCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UnifiedSearchResponse {
    pub results: Vec<UnifiedSearchResult>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub facets: SearchFacets,
}

/// Query string of `GET /api/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct UnifiedSearchParams {
    #[serde(default)]
    pub q: String,
    /// Comma-separated entity types, e.g. `application,payment`.
    #[serde(default)]
    pub entity_types: Option<String>,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub per_page: Option<i64>,
}

impl UnifiedSearchParams {
    /// Selected entity types. Unknown names are skipped; no selection
    /// (or nothing recognisable) means every type.
    pub fn kinds(&self) -> Vec<EntityKind> {
        let selected: Vec<EntityKind> = self
            .entity_types
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .filter_map(EntityKind::parse)
            .collect();
        if selected.is_empty() {
            EntityKind::ALL.to_vec()
        } else {
            EntityKind::ALL
                .into_iter()
                .filter(|k| selected.contains(k))
                .collect()
        }
    }
}

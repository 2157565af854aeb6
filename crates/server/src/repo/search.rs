use shared_types::{
    detail_url, normalize_pagination, AppError, EntityKind, FacetCount, FilterCriteria, Record,
    SearchFacets, UnifiedSearchParams, UnifiedSearchResponse, UnifiedSearchResult,
    Application, ExpatriateVisa, InspectionReport, LocalContentPlan, Notification, Payment,
};

use crate::store::{RecordStore, Stored};

/// Text search across collections.
///
/// Runs each selected type's `search_term` criterion, so a hit means the
/// same thing it means on that type's own list page. Results come grouped
/// by entity type in [`EntityKind::ALL`] order, then in collection order.
pub fn unified_search(
    store: &RecordStore,
    params: &UnifiedSearchParams,
) -> Result<UnifiedSearchResponse, AppError> {
    let (hits, facets) = search_hits(store, params)?;

    let (page, per_page) = normalize_pagination(params.page, params.per_page);
    let total = hits.len() as i64;
    let skip = usize::try_from((page - 1).saturating_mul(per_page)).unwrap_or(usize::MAX);
    let results = hits.into_iter().skip(skip).take(per_page as usize).collect();

    Ok(UnifiedSearchResponse {
        results,
        total,
        page,
        per_page,
        facets,
    })
}

/// Unpaginated hits for a CSV export, capped at `max`.
pub fn export_hits(
    store: &RecordStore,
    params: &UnifiedSearchParams,
    max: usize,
) -> Result<Vec<UnifiedSearchResult>, AppError> {
    let (mut hits, _) = search_hits(store, params)?;
    hits.truncate(max);
    Ok(hits)
}

fn search_hits(
    store: &RecordStore,
    params: &UnifiedSearchParams,
) -> Result<(Vec<UnifiedSearchResult>, SearchFacets), AppError> {
    let q = params.q.trim();
    if q.is_empty() {
        return Err(AppError::bad_request("Search query 'q' must not be empty"));
    }

    let criteria = FilterCriteria::new().with("search_term", q);
    let mut hits = Vec::new();
    let mut facets = SearchFacets::default();

    for kind in params.kinds() {
        let found = match kind {
            EntityKind::Application => collect::<Application>(store, &criteria)?,
            EntityKind::Payment => collect::<Payment>(store, &criteria)?,
            EntityKind::LocalContentPlan => collect::<LocalContentPlan>(store, &criteria)?,
            EntityKind::Inspection => collect::<InspectionReport>(store, &criteria)?,
            EntityKind::Visa => collect::<ExpatriateVisa>(store, &criteria)?,
            EntityKind::Notification => collect::<Notification>(store, &criteria)?,
        };
        if !found.is_empty() {
            facets.by_entity_type.push(FacetCount {
                entity_type: kind,
                count: found.len() as i64,
            });
        }
        hits.extend(found);
    }

    Ok((hits, facets))
}

fn collect<T: Stored>(
    store: &RecordStore,
    criteria: &FilterCriteria,
) -> Result<Vec<UnifiedSearchResult>, AppError> {
    Ok(T::collection(store)
        .query(criteria)?
        .iter()
        .map(to_result)
        .collect())
}

fn to_result<T: Record>(record: &T) -> UnifiedSearchResult {
    UnifiedSearchResult {
        id: record.id().to_string(),
        entity_type: T::KIND,
        title: record.title(),
        subtitle: record.subtitle(),
        status: record.status_label().to_string(),
        url: detail_url(T::KIND, record.id()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::AppErrorKind;

    fn params(q: &str, types: Option<&str>) -> UnifiedSearchParams {
        UnifiedSearchParams {
            q: q.into(),
            entity_types: types.map(str::to_string),
            page: None,
            per_page: None,
        }
    }

    #[test]
    fn blank_query_is_rejected() {
        let store = RecordStore::seeded();
        let err = unified_search(&store, &params("  ", None)).unwrap_err();
        assert_eq!(err.kind, AppErrorKind::BadRequest);
    }

    #[test]
    fn spans_collections_with_facets() {
        let store = RecordStore::seeded();
        let response = unified_search(&store, &params("tullow", None)).unwrap();
        let kinds: Vec<EntityKind> = response
            .facets
            .by_entity_type
            .iter()
            .map(|f| f.entity_type)
            .collect();
        assert_eq!(
            kinds,
            vec![
                EntityKind::Application,
                EntityKind::Payment,
                EntityKind::LocalContentPlan,
                EntityKind::Visa,
                EntityKind::Notification,
            ]
        );
        assert_eq!(response.total, response.results.len() as i64);
        assert_eq!(response.results[0].id, "APP-2024-004");
        assert_eq!(response.results[0].url, "/applications/APP-2024-004");
    }

    #[test]
    fn entity_type_filter_limits_collections() {
        let store = RecordStore::seeded();
        let response = unified_search(&store, &params("tullow", Some("payment"))).unwrap();
        assert_eq!(response.total, 1);
        assert_eq!(response.results[0].entity_type, EntityKind::Payment);
    }

    #[test]
    fn paginates_after_counting() {
        let store = RecordStore::seeded();
        let mut p = params("tullow", None);
        p.per_page = Some(2);
        p.page = Some(2);
        let response = unified_search(&store, &p).unwrap();
        assert_eq!(response.total, 5);
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.page, 2);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let store = RecordStore::seeded();
        let mut p = params("tullow", None);
        p.page = Some(i64::MAX);
        let response = unified_search(&store, &p).unwrap();
        assert_eq!(response.total, 5);
        assert!(response.results.is_empty());
    }

    #[test]
    fn export_ignores_pagination_but_caps() {
        let store = RecordStore::seeded();
        let mut p = params("tullow", None);
        p.per_page = Some(1);
        assert_eq!(export_hits(&store, &p, 500).unwrap().len(), 5);
        assert_eq!(export_hits(&store, &p, 3).unwrap().len(), 3);
    }
}

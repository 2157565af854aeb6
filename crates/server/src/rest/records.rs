use shared_types::FilterCriteria;
use std::collections::HashMap;

/// Query string of a collection list or statistics request: pagination
/// plus whatever filter criteria the page sent.
#[derive(Debug, Default, PartialEq)]
pub struct ListQuery {
    pub criteria: FilterCriteria,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl From<HashMap<String, String>> for ListQuery {
    fn from(params: HashMap<String, String>) -> Self {
        let mut query = ListQuery::default();
        for (key, value) in params {
            match key.as_str() {
                "page" => query.page = value.trim().parse().ok(),
                "limit" => query.limit = value.trim().parse().ok(),
                _ => query.criteria.set(&key, value),
            }
        }
        query
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::filter::Filterable;
use crate::models::EntityKind;

/// Priority shared by applications, inspections and notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

/// Behaviour every listed record type shares: identity, a status label,
/// a headline for search results and an optional numeric total.
pub trait Record: Filterable + Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> &str;

    /// Display label of the record's status.
    fn status_label(&self) -> &'static str;

    /// Numeric field summed on dashboards (value, amount, budget, score).
    fn numeric_value(&self) -> Option<f64> {
        None
    }

    fn title(&self) -> String;

    fn subtitle(&self) -> String;
}

/// Dashboard summary over a (usually filtered) set of records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RecordStatistics {
    pub total: i64,
    /// Count per status label.
    pub by_status: BTreeMap<String, i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_total: Option<f64>,
}

impl RecordStatistics {
    pub fn from_records<'a, T: Record>(records: impl IntoIterator<Item = &'a T>) -> Self {
        let mut total = 0;
        let mut by_status = BTreeMap::new();
        let mut numeric_total: Option<f64> = None;

        for record in records {
            total += 1;
            *by_status.entry(record.status_label().to_string()).or_insert(0) += 1;
            if let Some(n) = record.numeric_value() {
                numeric_total = Some(numeric_total.unwrap_or(0.0) + n);
            }
        }

        Self {
            total,
            by_status,
            numeric_total,
        }
    }
}

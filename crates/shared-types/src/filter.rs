//! Generic multi-criteria record filtering.
//!
//! Each record type describes its filterable surface once, as a static
//! slice of [`FieldSpec`] descriptors, and exposes its field values by name
//! through [`Filterable::field`]. Raw, form-shaped [`FilterCriteria`] are
//! compiled against that schema into a [`CompiledFilter`] holding only the
//! active constraints; the compiled filter is then applied to any slice of
//! records.
//!
//! The filter is permissive: a bound that does not parse as a date or a
//! number imposes no constraint, and filtering never fails.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value of the "no constraint" entry in enum dropdowns.
pub const ALL_SENTINEL: &str = "all";

/// A field value a record exposes for filtering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Date(NaiveDate),
    Number(f64),
}

/// One criteria descriptor: which criteria key(s) drive it and which
/// record field(s) it tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSpec {
    /// Case-insensitive substring match; a record matches when any of
    /// `fields` contains the query.
    Text {
        key: &'static str,
        fields: &'static [&'static str],
    },
    /// Exact, case-sensitive match against the field's label.
    Exact {
        key: &'static str,
        field: &'static str,
    },
    /// Inclusive calendar-date range.
    DateRange {
        from: &'static str,
        to: &'static str,
        field: &'static str,
    },
    /// Inclusive numeric range.
    NumberRange {
        min: &'static str,
        max: &'static str,
        field: &'static str,
    },
}

impl FieldSpec {
    /// Criteria keys this descriptor reads.
    pub fn keys(&self) -> Vec<&'static str> {
        match self {
            FieldSpec::Text { key, .. } | FieldSpec::Exact { key, .. } => vec![*key],
            FieldSpec::DateRange { from, to, .. } => vec![*from, *to],
            FieldSpec::NumberRange { min, max, .. } => vec![*min, *max],
        }
    }
}

/// A record type that can be narrowed by [`FilterCriteria`].
pub trait Filterable {
    /// Criteria schema for this record type.
    const SCHEMA: &'static [FieldSpec];

    /// Look up a field by name. `None` when the record has no value for it.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

// ── Criteria ────────────────────────────────────────────────────────

/// User-entered filter inputs, keyed by canonical snake_case criteria name.
///
/// Values are kept exactly as a form would hold them; interpretation
/// (trimming, sentinel handling, parsing) happens at compile time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterCriteria(BTreeMap<String, String>);

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or replace a criterion. camelCase keys are normalized.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(normalize_key(key), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(&normalize_key(key))
    }

    /// Raw value as entered.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(&normalize_key(key)).map(String::as_str)
    }

    /// Trimmed value when the criterion is active: non-empty and not the
    /// `all` sentinel.
    pub fn active(&self, key: &str) -> Option<&str> {
        let value = self.get(key)?.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL_SENTINEL) {
            None
        } else {
            Some(value)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for FilterCriteria {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut criteria = FilterCriteria::new();
        for (k, v) in iter {
            criteria.set(k.as_ref(), v);
        }
        criteria
    }
}

/// `searchTerm` -> `search_term`. Already snake_case keys pass through.
fn normalize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.trim().chars() {
        if c.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Parse a date bound. Accepts `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()))
}

/// Parse a numeric bound. Non-finite values count as unparsable.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

// ── Compiled filter ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Constraint {
    Contains {
        needle: String,
        fields: &'static [&'static str],
    },
    Equals {
        field: &'static str,
        value: String,
    },
    DateBetween {
        field: &'static str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
    NumberBetween {
        field: &'static str,
        min: Option<f64>,
        max: Option<f64>,
    },
}

impl Constraint {
    fn holds<T: Filterable + ?Sized>(&self, record: &T) -> bool {
        match self {
            Constraint::Contains { needle, fields } => fields.iter().any(|f| {
                matches!(record.field(f), Some(FieldValue::Text(text)) if text.to_lowercase().contains(needle.as_str()))
            }),
            Constraint::Equals { field, value } => {
                matches!(record.field(field), Some(FieldValue::Text(text)) if text == value.as_str())
            }
            Constraint::DateBetween { field, from, to } => match record.field(field) {
                Some(FieldValue::Date(date)) => {
                    from.map_or(true, |f| date >= f) && to.map_or(true, |t| date <= t)
                }
                _ => false,
            },
            Constraint::NumberBetween { field, min, max } => match record.field(field) {
                Some(FieldValue::Number(n)) => {
                    min.map_or(true, |m| n >= m) && max.map_or(true, |m| n <= m)
                }
                _ => false,
            },
        }
    }
}

/// The active, parsed constraints of a criteria set for one record type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledFilter {
    constraints: Vec<Constraint>,
}

impl CompiledFilter {
    /// Compile `criteria` against `T`'s schema.
    pub fn for_type<T: Filterable>(criteria: &FilterCriteria) -> Self {
        compile(T::SCHEMA, criteria)
    }

    /// True when no criterion is active.
    pub fn is_unconstrained(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Number of active constraints.
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn matches<T: Filterable + ?Sized>(&self, record: &T) -> bool {
        self.constraints.iter().all(|c| c.holds(record))
    }

    /// Matching records in source order.
    pub fn apply<'a, T: Filterable>(&self, records: &'a [T]) -> Vec<&'a T> {
        records.iter().filter(|r| self.matches(*r)).collect()
    }
}

/// Build a [`CompiledFilter`] from a schema and raw criteria. Inactive
/// criteria and unparsable range bounds are dropped.
pub fn compile(schema: &'static [FieldSpec], criteria: &FilterCriteria) -> CompiledFilter {
    let mut constraints = Vec::new();

    for spec in schema {
        match *spec {
            FieldSpec::Text { key, fields } => {
                if let Some(query) = criteria.active(key) {
                    constraints.push(Constraint::Contains {
                        needle: query.to_lowercase(),
                        fields,
                    });
                }
            }
            FieldSpec::Exact { key, field } => {
                if let Some(value) = criteria.active(key) {
                    constraints.push(Constraint::Equals {
                        field,
                        value: value.to_string(),
                    });
                }
            }
            FieldSpec::DateRange { from, to, field } => {
                let from = criteria.active(from).and_then(parse_date);
                let to = criteria.active(to).and_then(parse_date);
                if from.is_some() || to.is_some() {
                    constraints.push(Constraint::DateBetween { field, from, to });
                }
            }
            FieldSpec::NumberRange { min, max, field } => {
                let min = criteria.active(min).and_then(parse_number);
                let max = criteria.active(max).and_then(parse_number);
                if min.is_some() || max.is_some() {
                    constraints.push(Constraint::NumberBetween { field, min, max });
                }
            }
        }
    }

    CompiledFilter { constraints }
}

/// Records matching every active criterion, cloned, in source order.
pub fn filter<T: Filterable + Clone>(records: &[T], criteria: &FilterCriteria) -> Vec<T> {
    filter_refs(records, criteria).into_iter().cloned().collect()
}

/// Borrowing variant of [`filter`].
pub fn filter_refs<'a, T: Filterable>(records: &'a [T], criteria: &FilterCriteria) -> Vec<&'a T> {
    CompiledFilter::for_type::<T>(criteria).apply(records)
}

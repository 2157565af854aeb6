use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::command::{illegal_transition, unsupported, Actionable, RecordCommand};
use crate::error::AppError;
use crate::filter::{FieldSpec, FieldValue, Filterable};
use crate::models::EntityKind;
use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum PlanStatus {
    Draft,
    Submitted,
    #[serde(rename = "Under Review")]
    UnderReview,
    Approved,
    Rejected,
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Submitted => "Submitted",
            Self::UnderReview => "Under Review",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum PlanCategory {
    Employment,
    Procurement,
    Training,
    #[serde(rename = "Technology Transfer")]
    TechnologyTransfer,
}

impl PlanCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employment => "Employment",
            Self::Procurement => "Procurement",
            Self::Training => "Training",
            Self::TechnologyTransfer => "Technology Transfer",
        }
    }
}

/// An operator's local content and participation plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LocalContentPlan {
    pub id: String,
    pub company_name: String,
    pub title: String,
    pub category: PlanCategory,
    pub status: PlanStatus,
    pub submission_date: NaiveDate,
    pub budget: f64,
    /// Share of spend committed to local suppliers, 0–100.
    pub local_percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_notes: Option<String>,
}

impl Filterable for LocalContentPlan {
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::Text {
            key: "search_term",
            fields: &["id", "company_name", "title"],
        },
        FieldSpec::Exact { key: "status", field: "status" },
        FieldSpec::Exact { key: "category", field: "category" },
        FieldSpec::DateRange {
            from: "date_from",
            to: "date_to",
            field: "submission_date",
        },
        FieldSpec::NumberRange {
            min: "min_budget",
            max: "max_budget",
            field: "budget",
        },
    ];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Text(&self.id)),
            "company_name" => Some(FieldValue::Text(&self.company_name)),
            "title" => Some(FieldValue::Text(&self.title)),
            "status" => Some(FieldValue::Text(self.status.as_str())),
            "category" => Some(FieldValue::Text(self.category.as_str())),
            "submission_date" => Some(FieldValue::Date(self.submission_date)),
            "budget" => Some(FieldValue::Number(self.budget)),
            "local_percentage" => Some(FieldValue::Number(self.local_percentage)),
            _ => None,
        }
    }
}

impl Record for LocalContentPlan {
    const KIND: EntityKind = EntityKind::LocalContentPlan;

    fn id(&self) -> &str {
        &self.id
    }

    fn status_label(&self) -> &'static str {
        self.status.as_str()
    }

    fn numeric_value(&self) -> Option<f64> {
        Some(self.budget)
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn subtitle(&self) -> String {
        format!("{} · {}", self.company_name, self.status.as_str())
    }
}

impl Actionable for LocalContentPlan {
    fn apply(&mut self, command: &RecordCommand, _today: NaiveDate) -> Result<(), AppError> {
        let (next, notes) = match command {
            RecordCommand::Approve(c) => (PlanStatus::Approved, c.notes.clone()),
            RecordCommand::Reject(c) => (PlanStatus::Rejected, Some(c.reason.trim().to_string())),
            _ => return Err(unsupported::<Self>(command)),
        };
        if !matches!(self.status, PlanStatus::Submitted | PlanStatus::UnderReview) {
            return Err(illegal_transition(self, command));
        }
        self.status = next;
        self.review_notes = notes;
        Ok(())
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn mock_local_content_plans() -> Vec<LocalContentPlan> {
    vec![
        LocalContentPlan {
            id: "LCP-2024-001".into(),
            company_name: "Offshore Dynamics".into(),
            title: "Graduate engineer intake 2024".into(),
            category: PlanCategory::Employment,
            status: PlanStatus::Approved,
            submission_date: date(2024, 1, 12),
            budget: 850_000.0,
            local_percentage: 78.0,
            review_notes: Some("Meets 75% threshold".into()),
        },
        LocalContentPlan {
            id: "LCP-2024-002".into(),
            company_name: "Tullow Ghana Ltd".into(),
            title: "Fabrication yard sourcing plan".into(),
            category: PlanCategory::Procurement,
            status: PlanStatus::Submitted,
            submission_date: date(2024, 2, 14),
            budget: 3_200_000.0,
            local_percentage: 55.0,
            review_notes: None,
        },
        LocalContentPlan {
            id: "LCP-2024-003".into(),
            company_name: "TechDrill Solutions Ltd".into(),
            title: "Rig crew certification programme".into(),
            category: PlanCategory::Training,
            status: PlanStatus::UnderReview,
            submission_date: date(2024, 3, 1),
            budget: 420_000.0,
            local_percentage: 90.0,
            review_notes: None,
        },
        LocalContentPlan {
            id: "LCP-2024-004".into(),
            company_name: "Global Energy Corp".into(),
            title: "Subsea controls know-how transfer".into(),
            category: PlanCategory::TechnologyTransfer,
            status: PlanStatus::Draft,
            submission_date: date(2024, 3, 18),
            budget: 1_100_000.0,
            local_percentage: 40.0,
            review_notes: None,
        },
    ]
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::command::Actionable;
use crate::filter::{FieldSpec, FieldValue, Filterable};
use crate::models::EntityKind;
use crate::record::{Priority, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum InspectionStatus {
    Scheduled,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Flagged,
}

impl InspectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Flagged => "Flagged",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum InspectionType {
    Routine,
    Safety,
    Environmental,
    Incident,
}

impl InspectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Routine => "Routine",
            Self::Safety => "Safety",
            Self::Environmental => "Environmental",
            Self::Incident => "Incident",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct InspectionReport {
    pub id: String,
    pub facility: String,
    pub inspector: String,
    pub inspection_type: InspectionType,
    pub status: InspectionStatus,
    pub priority: Priority,
    pub location: String,
    pub inspection_date: NaiveDate,
    /// Compliance score out of 100. Absent until the inspection has been scored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default)]
    pub findings: String,
}

impl Filterable for InspectionReport {
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::Text {
            key: "search_term",
            fields: &["id", "facility", "inspector", "findings"],
        },
        FieldSpec::Exact { key: "status", field: "status" },
        FieldSpec::Exact {
            key: "inspection_type",
            field: "inspection_type",
        },
        FieldSpec::Exact { key: "priority", field: "priority" },
        FieldSpec::Exact { key: "location", field: "location" },
        FieldSpec::DateRange {
            from: "date_from",
            to: "date_to",
            field: "inspection_date",
        },
        FieldSpec::NumberRange {
            min: "min_score",
            max: "max_score",
            field: "score",
        },
    ];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Text(&self.id)),
            "facility" => Some(FieldValue::Text(&self.facility)),
            "inspector" => Some(FieldValue::Text(&self.inspector)),
            "findings" => Some(FieldValue::Text(&self.findings)),
            "status" => Some(FieldValue::Text(self.status.as_str())),
            "inspection_type" => Some(FieldValue::Text(self.inspection_type.as_str())),
            "priority" => Some(FieldValue::Text(self.priority.as_str())),
            "location" => Some(FieldValue::Text(&self.location)),
            "inspection_date" => Some(FieldValue::Date(self.inspection_date)),
            "score" => self.score.map(FieldValue::Number),
            _ => None,
        }
    }
}

impl Record for InspectionReport {
    const KIND: EntityKind = EntityKind::Inspection;

    fn id(&self) -> &str {
        &self.id
    }

    fn status_label(&self) -> &'static str {
        self.status.as_str()
    }

    fn numeric_value(&self) -> Option<f64> {
        self.score
    }

    fn title(&self) -> String {
        format!("{} inspection · {}", self.inspection_type.as_str(), self.facility)
    }

    fn subtitle(&self) -> String {
        format!("{} · {} · {}", self.location, self.inspector, self.status.as_str())
    }
}

// Inspection reports are read-only.
impl Actionable for InspectionReport {}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn mock_inspections() -> Vec<InspectionReport> {
    vec![
        InspectionReport {
            id: "INS-2024-001".into(),
            facility: "Jubilee FPSO Kwame Nkrumah".into(),
            inspector: "Ama Owusu".into(),
            inspection_type: InspectionType::Safety,
            status: InspectionStatus::Completed,
            priority: Priority::High,
            location: "Offshore Cape Three Points".into(),
            inspection_date: date(2024, 1, 22),
            score: Some(92.0),
            findings: "Lifeboat davits serviced; no major findings".into(),
        },
        InspectionReport {
            id: "INS-2024-002".into(),
            facility: "Takoradi supply base".into(),
            inspector: "Kofi Mensah".into(),
            inspection_type: InspectionType::Environmental,
            status: InspectionStatus::Flagged,
            priority: Priority::High,
            location: "Takoradi".into(),
            inspection_date: date(2024, 2, 9),
            score: Some(58.0),
            findings: "Drainage oil separator overflowing into storm drain".into(),
        },
        InspectionReport {
            id: "INS-2024-003".into(),
            facility: "Tema fuel depot".into(),
            inspector: "Ama Owusu".into(),
            inspection_type: InspectionType::Routine,
            status: InspectionStatus::InProgress,
            priority: Priority::Medium,
            location: "Tema".into(),
            inspection_date: date(2024, 3, 5),
            score: None,
            findings: String::new(),
        },
        InspectionReport {
            id: "INS-2024-004".into(),
            facility: "Atuabo gas processing plant".into(),
            inspector: "Yaw Boateng".into(),
            inspection_type: InspectionType::Incident,
            status: InspectionStatus::Scheduled,
            priority: Priority::Low,
            location: "Atuabo".into(),
            inspection_date: date(2024, 4, 15),
            score: None,
            findings: String::new(),
        },
    ]
}

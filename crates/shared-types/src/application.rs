use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::command::{illegal_transition, unsupported, Actionable, RecordCommand};
use crate::error::AppError;
use crate::filter::{FieldSpec, FieldValue, Filterable};
use crate::models::EntityKind;
use crate::record::{Priority, Record};

/// Review state of a licence application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ApplicationStatus {
    Pending,
    #[serde(rename = "Under Review")]
    UnderReview,
    Approved,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::UnderReview => "Under Review",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Withdrawn => "Withdrawn",
        }
    }

    /// Still awaiting a decision.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::UnderReview)
    }
}

/// Licence category applied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum LicenseType {
    Exploration,
    Production,
    Drilling,
    Pipeline,
    Refining,
}

impl LicenseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exploration => "Exploration",
            Self::Production => "Production",
            Self::Drilling => "Drilling",
            Self::Pipeline => "Pipeline",
            Self::Refining => "Refining",
        }
    }
}

/// A petroleum licence application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Application {
    pub id: String,
    pub company_name: String,
    pub applicant: String,
    pub license_type: LicenseType,
    pub status: ApplicationStatus,
    pub priority: Priority,
    pub location: String,
    pub submitted_date: NaiveDate,
    /// Declared project value.
    pub value: f64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_date: Option<NaiveDate>,
}

impl Filterable for Application {
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::Text {
            key: "search_term",
            fields: &["id", "company_name", "applicant"],
        },
        FieldSpec::Exact { key: "status", field: "status" },
        FieldSpec::Exact { key: "license_type", field: "license_type" },
        FieldSpec::Exact { key: "priority", field: "priority" },
        FieldSpec::Exact { key: "location", field: "location" },
        FieldSpec::DateRange {
            from: "date_from",
            to: "date_to",
            field: "submitted_date",
        },
        FieldSpec::NumberRange {
            min: "min_value",
            max: "max_value",
            field: "value",
        },
    ];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Text(&self.id)),
            "company_name" => Some(FieldValue::Text(&self.company_name)),
            "applicant" => Some(FieldValue::Text(&self.applicant)),
            "description" => Some(FieldValue::Text(&self.description)),
            "status" => Some(FieldValue::Text(self.status.as_str())),
            "license_type" => Some(FieldValue::Text(self.license_type.as_str())),
            "priority" => Some(FieldValue::Text(self.priority.as_str())),
            "location" => Some(FieldValue::Text(&self.location)),
            "submitted_date" => Some(FieldValue::Date(self.submitted_date)),
            "value" => Some(FieldValue::Number(self.value)),
            _ => None,
        }
    }
}

impl Record for Application {
    const KIND: EntityKind = EntityKind::Application;

    fn id(&self) -> &str {
        &self.id
    }

    fn status_label(&self) -> &'static str {
        self.status.as_str()
    }

    fn numeric_value(&self) -> Option<f64> {
        Some(self.value)
    }

    fn title(&self) -> String {
        self.company_name.clone()
    }

    fn subtitle(&self) -> String {
        format!("{} licence · {}", self.license_type.as_str(), self.status.as_str())
    }
}

impl Actionable for Application {
    fn apply(&mut self, command: &RecordCommand, today: NaiveDate) -> Result<(), AppError> {
        let next = match command {
            RecordCommand::Approve(_) => ApplicationStatus::Approved,
            RecordCommand::Reject(_) => ApplicationStatus::Rejected,
            RecordCommand::Withdraw => ApplicationStatus::Withdrawn,
            _ => return Err(unsupported::<Self>(command)),
        };
        if !self.status.is_open() {
            return Err(illegal_transition(self, command));
        }

        match command {
            RecordCommand::Approve(c) => {
                self.decision_notes = c.notes.clone();
                self.decided_date = Some(today);
            }
            RecordCommand::Reject(c) => {
                self.decision_notes = Some(c.reason.trim().to_string());
                self.decided_date = Some(today);
            }
            _ => {}
        }
        self.status = next;
        Ok(())
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// Seed applications shown on the application search page.
pub fn mock_applications() -> Vec<Application> {
    vec![
        Application {
            id: "APP-2024-001".into(),
            company_name: "TechDrill Solutions Ltd".into(),
            applicant: "Kwame Mensah".into(),
            license_type: LicenseType::Drilling,
            status: ApplicationStatus::UnderReview,
            priority: Priority::High,
            location: "Takoradi".into(),
            submitted_date: date(2024, 1, 15),
            value: 2_500_000.0,
            description: "Onshore drilling services licence for the Western Region".into(),
            decision_notes: None,
            decided_date: None,
        },
        Application {
            id: "APP-2024-002".into(),
            company_name: "Global Energy Corp".into(),
            applicant: "Ama Owusu".into(),
            license_type: LicenseType::Exploration,
            status: ApplicationStatus::Pending,
            priority: Priority::Medium,
            location: "Accra".into(),
            submitted_date: date(2024, 2, 3),
            value: 1_800_000.0,
            description: "Seismic exploration block renewal".into(),
            decision_notes: None,
            decided_date: None,
        },
        Application {
            id: "APP-2024-003".into(),
            company_name: "Offshore Dynamics".into(),
            applicant: "John Carter".into(),
            license_type: LicenseType::Production,
            status: ApplicationStatus::Approved,
            priority: Priority::High,
            location: "Cape Three Points".into(),
            submitted_date: date(2024, 2, 20),
            value: 4_200_000.0,
            description: "Deepwater production sharing licence".into(),
            decision_notes: Some("All technical conditions met".into()),
            decided_date: Some(date(2024, 3, 30)),
        },
        Application {
            id: "APP-2024-004".into(),
            company_name: "Tullow Ghana Ltd".into(),
            applicant: "Efua Asante".into(),
            license_type: LicenseType::Pipeline,
            status: ApplicationStatus::Pending,
            priority: Priority::Low,
            location: "Takoradi".into(),
            submitted_date: date(2024, 3, 8),
            value: 3_400_000.0,
            description: "Gas export pipeline extension".into(),
            decision_notes: None,
            decided_date: None,
        },
        Application {
            id: "APP-2024-005".into(),
            company_name: "Volta Petroleum Services".into(),
            applicant: "Kofi Boateng".into(),
            license_type: LicenseType::Refining,
            status: ApplicationStatus::Rejected,
            priority: Priority::Medium,
            location: "Tema".into(),
            submitted_date: date(2024, 3, 22),
            value: 950_000.0,
            description: "Modular refinery operating licence".into(),
            decision_notes: Some("Environmental permit missing".into()),
            decided_date: Some(date(2024, 4, 12)),
        },
    ]
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::command::{illegal_transition, unsupported, Actionable, RecordCommand};
use crate::error::AppError;
use crate::filter::{FieldSpec, FieldValue, Filterable};
use crate::models::EntityKind;
use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum VisaStatus {
    Pending,
    Approved,
    Rejected,
    Expired,
}

impl VisaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Expired => "Expired",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum VisaType {
    #[serde(rename = "Work Permit")]
    WorkPermit,
    #[serde(rename = "Residence Permit")]
    ResidencePermit,
    #[serde(rename = "Business Visa")]
    BusinessVisa,
}

impl VisaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WorkPermit => "Work Permit",
            Self::ResidencePermit => "Residence Permit",
            Self::BusinessVisa => "Business Visa",
        }
    }
}

/// Expatriate quota / visa request filed by an operator for foreign staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ExpatriateVisa {
    pub id: String,
    pub applicant_name: String,
    pub company_name: String,
    pub position: String,
    pub nationality: String,
    pub visa_type: VisaType,
    pub status: VisaStatus,
    pub submitted_date: NaiveDate,
    pub expiry_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_notes: Option<String>,
}

impl Filterable for ExpatriateVisa {
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::Text {
            key: "search_term",
            fields: &["id", "applicant_name", "company_name", "position"],
        },
        FieldSpec::Exact { key: "status", field: "status" },
        FieldSpec::Exact { key: "visa_type", field: "visa_type" },
        FieldSpec::Exact {
            key: "nationality",
            field: "nationality",
        },
        FieldSpec::DateRange {
            from: "date_from",
            to: "date_to",
            field: "submitted_date",
        },
        FieldSpec::DateRange {
            from: "expires_from",
            to: "expires_to",
            field: "expiry_date",
        },
    ];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Text(&self.id)),
            "applicant_name" => Some(FieldValue::Text(&self.applicant_name)),
            "company_name" => Some(FieldValue::Text(&self.company_name)),
            "position" => Some(FieldValue::Text(&self.position)),
            "nationality" => Some(FieldValue::Text(&self.nationality)),
            "status" => Some(FieldValue::Text(self.status.as_str())),
            "visa_type" => Some(FieldValue::Text(self.visa_type.as_str())),
            "submitted_date" => Some(FieldValue::Date(self.submitted_date)),
            "expiry_date" => Some(FieldValue::Date(self.expiry_date)),
            _ => None,
        }
    }
}

impl Record for ExpatriateVisa {
    const KIND: EntityKind = EntityKind::Visa;

    fn id(&self) -> &str {
        &self.id
    }

    fn status_label(&self) -> &'static str {
        self.status.as_str()
    }

    fn title(&self) -> String {
        format!("{} · {}", self.applicant_name, self.position)
    }

    fn subtitle(&self) -> String {
        format!(
            "{} for {} · {}",
            self.visa_type.as_str(),
            self.company_name,
            self.status.as_str()
        )
    }
}

impl Actionable for ExpatriateVisa {
    fn apply(&mut self, command: &RecordCommand, _today: NaiveDate) -> Result<(), AppError> {
        let (next, notes) = match command {
            RecordCommand::Approve(c) => (VisaStatus::Approved, c.notes.clone()),
            RecordCommand::Reject(c) => (VisaStatus::Rejected, Some(c.reason.trim().to_string())),
            _ => return Err(unsupported::<Self>(command)),
        };
        if self.status != VisaStatus::Pending {
            return Err(illegal_transition(self, command));
        }
        self.status = next;
        self.decision_notes = notes;
        Ok(())
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn mock_visas() -> Vec<ExpatriateVisa> {
    vec![
        ExpatriateVisa {
            id: "VISA-2024-001".into(),
            applicant_name: "James Whitfield".into(),
            company_name: "Tullow Ghana Ltd".into(),
            position: "Subsea Engineer".into(),
            nationality: "British".into(),
            visa_type: VisaType::WorkPermit,
            status: VisaStatus::Pending,
            submitted_date: date(2024, 2, 20),
            expiry_date: date(2026, 2, 19),
            decision_notes: None,
        },
        ExpatriateVisa {
            id: "VISA-2024-002".into(),
            applicant_name: "Ingrid Solberg".into(),
            company_name: "Offshore Dynamics".into(),
            position: "Drilling Superintendent".into(),
            nationality: "Norwegian".into(),
            visa_type: VisaType::ResidencePermit,
            status: VisaStatus::Approved,
            submitted_date: date(2024, 1, 8),
            expiry_date: date(2025, 1, 7),
            decision_notes: Some("Local understudy named".into()),
        },
        ExpatriateVisa {
            id: "VISA-2024-003".into(),
            applicant_name: "Chinedu Okafor".into(),
            company_name: "TechDrill Solutions Ltd".into(),
            position: "Mud Logger".into(),
            nationality: "Nigerian".into(),
            visa_type: VisaType::WorkPermit,
            status: VisaStatus::Pending,
            submitted_date: date(2024, 3, 11),
            expiry_date: date(2025, 3, 10),
            decision_notes: None,
        },
        ExpatriateVisa {
            id: "VISA-2023-014".into(),
            applicant_name: "Marc Dubois".into(),
            company_name: "Global Energy Corp".into(),
            position: "Commercial Director".into(),
            nationality: "French".into(),
            visa_type: VisaType::BusinessVisa,
            status: VisaStatus::Expired,
            submitted_date: date(2023, 6, 2),
            expiry_date: date(2023, 12, 31),
            decision_notes: None,
        },
    ]
}

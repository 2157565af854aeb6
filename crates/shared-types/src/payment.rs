use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::command::{illegal_transition, unsupported, Actionable, RecordCommand};
use crate::error::AppError;
use crate::filter::{FieldSpec, FieldValue, Filterable};
use crate::models::EntityKind;
use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum PaymentStatus {
    Pending,
    Paid,
    Overdue,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
            Self::Overdue => "Overdue",
            Self::Failed => "Failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum PaymentCategory {
    #[serde(rename = "License Fee")]
    LicenseFee,
    #[serde(rename = "Permit Fee")]
    PermitFee,
    #[serde(rename = "Renewal Fee")]
    RenewalFee,
    Penalty,
    Levy,
}

impl PaymentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LicenseFee => "License Fee",
            Self::PermitFee => "Permit Fee",
            Self::RenewalFee => "Renewal Fee",
            Self::Penalty => "Penalty",
            Self::Levy => "Levy",
        }
    }
}

/// A fee, levy or penalty owed by an operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Payment {
    pub id: String,
    pub company_name: String,
    pub description: String,
    pub category: PaymentCategory,
    pub status: PaymentStatus,
    pub due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<NaiveDate>,
    /// Bank or receipt reference, set once paid.
    #[serde(default)]
    pub reference: String,
    pub amount: f64,
}

impl Filterable for Payment {
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::Text {
            key: "search_term",
            fields: &["id", "company_name", "reference", "description"],
        },
        FieldSpec::Exact { key: "status", field: "status" },
        FieldSpec::Exact { key: "category", field: "category" },
        FieldSpec::DateRange {
            from: "date_from",
            to: "date_to",
            field: "due_date",
        },
        FieldSpec::DateRange {
            from: "paid_from",
            to: "paid_to",
            field: "paid_date",
        },
        FieldSpec::NumberRange {
            min: "min_amount",
            max: "max_amount",
            field: "amount",
        },
    ];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Text(&self.id)),
            "company_name" => Some(FieldValue::Text(&self.company_name)),
            "description" => Some(FieldValue::Text(&self.description)),
            "reference" => Some(FieldValue::Text(&self.reference)),
            "status" => Some(FieldValue::Text(self.status.as_str())),
            "category" => Some(FieldValue::Text(self.category.as_str())),
            "due_date" => Some(FieldValue::Date(self.due_date)),
            "paid_date" => self.paid_date.map(FieldValue::Date),
            "amount" => Some(FieldValue::Number(self.amount)),
            _ => None,
        }
    }
}

impl Record for Payment {
    const KIND: EntityKind = EntityKind::Payment;

    fn id(&self) -> &str {
        &self.id
    }

    fn status_label(&self) -> &'static str {
        self.status.as_str()
    }

    fn numeric_value(&self) -> Option<f64> {
        Some(self.amount)
    }

    fn title(&self) -> String {
        format!("{} · {}", self.company_name, self.category.as_str())
    }

    fn subtitle(&self) -> String {
        format!("{:.2} due {} · {}", self.amount, self.due_date, self.status.as_str())
    }
}

impl Actionable for Payment {
    fn apply(&mut self, command: &RecordCommand, today: NaiveDate) -> Result<(), AppError> {
        let RecordCommand::MarkPaid(paid) = command else {
            return Err(unsupported::<Self>(command));
        };
        if !matches!(self.status, PaymentStatus::Pending | PaymentStatus::Overdue) {
            return Err(illegal_transition(self, command));
        }
        self.status = PaymentStatus::Paid;
        self.paid_date = Some(today);
        self.reference = paid.reference.trim().to_string();
        Ok(())
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// Seed payments for the finance dashboard.
pub fn mock_payments() -> Vec<Payment> {
    vec![
        Payment {
            id: "PAY-2024-001".into(),
            company_name: "Offshore Dynamics".into(),
            description: "Production licence fee".into(),
            category: PaymentCategory::LicenseFee,
            status: PaymentStatus::Paid,
            due_date: date(2024, 4, 30),
            paid_date: Some(date(2024, 4, 18)),
            reference: "GCB-771203".into(),
            amount: 150_000.0,
        },
        Payment {
            id: "PAY-2024-002".into(),
            company_name: "TechDrill Solutions Ltd".into(),
            description: "Drilling permit processing fee".into(),
            category: PaymentCategory::PermitFee,
            status: PaymentStatus::Pending,
            due_date: date(2024, 5, 15),
            paid_date: None,
            reference: String::new(),
            amount: 25_000.0,
        },
        Payment {
            id: "PAY-2024-003".into(),
            company_name: "Tullow Ghana Ltd".into(),
            description: "Annual petroleum levy".into(),
            category: PaymentCategory::Levy,
            status: PaymentStatus::Overdue,
            due_date: date(2024, 3, 31),
            paid_date: None,
            reference: String::new(),
            amount: 480_000.0,
        },
        Payment {
            id: "PAY-2024-004".into(),
            company_name: "Volta Petroleum Services".into(),
            description: "Late local content filing penalty".into(),
            category: PaymentCategory::Penalty,
            status: PaymentStatus::Failed,
            due_date: date(2024, 4, 10),
            paid_date: None,
            reference: String::new(),
            amount: 12_500.0,
        },
        Payment {
            id: "PAY-2024-005".into(),
            company_name: "Global Energy Corp".into(),
            description: "Exploration licence renewal".into(),
            category: PaymentCategory::RenewalFee,
            status: PaymentStatus::Paid,
            due_date: date(2024, 2, 28),
            paid_date: Some(date(2024, 2, 28)),
            reference: "ECO-552190".into(),
            amount: 60_000.0,
        },
    ]
}

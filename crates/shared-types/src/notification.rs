use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::command::{illegal_transition, unsupported, Actionable, RecordCommand};
use crate::error::AppError;
use crate::filter::{FieldSpec, FieldValue, Filterable};
use crate::models::EntityKind;
use crate::record::{Priority, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum NotificationStatus {
    Unread,
    Read,
    Archived,
}

impl NotificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unread => "Unread",
            Self::Read => "Read",
            Self::Archived => "Archived",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum NotificationCategory {
    Application,
    Payment,
    Inspection,
    Compliance,
    System,
}

impl NotificationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Application => "Application",
            Self::Payment => "Payment",
            Self::Inspection => "Inspection",
            Self::Compliance => "Compliance",
            Self::System => "System",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub category: NotificationCategory,
    pub status: NotificationStatus,
    pub priority: Priority,
    pub created_date: NaiveDate,
}

impl Filterable for Notification {
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::Text {
            key: "search_term",
            fields: &["title", "message"],
        },
        FieldSpec::Exact { key: "status", field: "status" },
        FieldSpec::Exact { key: "category", field: "category" },
        FieldSpec::Exact { key: "priority", field: "priority" },
        FieldSpec::DateRange {
            from: "date_from",
            to: "date_to",
            field: "created_date",
        },
    ];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Text(&self.id)),
            "title" => Some(FieldValue::Text(&self.title)),
            "message" => Some(FieldValue::Text(&self.message)),
            "status" => Some(FieldValue::Text(self.status.as_str())),
            "category" => Some(FieldValue::Text(self.category.as_str())),
            "priority" => Some(FieldValue::Text(self.priority.as_str())),
            "created_date" => Some(FieldValue::Date(self.created_date)),
            _ => None,
        }
    }
}

impl Record for Notification {
    const KIND: EntityKind = EntityKind::Notification;

    fn id(&self) -> &str {
        &self.id
    }

    fn status_label(&self) -> &'static str {
        self.status.as_str()
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn subtitle(&self) -> String {
        format!("{} · {}", self.category.as_str(), self.created_date)
    }
}

impl Actionable for Notification {
    fn apply(&mut self, command: &RecordCommand, _today: NaiveDate) -> Result<(), AppError> {
        let allowed = match command {
            RecordCommand::MarkRead => self.status == NotificationStatus::Unread,
            RecordCommand::Archive => self.status != NotificationStatus::Archived,
            _ => return Err(unsupported::<Self>(command)),
        };
        if !allowed {
            return Err(illegal_transition(self, command));
        }
        self.status = match command {
            RecordCommand::MarkRead => NotificationStatus::Read,
            _ => NotificationStatus::Archived,
        };
        Ok(())
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn mock_notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: "NOT-2024-001".into(),
            title: "New application submitted".into(),
            message: "Tullow Ghana Ltd submitted APP-2024-004 for a pipeline licence".into(),
            category: NotificationCategory::Application,
            status: NotificationStatus::Unread,
            priority: Priority::Medium,
            created_date: date(2024, 3, 20),
        },
        Notification {
            id: "NOT-2024-002".into(),
            title: "Levy overdue".into(),
            message: "PAY-2024-003 annual petroleum levy is past its due date".into(),
            category: NotificationCategory::Payment,
            status: NotificationStatus::Unread,
            priority: Priority::High,
            created_date: date(2024, 4, 1),
        },
        Notification {
            id: "NOT-2024-003".into(),
            title: "Inspection flagged".into(),
            message: "Environmental inspection at Takoradi supply base requires follow-up".into(),
            category: NotificationCategory::Inspection,
            status: NotificationStatus::Read,
            priority: Priority::High,
            created_date: date(2024, 2, 10),
        },
        Notification {
            id: "NOT-2024-004".into(),
            title: "Scheduled maintenance".into(),
            message: "The portal will be unavailable on Saturday from 22:00".into(),
            category: NotificationCategory::System,
            status: NotificationStatus::Archived,
            priority: Priority::Low,
            created_date: date(2024, 1, 5),
        },
    ]
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::UserRole;
use crate::record::Record;

#[cfg(feature = "validation")]
use validator::Validate;

/// Payload of an approve action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct ApproveCommand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(
        feature = "validation",
        validate(length(max = 2000, message = "Notes must be at most 2000 characters"))
    )]
    pub notes: Option<String>,
}

/// Payload of a reject action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct RejectCommand {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 2000, message = "A rejection reason is required (at most 2000 characters)"))
    )]
    pub reason: String,
}

/// Payload of a mark-paid action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct MarkPaidCommand {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 64, message = "A payment reference is required (at most 64 characters)"))
    )]
    pub reference: String,
}

/// A state-changing request against a single record.
///
/// Serialized tagged by `action`, e.g.
/// `{"action":"reject","reason":"Incomplete EIA"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RecordCommand {
    Approve(ApproveCommand),
    Reject(RejectCommand),
    Withdraw,
    MarkPaid(MarkPaidCommand),
    MarkRead,
    Archive,
}

impl RecordCommand {
    pub fn action(&self) -> &'static str {
        match self {
            RecordCommand::Approve(_) => "approve",
            RecordCommand::Reject(_) => "reject",
            RecordCommand::Withdraw => "withdraw",
            RecordCommand::MarkPaid(_) => "mark_paid",
            RecordCommand::MarkRead => "mark_read",
            RecordCommand::Archive => "archive",
        }
    }

    /// Whether `role` may issue this command at all.
    pub fn permitted_for(&self, role: UserRole) -> bool {
        match self {
            RecordCommand::Approve(_) | RecordCommand::Reject(_) => matches!(
                role,
                UserRole::Officer | UserRole::Immigration | UserRole::Compliance | UserRole::Admin
            ),
            RecordCommand::Withdraw => matches!(role, UserRole::Operator | UserRole::Admin),
            RecordCommand::MarkPaid(_) => matches!(role, UserRole::Finance | UserRole::Admin),
            RecordCommand::MarkRead | RecordCommand::Archive => true,
        }
    }

    /// Payload checks that do not depend on the target record.
    pub fn check(&self) -> Result<(), AppError> {
        match self {
            RecordCommand::Reject(c) if c.reason.trim().is_empty() => Err(AppError::invalid_field(
                "reason",
                "A rejection reason is required",
            )),
            RecordCommand::MarkPaid(c) if c.reference.trim().is_empty() => Err(
                AppError::invalid_field("reference", "A payment reference is required"),
            ),
            _ => Ok(()),
        }
    }
}

#[cfg(feature = "validation")]
impl Validate for RecordCommand {
    fn validate(&self) -> Result<(), validator::ValidationErrors> {
        match self {
            RecordCommand::Approve(c) => c.validate(),
            RecordCommand::Reject(c) => c.validate(),
            RecordCommand::MarkPaid(c) => c.validate(),
            RecordCommand::Withdraw | RecordCommand::MarkRead | RecordCommand::Archive => Ok(()),
        }
    }
}

/// Outcome of an applied command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CommandResult<T> {
    pub action: String,
    pub previous_status: String,
    pub status: String,
    pub record: T,
}

/// Record types that accept [`RecordCommand`]s.
///
/// The default rejects every command; types override `apply` for the
/// actions they support.
pub trait Actionable: Record {
    /// Apply `command` in place. `today` stamps any dates the command sets.
    /// On error the record is left unchanged.
    fn apply(&mut self, command: &RecordCommand, _today: NaiveDate) -> Result<(), AppError> {
        Err(unsupported::<Self>(command))
    }
}

/// 400 for an action the record type has no meaning for.
pub fn unsupported<T: Record + ?Sized>(command: &RecordCommand) -> AppError {
    AppError::bad_request(format!(
        "Action '{}' is not supported for {} records",
        command.action(),
        T::KIND.as_str()
    ))
}

/// 409 for an action not allowed from the record's current status.
pub fn illegal_transition<T: Record + ?Sized>(record: &T, command: &RecordCommand) -> AppError {
    AppError::conflict(format!(
        "Cannot {} {} {}: status is {}",
        command.action(),
        T::KIND.as_str(),
        record.id(),
        record.status_label()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppErrorKind;

    #[test]
    fn commands_deserialize_tagged_by_action() {
        let cmd: RecordCommand =
            serde_json::from_str(r#"{"action":"reject","reason":"Missing EIA"}"#).unwrap();
        assert_eq!(
            cmd,
            RecordCommand::Reject(RejectCommand {
                reason: "Missing EIA".into()
            })
        );

        let cmd: RecordCommand = serde_json::from_str(r#"{"action":"withdraw"}"#).unwrap();
        assert_eq!(cmd, RecordCommand::Withdraw);

        let cmd: RecordCommand = serde_json::from_str(r#"{"action":"approve"}"#).unwrap();
        assert_eq!(cmd, RecordCommand::Approve(ApproveCommand::default()));
    }

    #[test]
    fn unknown_action_fails_to_parse() {
        assert!(serde_json::from_str::<RecordCommand>(r#"{"action":"issue_permit"}"#).is_err());
    }

    #[test]
    fn permissions_follow_role_duties() {
        let approve = RecordCommand::Approve(ApproveCommand::default());
        assert!(approve.permitted_for(UserRole::Officer));
        assert!(approve.permitted_for(UserRole::Admin));
        assert!(!approve.permitted_for(UserRole::Operator));
        assert!(!approve.permitted_for(UserRole::Finance));

        let paid = RecordCommand::MarkPaid(MarkPaidCommand {
            reference: "GCB-1".into(),
        });
        assert!(paid.permitted_for(UserRole::Finance));
        assert!(!paid.permitted_for(UserRole::Officer));

        assert!(RecordCommand::Withdraw.permitted_for(UserRole::Operator));
        assert!(!RecordCommand::Withdraw.permitted_for(UserRole::Compliance));

        for role in UserRole::ALL {
            assert!(RecordCommand::MarkRead.permitted_for(role));
        }
    }

    #[test]
    fn blank_reason_is_a_field_error() {
        let err = RecordCommand::Reject(RejectCommand {
            reason: "   ".into(),
        })
        .check()
        .unwrap_err();
        assert_eq!(err.kind, AppErrorKind::ValidationError);
        assert!(err.field_errors.contains_key("reason"));
    }

    #[test]
    fn blank_reference_is_a_field_error() {
        let err = RecordCommand::MarkPaid(MarkPaidCommand {
            reference: String::new(),
        })
        .check()
        .unwrap_err();
        assert!(err.field_errors.contains_key("reference"));
    }
}

use shared_types::{
    normalize_pagination, AppError, CommandResult, FilterCriteria, PaginatedResponse,
    RecordCommand, RecordStatistics, UserRole,
};

use crate::auth::jwt::Claims;
use crate::error_convert::ValidateRequest;
use crate::store::{RecordStore, Stored};

/// One page of the records matching `criteria`.
pub fn list<T: Stored>(
    store: &RecordStore,
    criteria: &FilterCriteria,
    page: Option<i64>,
    limit: Option<i64>,
) -> Result<PaginatedResponse<T>, AppError> {
    let (page, limit) = normalize_pagination(page, limit);
    let matches = T::collection(store).query(criteria)?;
    Ok(PaginatedResponse::from_all(matches, page, limit))
}

/// Dashboard counts over the records matching `criteria`.
pub fn statistics<T: Stored>(
    store: &RecordStore,
    criteria: &FilterCriteria,
) -> Result<RecordStatistics, AppError> {
    let matches = T::collection(store).query(criteria)?;
    Ok(RecordStatistics::from_records(&matches))
}

pub fn find<T: Stored>(store: &RecordStore, id: &str) -> Result<T, AppError> {
    T::collection(store)
        .find(id)?
        .ok_or_else(|| AppError::not_found(format!("{} {} not found", T::KIND.as_str(), id)))
}

/// Run `command` against record `id` on behalf of `claims`.
///
/// Checks in order: role permission (403), payload (422), record lookup
/// (404), then the record's own transition rules (400 / 409).
pub fn execute<T: Stored>(
    store: &RecordStore,
    id: &str,
    command: &RecordCommand,
    claims: &Claims,
    role: UserRole,
) -> Result<CommandResult<T>, AppError> {
    if !command.permitted_for(role) {
        return Err(AppError::forbidden(format!(
            "The {} role may not {} records",
            role.as_str(),
            command.action()
        )));
    }
    command.validate_request()?;
    command.check()?;

    let today = chrono::Utc::now().date_naive();
    let result = T::collection(store).update(id, command, today)?;

    log::info!(
        target: "permitflow::audit",
        "{} {} {}: {} -> {} by {} ({})",
        result.action,
        T::KIND.as_str(),
        id,
        result.previous_status,
        result.status,
        claims.sub,
        role.as_str()
    );
    tracing::info!(
        kind = T::KIND.as_str(),
        id,
        action = %result.action,
        status = %result.status,
        "record command applied"
    );

    Ok(result)
}

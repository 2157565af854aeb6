use shared_types::AppError;
use std::sync::PoisonError;

/// A poisoned collection lock means a writer panicked mid-update.
pub fn poisoned<G>(_: PoisonError<G>) -> AppError {
    tracing::error!("record store lock poisoned");
    AppError::internal("Record store is unavailable")
}

/// Trait for validating request DTOs before processing.
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}

use thiserror::Error;

use crate::backend::domain::models::journal_entry::EntryValidationError;
use crate::backend::domain::models::profile::ProfileValidationError;

/// Errors surfaced by domain services
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    PremiumRequired(String),

    #[error("Upstream service failed: {0}")]
    Upstream(String),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl From<EntryValidationError> for DomainError {
    fn from(err: EntryValidationError) -> Self {
        DomainError::Validation(err.to_string())
    }
}

impl From<ProfileValidationError> for DomainError {
    fn from(err: ProfileValidationError) -> Self {
        DomainError::Validation(err.to_string())
    }
}

impl From<shared::MoodError> for DomainError {
    fn from(err: shared::MoodError) -> Self {
        DomainError::Validation(err.to_string())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

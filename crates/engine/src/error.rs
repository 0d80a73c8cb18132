use liftlog_core::{CoreError, SessionId};
use liftlog_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("invalid input: {0}")]
    Invalid(#[from] CoreError),

    #[error("a session is already in progress: {active}")]
    SessionConflict { active: SessionId },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("session is not in progress: {0}")]
    SessionNotActive(String),

    #[error("config error: {0}")]
    Config(String),
}

impl EngineError {
    /// Failures of the store itself, which a caller may offer to retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage(StorageError::Sqlite(_)))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Invalid(_) | Self::Validation(_))
    }
}

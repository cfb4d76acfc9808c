use serde::{Deserialize, Serialize};

use crate::domain::a001_carton::ValidationError;

/// Result type of a use case invocation
pub type UseCaseResult<T> = Result<T, UseCaseError>;

/// Coded error value returned across the API boundary. Core operations
/// return these as values; nothing is thrown through the interaction loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UseCaseError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl UseCaseError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// User input incomplete or invalid at a commit boundary
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Delete or edit referencing a missing id
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    /// Nothing to export, or artifact materialization failed
    pub fn export(message: impl Into<String>) -> Self {
        Self::new("EXPORT_ERROR", message)
    }

    /// Storage read/write failure; in-memory state is preserved for retry
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::new("PERSISTENCE_ERROR", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

impl std::fmt::Display for UseCaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, ": {}", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for UseCaseError {}

impl From<anyhow::Error> for UseCaseError {
    fn from(err: anyhow::Error) -> Self {
        UseCaseError::internal(err.to_string())
    }
}

impl From<ValidationError> for UseCaseError {
    fn from(err: ValidationError) -> Self {
        UseCaseError::validation(err.to_string())
    }
}

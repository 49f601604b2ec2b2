//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Generation itself never fails at the domain level; these cover caller
/// input and lookups that can be rejected before a pipeline starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid app idea: {0}")]
    InvalidAppIdea(String),

    #[error("Unknown task: {0}")]
    UnknownTask(String),

    #[error("Unknown generation mode: {0}")]
    UnknownGenerationMode(String),

    #[error("Unknown output format: {0}")]
    UnknownOutputFormat(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_error_display() {
        let error = DomainError::Cancelled;
        assert_eq!(error.to_string(), "Operation cancelled");
    }

    #[test]
    fn test_is_cancelled_check() {
        assert!(DomainError::Cancelled.is_cancelled());
        assert!(!DomainError::InvalidAppIdea("short".to_string()).is_cancelled());
        assert!(!DomainError::UnknownTask("x".to_string()).is_cancelled());
    }
}

//! Structured configuration issues.
//!
//! Config loading never fails on a questionable but usable value; it reports
//! a [`ConfigIssue`] instead and lets the caller decide. `Error` issues stop
//! the binary, `Warning` issues are printed and ignored.

use std::fmt;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The configuration cannot work at all.
    Error,
    /// The configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A route names a provider id that is not configured.
    UnknownProvider,
    /// A routing key is not a task kind.
    UnknownTaskKind,
    /// A timeout of zero seconds.
    ZeroTimeout,
    /// `pipeline.generation_mode` is not html, image or hybrid.
    UnknownGenerationMode,
    /// `output.format` is not full, summary or json.
    UnknownOutputFormat,
    /// A provider is enabled but its API key variable is unset.
    MissingApiKey,
}

/// A detected issue in the loaded configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{level}: {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let issue = ConfigIssue::error(ConfigIssueCode::ZeroTimeout, "pipeline.step_timeout is 0");
        assert!(issue.is_error());
        assert_eq!(issue.to_string(), "error: pipeline.step_timeout is 0");

        let issue = ConfigIssue::warning(ConfigIssueCode::MissingApiKey, "ANTHROPIC_API_KEY unset");
        assert!(!issue.is_error());
        assert_eq!(issue.code, ConfigIssueCode::MissingApiKey);
    }
}

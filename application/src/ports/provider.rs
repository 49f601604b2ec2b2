//! Generation provider port
//!
//! Defines the interface every remote generation backend implements. A
//! provider turns a rendered prompt into a raw completion; it never
//! interprets the completion and never retries.

use async_trait::async_trait;
use thiserror::Error;
use tux_domain::{
    FailureKind, GenerationParams, GenerationTask, RawCompletion, RenderedPrompt, TaskKind,
};

/// Why a provider invocation produced no completion
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderFailure {
    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Timeout")]
    Timeout,

    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl ProviderFailure {
    /// The failure kind recorded on the attempt
    pub fn kind(&self) -> FailureKind {
        match self {
            ProviderFailure::AuthError(_) => FailureKind::ProviderAuthError,
            ProviderFailure::RateLimited(_) => FailureKind::ProviderRateLimited,
            ProviderFailure::Timeout => FailureKind::ProviderTimeout,
            ProviderFailure::Unavailable(_) => FailureKind::ProviderUnavailable,
            ProviderFailure::Malformed(_) => FailureKind::MalformedCompletion,
        }
    }
}

/// A completion plus the usage units the provider reported for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReply {
    pub completion: RawCompletion,
    /// Tokens for text models, images for image models
    pub usage_units: u64,
}

impl ProviderReply {
    pub fn new(completion: RawCompletion, usage_units: u64) -> Self {
        Self {
            completion,
            usage_units,
        }
    }
}

/// A remote generation backend
///
/// Implementations (adapters) live in the infrastructure layer. The
/// fallback ladder bounds every call with its own timeout, so adapters may
/// use a generous transport timeout.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Stable identifier, used for routing and as `generation_method`
    fn id(&self) -> &str;

    /// Whether this provider can serve a task kind at all
    fn supports(&self, _kind: TaskKind) -> bool {
        true
    }

    /// Generate one completion
    async fn invoke(
        &self,
        task: GenerationTask,
        prompt: &RenderedPrompt,
        params: &GenerationParams,
    ) -> Result<ProviderReply, ProviderFailure>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kinds() {
        assert_eq!(
            ProviderFailure::AuthError("401".into()).kind(),
            FailureKind::ProviderAuthError
        );
        assert_eq!(
            ProviderFailure::RateLimited("429".into()).kind(),
            FailureKind::ProviderRateLimited
        );
        assert_eq!(ProviderFailure::Timeout.kind(), FailureKind::ProviderTimeout);
        assert_eq!(
            ProviderFailure::Unavailable("503".into()).kind(),
            FailureKind::ProviderUnavailable
        );
        assert_eq!(
            ProviderFailure::Malformed("no choices".into()).kind(),
            FailureKind::MalformedCompletion
        );
    }

    #[test]
    fn test_failure_display() {
        assert_eq!(
            ProviderFailure::RateLimited("retry after 30s".into()).to_string(),
            "Rate limited: retry after 30s"
        );
    }
}

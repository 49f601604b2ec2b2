//! Attempt bookkeeping for the fallback ladder

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The rung that produced a task result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rung {
    Primary,
    Secondary,
    Local,
}

impl Rung {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rung::Primary => "primary",
            Rung::Secondary => "secondary",
            Rung::Local => "local",
        }
    }
}

impl std::fmt::Display for Rung {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a rung did not produce an accepted result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    ProviderAuthError,
    ProviderRateLimited,
    ProviderTimeout,
    ProviderUnavailable,
    MalformedCompletion,
    SchemaIncomplete,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::ProviderAuthError => "provider_auth_error",
            FailureKind::ProviderRateLimited => "provider_rate_limited",
            FailureKind::ProviderTimeout => "provider_timeout",
            FailureKind::ProviderUnavailable => "provider_unavailable",
            FailureKind::MalformedCompletion => "malformed_completion",
            FailureKind::SchemaIncomplete => "schema_incomplete",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of a single rung
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// The completion was accepted; `defaulted_fields` were filled from
    /// local defaults (SchemaIncomplete, recorded but not a failure)
    Accepted { defaulted_fields: Vec<String> },
    Failed { kind: FailureKind },
}

impl AttemptOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, AttemptOutcome::Accepted { .. })
    }

    pub fn failure(&self) -> Option<FailureKind> {
        match self {
            AttemptOutcome::Failed { kind } => Some(*kind),
            AttemptOutcome::Accepted { .. } => None,
        }
    }
}

/// One provider invocation made by the ladder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderAttempt {
    pub provider_id: String,
    pub rung: Rung,
    pub outcome: AttemptOutcome,
    #[serde(with = "duration_ms")]
    pub latency: Duration,
}

impl ProviderAttempt {
    pub fn accepted(
        provider_id: impl Into<String>,
        rung: Rung,
        defaulted_fields: Vec<String>,
        latency: Duration,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            rung,
            outcome: AttemptOutcome::Accepted { defaulted_fields },
            latency,
        }
    }

    pub fn failed(
        provider_id: impl Into<String>,
        rung: Rung,
        kind: FailureKind,
        latency: Duration,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            rung,
            outcome: AttemptOutcome::Failed { kind },
            latency,
        }
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_outcome_helpers() {
        let ok = ProviderAttempt::accepted("anthropic", Rung::Primary, vec![], Duration::ZERO);
        assert!(ok.outcome.is_accepted());
        assert_eq!(ok.outcome.failure(), None);

        let failed = ProviderAttempt::failed(
            "openai",
            Rung::Secondary,
            FailureKind::ProviderTimeout,
            Duration::from_millis(1500),
        );
        assert_eq!(failed.outcome.failure(), Some(FailureKind::ProviderTimeout));
    }

    #[test]
    fn test_attempt_serializes_latency_in_ms() {
        let attempt = ProviderAttempt::failed(
            "openai",
            Rung::Secondary,
            FailureKind::MalformedCompletion,
            Duration::from_millis(250),
        );
        let json = serde_json::to_value(&attempt).unwrap();
        assert_eq!(json["latency"], 250);
        assert_eq!(json["rung"], "secondary");
        assert_eq!(json["outcome"]["kind"], "malformed_completion");
    }
}

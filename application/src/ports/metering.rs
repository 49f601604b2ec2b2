//! Port for usage metering.
//!
//! Every provider attempt produces exactly one [`UsageRecord`], success or
//! not. The `record` method is synchronous and non-fallible so a slow or
//! broken sink can never affect generation; sinks swallow their own errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tux_domain::{FailureKind, GenerationTask};

/// One provider attempt, as seen by billing and cost tracking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub provider_id: String,
    /// Task label, e.g. `specification_synthesis/data_model`
    pub task: String,
    pub units: u64,
    pub latency_ms: u64,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
    pub recorded_at: DateTime<Utc>,
}

impl UsageRecord {
    /// Create a record timestamped now
    pub fn new(
        provider_id: impl Into<String>,
        task: GenerationTask,
        units: u64,
        latency: Duration,
        failure: Option<FailureKind>,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            task: task.label(),
            units,
            latency_ms: latency.as_millis() as u64,
            success: failure.is_none(),
            failure,
            recorded_at: Utc::now(),
        }
    }
}

/// Receives usage records
pub trait MeteringSink: Send + Sync {
    /// Record one attempt. Must not block on I/O for long and must not panic.
    fn record(&self, record: UsageRecord);
}

/// No-op implementation for tests and when metering is disabled.
pub struct NoMetering;

impl MeteringSink for NoMetering {
    fn record(&self, _record: UsageRecord) {}
}

//! Ladder parameters: per-rung time limits.
//!
//! [`LadderParams`] bounds every provider attempt the
//! [`FallbackLadder`](crate::use_cases::fallback_ladder::FallbackLadder)
//! makes. The local rung has no limit; it does no I/O. The worst-case
//! latency of one task is therefore the sum of the two rung timeouts.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LadderParams {
    /// Time limit for the primary provider attempt.
    pub primary_timeout: Duration,
    /// Time limit for the secondary provider attempt.
    pub secondary_timeout: Duration,
}

impl Default for LadderParams {
    fn default() -> Self {
        Self {
            primary_timeout: Duration::from_secs(60),
            secondary_timeout: Duration::from_secs(60),
        }
    }
}

impl LadderParams {
    // ==================== Builder Methods ====================

    pub fn with_primary_timeout(mut self, timeout: Duration) -> Self {
        self.primary_timeout = timeout;
        self
    }

    pub fn with_secondary_timeout(mut self, timeout: Duration) -> Self {
        self.secondary_timeout = timeout;
        self
    }

    /// Upper bound on the time a task can spend on provider rungs
    pub fn worst_case(&self) -> Duration {
        self.primary_timeout + self.secondary_timeout
    }
}

//! Metering infrastructure: usage records to files and running totals.
//!
//! Provides [`JsonlMeteringSink`] and [`CostTracker`], both implementing the
//! [`MeteringSink`] port, and [`FanoutMetering`] to feed several sinks at
//! once.

mod cost_tracker;
mod jsonl_sink;

pub use cost_tracker::{CostTracker, UsageSummary, UsageTotals};
pub use jsonl_sink::JsonlMeteringSink;

use std::sync::Arc;
use tux_application::{MeteringSink, UsageRecord};

/// Forwards every record to each inner sink, in order.
#[derive(Default)]
pub struct FanoutMetering {
    sinks: Vec<Arc<dyn MeteringSink>>,
}

impl FanoutMetering {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(mut self, sink: Arc<dyn MeteringSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl MeteringSink for FanoutMetering {
    fn record(&self, record: UsageRecord) {
        if let Some((last, rest)) = self.sinks.split_last() {
            for sink in rest {
                sink.record(record.clone());
            }
            last.record(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tux_domain::GenerationTask;

    #[test]
    fn test_fanout_reaches_every_sink() {
        let first = Arc::new(CostTracker::default());
        let second = Arc::new(CostTracker::default());
        let fanout = FanoutMetering::new()
            .with_sink(first.clone())
            .with_sink(second.clone());
        assert_eq!(fanout.len(), 2);

        fanout.record(UsageRecord::new(
            "anthropic",
            GenerationTask::QuestionGeneration,
            10,
            Duration::from_millis(5),
            None,
        ));

        assert_eq!(first.summary().total.attempts, 1);
        assert_eq!(second.summary().total.attempts, 1);
    }
}

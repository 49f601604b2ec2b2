//! In-memory usage aggregation for the end-of-run summary.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use tux_application::{MeteringSink, UsageRecord};

use crate::config::DEFAULT_RATE_PER_1K;

/// Totals for one provider or one task
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UsageTotals {
    pub attempts: u32,
    pub successes: u32,
    pub units: u64,
    pub latency_ms: u64,
    pub cost: f64,
}

impl UsageTotals {
    fn add(&mut self, record: &UsageRecord, cost: f64) {
        self.attempts += 1;
        if record.success {
            self.successes += 1;
        }
        self.units += record.units;
        self.latency_ms += record.latency_ms;
        self.cost += cost;
    }

    pub fn success_rate(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        f64::from(self.successes) / f64::from(self.attempts)
    }
}

/// Snapshot of everything recorded so far
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UsageSummary {
    pub total: UsageTotals,
    pub by_provider: BTreeMap<String, UsageTotals>,
    pub by_task: BTreeMap<String, UsageTotals>,
}

impl UsageSummary {
    pub fn is_empty(&self) -> bool {
        self.total.attempts == 0
    }
}

/// Metering sink that keeps running totals
#[derive(Default)]
pub struct CostTracker {
    rates: HashMap<String, f64>,
    summary: Mutex<UsageSummary>,
}

impl CostTracker {
    pub fn new(rates: HashMap<String, f64>) -> Self {
        Self {
            rates,
            summary: Mutex::new(UsageSummary::default()),
        }
    }

    pub fn summary(&self) -> UsageSummary {
        self.summary
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}

impl MeteringSink for CostTracker {
    fn record(&self, record: UsageRecord) {
        let rate = self
            .rates
            .get(&record.provider_id)
            .copied()
            .unwrap_or(DEFAULT_RATE_PER_1K);
        let cost = record.units as f64 / 1000.0 * rate;

        if let Ok(mut summary) = self.summary.lock() {
            summary.total.add(&record, cost);
            summary
                .by_provider
                .entry(record.provider_id.clone())
                .or_default()
                .add(&record, cost);
            summary
                .by_task
                .entry(record.task.clone())
                .or_default()
                .add(&record, cost);
        }
    }
}

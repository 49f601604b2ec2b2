//! Infrastructure layer for tux
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: HTTP generation providers, metering sinks,
//! and configuration file loading.

pub mod config;
pub mod metering;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use metering::{CostTracker, FanoutMetering, JsonlMeteringSink, UsageSummary, UsageTotals};
pub use providers::{ProviderKind, build_registry};

//! Metering configuration from TOML (`[metering]` section)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Cost per 1K usage units when a provider has no explicit rate
pub const DEFAULT_RATE_PER_1K: f64 = 0.0002;

/// Raw metering configuration from TOML
///
/// # Example
///
/// ```toml
/// [metering]
/// enabled = true
/// path = "~/.local/share/tux/usage.jsonl"
///
/// [metering.rates]
/// anthropic = 0.0008
/// replicate = 2.5      # per 1K images
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMeteringConfig {
    /// Write usage records to a JSONL file
    pub enabled: bool,
    /// JSONL path; `~` expands to the home directory
    pub path: String,
    /// Provider id → cost per 1K units
    pub rates: HashMap<String, f64>,
}

impl Default for FileMeteringConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: "tux-usage.jsonl".to_string(),
            rates: HashMap::new(),
        }
    }
}

impl FileMeteringConfig {
    pub fn rate_for(&self, provider_id: &str) -> f64 {
        self.rates
            .get(provider_id)
            .copied()
            .unwrap_or(DEFAULT_RATE_PER_1K)
    }

    /// The JSONL path with a leading `~/` expanded
    pub fn resolved_path(&self) -> PathBuf {
        match (self.path.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(&self.path),
        }
    }
}

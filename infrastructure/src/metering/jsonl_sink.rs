//! JSONL file writer for usage records.
//!
//! Each [`UsageRecord`] is serialized as a single JSON line with a `type`
//! field and the cost computed from the configured rate, appended to the
//! file via a buffered writer.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;
use tux_application::{MeteringSink, UsageRecord};

use crate::config::DEFAULT_RATE_PER_1K;

/// JSONL metering sink that appends one JSON object per attempt.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlMeteringSink {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
    rates: HashMap<String, f64>,
}

impl JsonlMeteringSink {
    /// Open (or create) the usage file at the given path in append mode.
    ///
    /// Creates parent directories if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create metering directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open metering file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
            rates: HashMap::new(),
        })
    }

    /// Provider id → cost per 1K units
    pub fn with_rates(mut self, rates: HashMap<String, f64>) -> Self {
        self.rates = rates;
        self
    }

    /// Get the path to the usage file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn cost(&self, record: &UsageRecord) -> f64 {
        let rate = self
            .rates
            .get(&record.provider_id)
            .copied()
            .unwrap_or(DEFAULT_RATE_PER_1K);
        record.units as f64 / 1000.0 * rate
    }
}

impl MeteringSink for JsonlMeteringSink {
    fn record(&self, record: UsageRecord) {
        let cost = self.cost(&record);
        let Ok(serde_json::Value::Object(mut map)) = serde_json::to_value(&record) else {
            return;
        };
        map.insert("type".to_string(), serde_json::Value::from("usage"));
        map.insert("cost".to_string(), serde_json::Value::from(cost));

        let Ok(line) = serde_json::to_string(&map) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlMeteringSink {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

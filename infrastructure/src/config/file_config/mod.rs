//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types by
//! the `to_*` / `parse_*` methods, which report questionable values as
//! [`ConfigIssue`]s instead of failing.

mod metering;
mod output;
mod pipeline;
mod providers;

pub use metering::{DEFAULT_RATE_PER_1K, FileMeteringConfig};
pub use output::FileOutputConfig;
pub use pipeline::FilePipelineConfig;
pub use providers::{
    FileAnthropicConfig, FileOpenAiConfig, FileProvidersConfig, FileReplicateConfig,
    KNOWN_PROVIDER_IDS,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tux_domain::{ConfigIssue, ConfigIssueCode, TaskKind};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Provider credentials and per-task routing
    pub providers: FileProvidersConfig,
    /// Ladder timeouts and generation mode
    pub pipeline: FilePipelineConfig,
    /// Usage metering
    pub metering: FileMeteringConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

/// Raised when validation finds at least one error-severity issue
#[derive(Error, Debug)]
#[error("{count} configuration error(s): {summary}")]
pub struct ConfigValidationError {
    pub count: usize,
    pub summary: String,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// API key presence is read from the process environment.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        self.validate_with_env(|name| std::env::var(name).is_ok_and(|v| !v.is_empty()))
    }

    /// Same as [`validate`](Self::validate) with an injectable env lookup.
    pub fn validate_with_env(&self, has_env: impl Fn(&str) -> bool) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Route targets
        for id in self.providers.routed_ids() {
            if !KNOWN_PROVIDER_IDS.contains(&id.as_str()) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::UnknownProvider,
                    format!(
                        "providers: unknown provider '{id}' (expected one of {})",
                        KNOWN_PROVIDER_IDS.join(", ")
                    ),
                ));
            }
        }

        // 2. Route keys
        let mut keys: Vec<&String> = self.providers.routing.keys().collect();
        keys.sort();
        for key in keys {
            if key.parse::<TaskKind>().is_err() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::UnknownTaskKind,
                    format!("providers.routing: '{key}' is not a task kind"),
                ));
            }
        }

        // 3. Timeouts and enums
        if self.providers.request_timeout_seconds == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroTimeout,
                "providers.request_timeout_seconds is 0, using the client default",
            ));
        }
        issues.extend(self.pipeline.to_ladder_params().1);
        issues.extend(self.pipeline.to_pipeline_params().1);
        issues.extend(self.output.parse_format().1);

        // 4. Credentials for routed providers
        let routed: Vec<&String> = self.providers.routed_ids().collect();
        let is_routed = |id: &str| routed.iter().any(|r| r.as_str() == id);
        let p = &self.providers;
        let credentials = [
            (
                "anthropic",
                p.anthropic.enabled && p.anthropic.api_key.is_none(),
                p.anthropic.api_key_env.as_str(),
            ),
            (
                "openai",
                p.openai.enabled && p.openai.require_api_key && p.openai.api_key.is_none(),
                p.openai.api_key_env.as_str(),
            ),
            (
                "replicate",
                p.replicate.enabled && p.replicate.api_token.is_none(),
                p.replicate.api_token_env.as_str(),
            ),
        ];
        for (id, needs_env, env) in credentials {
            if is_routed(id) && needs_env && !has_env(env) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::MissingApiKey,
                    format!("providers.{id}: ${env} is not set, provider will be skipped"),
                ));
            }
        }

        issues
    }

    /// Validate and split the result: warnings on success, an error when
    /// any issue is fatal.
    pub fn check(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let issues = self.validate();
        let errors: Vec<&ConfigIssue> = issues.iter().filter(|i| i.is_error()).collect();
        if errors.is_empty() {
            return Ok(issues);
        }
        Err(ConfigValidationError {
            count: errors.len(),
            summary: errors
                .iter()
                .map(|i| i.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[providers]
default = ["anthropic", "openai"]

[providers.routing]
image_mockup = ["replicate"]

[pipeline]
primary_timeout_seconds = 30
generation_mode = "hybrid"

[metering]
enabled = true

[output]
format = "full"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.providers.default.len(), 2);
        assert_eq!(config.pipeline.primary_timeout_seconds, 30);
        assert_eq!(config.pipeline.secondary_timeout_seconds, 60);
        assert!(config.metering.enabled);
        assert!(!config.output.color);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate_with_env(|_| false).is_empty());
    }

    #[test]
    fn test_validate_unknown_ids() {
        let toml_str = r#"
[providers]
default = ["bedrock"]

[providers.routing]
screen_design = ["openai"]
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate_with_env(|_| true);
        let codes: Vec<_> = issues.iter().map(|i| i.code).collect();
        assert_eq!(
            codes,
            vec![ConfigIssueCode::UnknownProvider, ConfigIssueCode::UnknownTaskKind]
        );
        assert!(issues.iter().all(|i| i.is_error()));
    }

    #[test]
    fn test_validate_missing_keys_only_for_routed() {
        let toml_str = r#"
[providers]
default = ["anthropic"]
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate_with_env(|_| false);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::MissingApiKey);
        assert!(issues[0].message.contains("ANTHROPIC_API_KEY"));

        assert!(config.validate_with_env(|_| true).is_empty());
    }

    #[test]
    fn test_validate_local_openai_needs_no_key() {
        let toml_str = r#"
[providers]
default = ["openai"]

[providers.openai]
require_api_key = false
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate_with_env(|_| false).is_empty());
    }
}

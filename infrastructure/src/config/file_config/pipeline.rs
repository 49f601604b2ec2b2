//! Pipeline configuration from TOML (`[pipeline]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tux_application::{LadderParams, PipelineParams};
use tux_domain::{ConfigIssue, ConfigIssueCode, DEFAULT_IMAGE_STYLE, GenerationMode};

/// Raw pipeline configuration from TOML
///
/// # Example
///
/// ```toml
/// [pipeline]
/// primary_timeout_seconds = 60
/// secondary_timeout_seconds = 30
/// step_timeout_seconds = 180
/// generation_mode = "hybrid"        # "html", "image" or "hybrid"
/// image_style = "modern ui"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePipelineConfig {
    pub primary_timeout_seconds: u64,
    pub secondary_timeout_seconds: u64,
    /// Deadline per pipeline step; unset means none
    pub step_timeout_seconds: Option<u64>,
    pub generation_mode: String,
    pub image_style: String,
}

impl Default for FilePipelineConfig {
    fn default() -> Self {
        Self {
            primary_timeout_seconds: 60,
            secondary_timeout_seconds: 60,
            step_timeout_seconds: None,
            generation_mode: "html".to_string(),
            image_style: DEFAULT_IMAGE_STYLE.to_string(),
        }
    }
}

impl FilePipelineConfig {
    /// Build ladder parameters; zero timeouts are reported and replaced by
    /// the defaults.
    pub fn to_ladder_params(&self) -> (LadderParams, Vec<ConfigIssue>) {
        let defaults = LadderParams::default();
        let mut issues = Vec::new();
        let mut timeout = |field: &str, seconds: u64, fallback: Duration| {
            if seconds == 0 {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::ZeroTimeout,
                    format!(
                        "pipeline.{field} is 0, using {}s",
                        fallback.as_secs()
                    ),
                ));
                fallback
            } else {
                Duration::from_secs(seconds)
            }
        };
        let params = LadderParams::default()
            .with_primary_timeout(timeout(
                "primary_timeout_seconds",
                self.primary_timeout_seconds,
                defaults.primary_timeout,
            ))
            .with_secondary_timeout(timeout(
                "secondary_timeout_seconds",
                self.secondary_timeout_seconds,
                defaults.secondary_timeout,
            ));
        (params, issues)
    }

    /// Parse generation_mode, returning warnings on failure.
    pub fn parse_generation_mode(&self) -> (GenerationMode, Vec<ConfigIssue>) {
        match self.generation_mode.parse::<GenerationMode>() {
            Ok(mode) => (mode, vec![]),
            Err(_) => (
                GenerationMode::default(),
                vec![ConfigIssue::warning(
                    ConfigIssueCode::UnknownGenerationMode,
                    format!(
                        "pipeline.generation_mode: unknown value '{}', falling back to 'html'",
                        self.generation_mode
                    ),
                )],
            ),
        }
    }

    pub fn to_pipeline_params(&self) -> (PipelineParams, Vec<ConfigIssue>) {
        let (mode, mut issues) = self.parse_generation_mode();
        let step_timeout = match self.step_timeout_seconds {
            Some(0) => {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::ZeroTimeout,
                    "pipeline.step_timeout_seconds is 0, steps will have no deadline",
                ));
                None
            }
            other => other.map(Duration::from_secs),
        };
        let params = PipelineParams::default()
            .with_generation_mode(mode)
            .with_image_style(self.image_style.clone())
            .with_step_timeout(step_timeout);
        (params, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_convert_cleanly() {
        let config = FilePipelineConfig::default();
        let (ladder, issues) = config.to_ladder_params();
        assert!(issues.is_empty());
        assert_eq!(ladder, LadderParams::default());
        let (pipeline, issues) = config.to_pipeline_params();
        assert!(issues.is_empty());
        assert_eq!(pipeline, PipelineParams::default());
    }

    #[test]
    fn test_zero_timeouts_reported() {
        let config = FilePipelineConfig {
            primary_timeout_seconds: 0,
            step_timeout_seconds: Some(0),
            ..Default::default()
        };
        let (ladder, issues) = config.to_ladder_params();
        assert_eq!(ladder.primary_timeout, Duration::from_secs(60));
        assert_eq!(issues[0].code, ConfigIssueCode::ZeroTimeout);
        let (pipeline, issues) = config.to_pipeline_params();
        assert!(pipeline.step_timeout.is_none());
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn test_unknown_mode_falls_back() {
        let config = FilePipelineConfig {
            generation_mode: "video".to_string(),
            ..Default::default()
        };
        let (mode, issues) = config.parse_generation_mode();
        assert_eq!(mode, GenerationMode::Html);
        assert_eq!(issues[0].code, ConfigIssueCode::UnknownGenerationMode);
    }

    #[test]
    fn test_custom_values() {
        let config = FilePipelineConfig {
            secondary_timeout_seconds: 15,
            step_timeout_seconds: Some(90),
            generation_mode: "hybrid".to_string(),
            image_style: "dark mode".to_string(),
            ..Default::default()
        };
        let (ladder, _) = config.to_ladder_params();
        assert_eq!(ladder.secondary_timeout, Duration::from_secs(15));
        let (pipeline, _) = config.to_pipeline_params();
        assert_eq!(pipeline.generation_mode, GenerationMode::Hybrid);
        assert_eq!(pipeline.image_style, "dark mode");
        assert_eq!(pipeline.step_timeout, Some(Duration::from_secs(90)));
    }
}

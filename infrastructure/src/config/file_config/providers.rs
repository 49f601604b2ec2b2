//! Provider configuration from TOML (`[providers]` section)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Provider ids the binary knows how to build
pub const KNOWN_PROVIDER_IDS: &[&str] = &["anthropic", "openai", "replicate"];

/// Anthropic API provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnthropicConfig {
    /// Register the provider when its API key resolves.
    pub enabled: bool,
    /// Environment variable name for the API key (default: "ANTHROPIC_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use env var instead).
    pub api_key: Option<String>,
    /// Base URL for the Anthropic API.
    pub base_url: String,
    /// Model used for every text task.
    pub model: String,
    /// Anthropic API version header.
    pub api_version: String,
}

impl Default for FileAnthropicConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.anthropic.com".to_string(),
            model: "claude-3-5-haiku-latest".to_string(),
            api_version: "2023-06-01".to_string(),
        }
    }
}

/// OpenAI-compatible chat completions provider configuration.
///
/// Also covers hosted open-model endpoints and local servers that speak the
/// same protocol; point `base_url` at them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    pub enabled: bool,
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use env var instead).
    pub api_key: Option<String>,
    /// Base URL; `/v1/chat/completions` is appended.
    pub base_url: String,
    pub model: String,
    /// Local servers usually need no key.
    pub require_api_key: bool,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4o-mini".to_string(),
            require_api_key: true,
        }
    }
}

/// Replicate prediction API configuration (image mockups).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplicateConfig {
    pub enabled: bool,
    /// Environment variable name for the API token (default: "REPLICATE_API_TOKEN").
    pub api_token_env: String,
    pub api_token: Option<String>,
    pub base_url: String,
    /// Model version hash passed to `/v1/predictions`.
    pub version: String,
    pub negative_prompt: String,
    pub num_inference_steps: u32,
    pub guidance_scale: f32,
}

impl Default for FileReplicateConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_token_env: "REPLICATE_API_TOKEN".to_string(),
            api_token: None,
            base_url: "https://api.replicate.com".to_string(),
            version: "39ed52f2a78e934b3ba6e2a89f5b1c712de7dfea535525255b1aa35c5565e08b"
                .to_string(),
            negative_prompt: "blurry, low quality, distorted, unrealistic, photograph, 3d render"
                .to_string(),
            num_inference_steps: 25,
            guidance_scale: 7.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Provider ids tried for tasks without an explicit route, in order.
    pub default: Vec<String>,
    /// Task kind → ordered provider ids, e.g.
    /// `screen_rendering = ["openai", "anthropic"]`.
    pub routing: HashMap<String, Vec<String>>,
    /// Transport timeout for provider HTTP clients, in seconds.
    pub request_timeout_seconds: u64,
    /// Anthropic API settings.
    pub anthropic: FileAnthropicConfig,
    /// OpenAI-compatible API settings.
    pub openai: FileOpenAiConfig,
    /// Replicate settings.
    pub replicate: FileReplicateConfig,
}

impl Default for FileProvidersConfig {
    fn default() -> Self {
        Self {
            default: Vec::new(),
            routing: HashMap::new(),
            request_timeout_seconds: 120,
            anthropic: FileAnthropicConfig::default(),
            openai: FileOpenAiConfig::default(),
            replicate: FileReplicateConfig::default(),
        }
    }
}

impl FileProvidersConfig {
    /// Every provider id referenced by a route
    pub fn routed_ids(&self) -> impl Iterator<Item = &String> {
        self.default.iter().chain(self.routing.values().flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing_deserialize() {
        let toml_str = r#"
default = ["anthropic", "openai"]

[routing]
screen_rendering = ["openai"]
image_mockup = ["replicate"]

[openai]
base_url = "http://localhost:11434"
model = "llama3.1"
require_api_key = false
"#;
        let config: FileProvidersConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default, vec!["anthropic", "openai"]);
        assert_eq!(config.routing["image_mockup"], vec!["replicate"]);
        assert_eq!(config.openai.model, "llama3.1");
        assert!(!config.openai.require_api_key);
        // Untouched sections keep defaults
        assert_eq!(config.anthropic.api_key_env, "ANTHROPIC_API_KEY");
        assert_eq!(config.replicate.num_inference_steps, 25);
        assert_eq!(config.routed_ids().count(), 4);
    }
}

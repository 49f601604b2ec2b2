//! Provider adapters and registry assembly
//!
//! Each adapter implements [`GenerationProvider`] over one remote API.
//! [`build_registry`] turns the `[providers]` config section into a
//! [`ProviderRegistry`], skipping providers whose credentials are missing.

pub mod anthropic;
pub mod http;
pub mod openai;
pub mod replicate;

pub use anthropic::{ANTHROPIC_PROVIDER_ID, AnthropicProvider};
pub use http::resolve_api_key;
pub use openai::{OPENAI_PROVIDER_ID, OpenAiProvider};
pub use replicate::{REPLICATE_PROVIDER_ID, ReplicateProvider, ReplicateSettings};

use crate::config::FileProvidersConfig;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tux_application::{GenerationProvider, ProviderFailure, ProviderRegistry};
use tux_domain::TaskKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Anthropic,
    OpenAi,
    Replicate,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [
        ProviderKind::Anthropic,
        ProviderKind::OpenAi,
        ProviderKind::Replicate,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => ANTHROPIC_PROVIDER_ID,
            ProviderKind::OpenAi => OPENAI_PROVIDER_ID,
            ProviderKind::Replicate => REPLICATE_PROVIDER_ID,
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.id() == s.trim().to_lowercase())
            .ok_or_else(|| format!("unknown provider '{}'", s))
    }
}

/// Build one provider from config.
///
/// `Ok(None)` means the provider is disabled or has no credentials.
fn build_provider(
    kind: ProviderKind,
    config: &FileProvidersConfig,
) -> Result<Option<Arc<dyn GenerationProvider>>, ProviderFailure> {
    let timeout = Duration::from_secs(config.request_timeout_seconds);
    let provider: Arc<dyn GenerationProvider> = match kind {
        ProviderKind::Anthropic => {
            let c = &config.anthropic;
            let Some(key) = c
                .enabled
                .then(|| resolve_api_key(c.api_key.as_deref(), &c.api_key_env))
                .flatten()
            else {
                return Ok(None);
            };
            Arc::new(AnthropicProvider::new(
                key,
                &c.base_url,
                &c.model,
                &c.api_version,
                timeout,
            )?)
        }
        ProviderKind::OpenAi => {
            let c = &config.openai;
            if !c.enabled {
                return Ok(None);
            }
            let key = resolve_api_key(c.api_key.as_deref(), &c.api_key_env);
            if key.is_none() && c.require_api_key {
                return Ok(None);
            }
            Arc::new(OpenAiProvider::new(key, &c.base_url, &c.model, timeout)?)
        }
        ProviderKind::Replicate => {
            let c = &config.replicate;
            let Some(token) = c
                .enabled
                .then(|| resolve_api_key(c.api_token.as_deref(), &c.api_token_env))
                .flatten()
            else {
                return Ok(None);
            };
            let settings = ReplicateSettings {
                version: c.version.clone(),
                negative_prompt: c.negative_prompt.clone(),
                num_inference_steps: c.num_inference_steps,
                guidance_scale: c.guidance_scale,
            };
            Arc::new(ReplicateProvider::new(token, &c.base_url, settings, timeout)?)
        }
    };
    Ok(Some(provider))
}

/// Assemble the provider registry from config.
///
/// Providers without credentials are skipped with an info log, so a config
/// with no keys at all yields an empty registry and a fully local run.
pub fn build_registry(config: &FileProvidersConfig) -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();

    for kind in ProviderKind::ALL {
        match build_provider(kind, config) {
            Ok(Some(provider)) => {
                info!(provider = kind.id(), "Provider registered");
                registry = registry.register(provider);
            }
            Ok(None) => info!(
                provider = kind.id(),
                "Provider not available (disabled or no credentials)"
            ),
            Err(e) => warn!(provider = kind.id(), "Provider could not be built: {}", e),
        }
    }

    for (key, ids) in &config.routing {
        match key.parse::<TaskKind>() {
            Ok(kind) => registry = registry.with_route(kind, ids.clone()),
            Err(e) => warn!("Ignoring route '{}': {}", key, e),
        }
    }

    if !config.default.is_empty() {
        registry = registry.with_default_route(config.default.clone());
    }

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileConfig;

    fn providers(toml_str: &str) -> FileProvidersConfig {
        toml::from_str::<FileConfig>(toml_str).unwrap().providers
    }

    #[test]
    fn test_provider_kind_from_str() {
        assert_eq!("OpenAI".parse::<ProviderKind>(), Ok(ProviderKind::OpenAi));
        assert!("bedrock".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_direct_keys_register_providers() {
        let config = providers(
            r#"
[providers.anthropic]
api_key = "sk-ant-test"

[providers.openai]
enabled = false

[providers.replicate]
api_token = "r8_test"
"#,
        );
        let registry = build_registry(&config);
        assert_eq!(registry.provider_ids(), vec!["anthropic", "replicate"]);

        let text: Vec<String> = registry
            .providers_for(TaskKind::RoleAnalysis)
            .iter()
            .map(|p| p.id().to_string())
            .collect();
        assert_eq!(text, vec!["anthropic"]);
        let images: Vec<String> = registry
            .providers_for(TaskKind::ImageMockup)
            .iter()
            .map(|p| p.id().to_string())
            .collect();
        assert_eq!(images, vec!["replicate"]);
    }

    #[test]
    fn test_keyless_local_openai_and_routes() {
        let config = providers(
            r#"
[providers]
default = ["openai"]

[providers.routing]
screen_rendering = ["openai"]
not_a_task = ["openai"]

[providers.anthropic]
enabled = false

[providers.openai]
base_url = "http://localhost:11434"
require_api_key = false

[providers.replicate]
enabled = false
"#,
        );
        let registry = build_registry(&config);
        assert_eq!(registry.provider_ids(), vec!["openai"]);
        assert_eq!(registry.providers_for(TaskKind::ScreenRendering).len(), 1);
        assert!(registry.providers_for(TaskKind::ImageMockup).is_empty());
    }

    #[test]
    fn test_disabled_everything_is_offline() {
        let config = providers(
            r#"
[providers.anthropic]
enabled = false
[providers.openai]
enabled = false
[providers.replicate]
enabled = false
"#,
        );
        assert!(build_registry(&config).is_empty());
    }
}

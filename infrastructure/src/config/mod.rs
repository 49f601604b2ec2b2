//! Configuration file loading for tux
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TUX_*` environment variables (`TUX_PIPELINE__GENERATION_MODE=image`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./tux.toml` or `./.tux.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/tux/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_RATE_PER_1K, FileAnthropicConfig, FileConfig,
    FileMeteringConfig, FileOpenAiConfig, FileOutputConfig, FilePipelineConfig,
    FileProvidersConfig, FileReplicateConfig, KNOWN_PROVIDER_IDS,
};
pub use loader::ConfigLoader;

//! Application layer for tux
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod registry;
pub mod use_cases;

// Re-export commonly used types
pub use config::{LadderParams, PipelineParams};
pub use ports::{
    metering::{MeteringSink, NoMetering, UsageRecord},
    progress::{NoProgress, PipelineProgressNotifier},
    provider::{GenerationProvider, ProviderFailure, ProviderReply},
};
pub use registry::ProviderRegistry;
pub use use_cases::fallback_ladder::{FallbackLadder, InvocationControl, TaskOutcome};
pub use use_cases::run_pipeline::{
    GenerationOrchestrator, PipelineResult, RunPipelineError, RunPipelineInput, TaskReport,
};
pub use use_cases::run_task::{RunTaskError, RunTaskInput, RunTaskUseCase};

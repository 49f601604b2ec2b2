//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`LadderParams`]: per-rung provider timeouts
//! - [`PipelineParams`]: generation mode, image style and step deadline

pub mod ladder_params;
pub mod pipeline_params;

pub use ladder_params::LadderParams;
pub use pipeline_params::PipelineParams;

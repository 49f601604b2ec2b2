//! Core domain concepts shared across all subdomains.
//!
//! - [`app_idea::AppIdea`]: a validated app idea a pipeline starts from
//! - [`category::AppCategory`]: keyword-based app classification
//! - [`task::GenerationTask`]: a unit of work for the fallback ladder
//! - [`step::PipelineStep`]: the sequential pipeline steps
//! - [`error::DomainError`]: domain-level errors

pub mod app_idea;
pub mod category;
pub mod error;
pub mod step;
pub mod string;
pub mod task;

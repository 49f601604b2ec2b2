//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod fallback_ladder;
pub mod run_pipeline;
pub mod run_task;

#[cfg(test)]
pub(crate) mod test_support;

//! Progress notification port
//!
//! Defines the interface for reporting progress while the pipeline runs.

use tux_domain::{PipelineStep, Rung};

/// Callback for progress updates during a pipeline run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain lines, nothing).
pub trait PipelineProgressNotifier: Send + Sync {
    /// Called when a step starts, with the number of tasks it will run
    fn on_step_start(&self, step: PipelineStep, total_tasks: usize);

    /// Called when one task of a step settles, with the rung that produced it
    fn on_task_complete(&self, step: PipelineStep, task: &str, rung: Rung);

    /// Called when a step completes
    fn on_step_complete(&self, step: PipelineStep);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl PipelineProgressNotifier for NoProgress {
    fn on_step_start(&self, _step: PipelineStep, _total_tasks: usize) {}
    fn on_task_complete(&self, _step: PipelineStep, _task: &str, _rung: Rung) {}
    fn on_step_complete(&self, _step: PipelineStep) {}
}

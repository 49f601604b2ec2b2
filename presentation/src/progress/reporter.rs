//! Progress reporting for pipeline runs

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use tux_application::PipelineProgressNotifier;
use tux_domain::{PipelineStep, Rung};

/// Reports progress during a pipeline run with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    step_bar: Mutex<Option<ProgressBar>>,
    fallbacks: Mutex<usize>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            step_bar: Mutex::new(None),
            fallbacks: Mutex::new(0),
        }
    }

    fn step_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn step_number(step: PipelineStep) -> usize {
        match step {
            PipelineStep::Questions => 1,
            PipelineStep::RoleAnalysis => 2,
            PipelineStep::Specification => 3,
            PipelineStep::ScreenRendering => 4,
            PipelineStep::Mockups => 5,
        }
    }

    fn rung_marker(rung: Rung) -> String {
        match rung {
            Rung::Primary => "v".green().to_string(),
            Rung::Secondary => "~".yellow().to_string(),
            Rung::Local => "L".magenta().to_string(),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineProgressNotifier for ProgressReporter {
    fn on_step_start(&self, step: PipelineStep, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::step_style());
        pb.set_prefix(format!(
            "Step {}: {}",
            Self::step_number(step),
            step.display_name()
        ));
        pb.set_message("Starting...");

        if let Ok(mut bar) = self.step_bar.lock() {
            *bar = Some(pb);
        }
        if let Ok(mut fallbacks) = self.fallbacks.lock() {
            *fallbacks = 0;
        }
    }

    fn on_task_complete(&self, _step: PipelineStep, task: &str, rung: Rung) {
        if rung == Rung::Local
            && let Ok(mut fallbacks) = self.fallbacks.lock()
        {
            *fallbacks += 1;
        }
        if let Ok(bar) = self.step_bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.set_message(format!("{} {}", Self::rung_marker(rung), task));
            pb.inc(1);
        }
    }

    fn on_step_complete(&self, step: PipelineStep) {
        let fallbacks = self.fallbacks.lock().map(|f| *f).unwrap_or(0);
        if let Ok(mut bar) = self.step_bar.lock()
            && let Some(pb) = bar.take()
        {
            let done = format!("Step {} complete!", Self::step_number(step));
            if fallbacks == 0 {
                pb.finish_with_message(done.green().to_string());
            } else {
                pb.finish_with_message(format!(
                    "{} {}",
                    done.green(),
                    format!("({} local)", fallbacks).yellow()
                ));
            }
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl PipelineProgressNotifier for SimpleProgress {
    fn on_step_start(&self, step: PipelineStep, total_tasks: usize) {
        println!(
            "{} {} ({} tasks)",
            "->".cyan(),
            step.display_name().bold(),
            total_tasks
        );
    }

    fn on_task_complete(&self, _step: PipelineStep, task: &str, rung: Rung) {
        println!(
            "  {} {} {}",
            ProgressReporter::rung_marker(rung),
            task,
            format!("({})", rung.as_str()).dimmed()
        );
    }

    fn on_step_complete(&self, _step: PipelineStep) {
        println!();
    }
}

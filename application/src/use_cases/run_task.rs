//! Run Task use case.
//!
//! Runs a single generation task through the fallback ladder. This is the
//! external entry point for callers that want one artifact (a question
//! set, one specification facet, one screen) rather than a whole pipeline.

use crate::use_cases::fallback_ladder::{FallbackLadder, InvocationControl, TaskOutcome};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tux_domain::{AppIdea, DomainError, GenerationTask, PromptContext, ReconciledResult, ScreenSpec};

/// Errors that can occur before a task starts.
#[derive(Error, Debug)]
pub enum RunTaskError {
    #[error(transparent)]
    InvalidInput(#[from] DomainError),
}

/// Input for the [`RunTaskUseCase`] when starting from raw caller input.
#[derive(Debug, Clone)]
pub struct RunTaskInput {
    pub app_idea: String,
    pub task: GenerationTask,
    /// Screen to render, for per-screen tasks
    pub screen: Option<ScreenSpec>,
    /// Image style, for mockups
    pub style: Option<String>,
}

impl RunTaskInput {
    pub fn new(app_idea: impl Into<String>, task: GenerationTask) -> Self {
        Self {
            app_idea: app_idea.into(),
            task,
            screen: None,
            style: None,
        }
    }

    pub fn with_screen(mut self, screen: ScreenSpec) -> Self {
        self.screen = Some(screen);
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }
}

pub struct RunTaskUseCase {
    ladder: Arc<FallbackLadder>,
    cancel: CancellationToken,
}

impl RunTaskUseCase {
    pub fn new(ladder: Arc<FallbackLadder>) -> Self {
        Self {
            ladder,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Generate one artifact. Never fails; the worst case is the local one.
    pub async fn run_task(&self, task: GenerationTask, ctx: &PromptContext) -> ReconciledResult {
        self.run_task_with_report(task, ctx).await.result
    }

    /// Generate one artifact and report how it was produced
    pub async fn run_task_with_report(
        &self,
        task: GenerationTask,
        ctx: &PromptContext,
    ) -> TaskOutcome {
        let control = InvocationControl::new(self.cancel.child_token());
        self.ladder.run_with_control(task, ctx, &control).await
    }

    /// Validate raw input, then run the task
    pub async fn execute(&self, input: RunTaskInput) -> Result<TaskOutcome, RunTaskError> {
        let app_idea = AppIdea::try_new(input.app_idea)?;
        let mut ctx = PromptContext::new(app_idea);
        if let Some(screen) = input.screen {
            ctx = ctx.with_screen(screen);
        }
        if let Some(style) = input.style {
            ctx = ctx.with_style(style);
        }

        info!(task = %input.task, "Running single task");
        Ok(self.run_task_with_report(input.task, &ctx).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LadderParams;
    use crate::registry::ProviderRegistry;
    use crate::use_cases::test_support::{INSIGHTS_JSON, ScriptedProvider};
    use tux_domain::{LOCAL_GENERATION_METHOD, Rung, SynthesisFacet};

    #[tokio::test]
    async fn test_invalid_app_idea_rejected() {
        let use_case = RunTaskUseCase::new(Arc::new(FallbackLadder::offline()));
        let err = use_case
            .execute(RunTaskInput::new("   short  ", GenerationTask::RoleAnalysis))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RunTaskError::InvalidInput(DomainError::InvalidAppIdea(_))
        ));
    }

    #[tokio::test]
    async fn test_run_task_uses_provider() {
        let registry =
            ProviderRegistry::new().register(ScriptedProvider::replying("anthropic", INSIGHTS_JSON));
        let ladder = FallbackLadder::new(Arc::new(registry), LadderParams::default());
        let use_case = RunTaskUseCase::new(Arc::new(ladder));

        let outcome = use_case
            .execute(RunTaskInput::new(
                "A pet-sitting marketplace",
                GenerationTask::RoleAnalysis,
            ))
            .await
            .unwrap();
        assert_eq!(outcome.rung, Rung::Primary);
        assert_eq!(
            outcome.result.into_role_insights().unwrap().designer,
            "Trust signals up front."
        );
    }

    #[tokio::test]
    async fn test_run_task_offline_screen() {
        let use_case = RunTaskUseCase::new(Arc::new(FallbackLadder::offline()));
        let outcome = use_case
            .execute(
                RunTaskInput::new("A pet-sitting marketplace", GenerationTask::ScreenRendering)
                    .with_screen(ScreenSpec::named("Sitter Profile")),
            )
            .await
            .unwrap();
        let layout = outcome.result.into_screen_layout().unwrap();
        assert_eq!(layout.screen_name, "Sitter Profile");
        assert_eq!(layout.generation_method, LOCAL_GENERATION_METHOD);
    }

    #[tokio::test]
    async fn test_cancelled_use_case_generates_locally() {
        let primary = ScriptedProvider::replying("anthropic", INSIGHTS_JSON);
        let registry = ProviderRegistry::new().register(primary.clone());
        let ladder = FallbackLadder::new(Arc::new(registry), LadderParams::default());
        let cancel = CancellationToken::new();
        cancel.cancel();
        let use_case = RunTaskUseCase::new(Arc::new(ladder)).with_cancellation(cancel);

        let ctx = PromptContext::new(AppIdea::try_new("A pet-sitting marketplace").unwrap());
        let task = GenerationTask::SpecificationSynthesis(SynthesisFacet::DataModel);
        let result = use_case.run_task(task, &ctx).await;

        assert_eq!(result, tux_domain::local::default_result(task, &ctx.hint()));
        assert!(primary.calls().is_empty());
    }
}

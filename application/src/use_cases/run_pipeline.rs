//! Run Pipeline use case
//!
//! Orchestrates the full artifact generation flow:
//!
//! 1. Clarifying questions for the app idea
//! 2. Role analysis over the derived requirements
//! 3. UX specification, one ladder run per facet, concurrently
//! 4. Screen layouts and/or image mockups, one ladder run per screen,
//!    concurrently
//!
//! Every task goes through the [`FallbackLadder`], so no step can fail once
//! the input is valid. One screen's failure never affects its siblings.

use crate::config::PipelineParams;
use crate::ports::progress::{NoProgress, PipelineProgressNotifier};
use crate::use_cases::fallback_ladder::{FallbackLadder, InvocationControl, TaskOutcome};
use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tux_domain::{
    AppCategory, AppIdea, DomainError, GenerationMode, GenerationTask, ImageMockup, PipelineStep,
    PromptContext, ProviderAttempt, QuestionSet, Requirements, RoleInsights, Rung, ScreenLayout,
    ScreenSpec, SpecificationBuilder, SynthesisFacet, UxSpecification, local,
};

/// Errors that can occur before the pipeline starts
#[derive(Error, Debug)]
pub enum RunPipelineError {
    #[error(transparent)]
    InvalidInput(#[from] DomainError),
}

/// Input for the RunPipeline use case
#[derive(Debug, Clone)]
pub struct RunPipelineInput {
    /// The app idea, validated on execution
    pub app_idea: String,
    /// Answers keyed by question id; unanswered questions take their default
    pub answers: BTreeMap<String, String>,
}

impl RunPipelineInput {
    pub fn new(app_idea: impl Into<String>) -> Self {
        Self {
            app_idea: app_idea.into(),
            answers: BTreeMap::new(),
        }
    }

    pub fn with_answer(mut self, id: impl Into<String>, answer: impl Into<String>) -> Self {
        self.answers.insert(id.into(), answer.into());
        self
    }

    pub fn with_answers(mut self, answers: BTreeMap<String, String>) -> Self {
        self.answers.extend(answers);
        self
    }
}

/// How one task of the pipeline was produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskReport {
    pub step: PipelineStep,
    /// Task label, or the screen name for per-screen tasks
    pub task: String,
    pub rung: Rung,
    pub provider_id: String,
    pub attempts: Vec<ProviderAttempt>,
}

impl TaskReport {
    fn new(step: PipelineStep, task: impl Into<String>, outcome: &TaskOutcome) -> Self {
        Self {
            step,
            task: task.into(),
            rung: outcome.rung,
            provider_id: outcome.provider_id.clone(),
            attempts: outcome.attempts.clone(),
        }
    }
}

/// All artifacts of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineResult {
    pub app_idea: String,
    pub category: AppCategory,
    pub generation_mode: GenerationMode,
    pub questions: QuestionSet,
    pub requirements: Requirements,
    pub insights: RoleInsights,
    pub specification: UxSpecification,
    pub layouts: Vec<ScreenLayout>,
    pub mockups: Vec<ImageMockup>,
    pub reports: Vec<TaskReport>,
}

impl PipelineResult {
    /// Tasks that ended on the local rung
    pub fn fallback_count(&self) -> usize {
        self.reports.iter().filter(|r| r.rung == Rung::Local).count()
    }

    pub fn reports_for(&self, step: PipelineStep) -> impl Iterator<Item = &TaskReport> {
        self.reports.iter().filter(move |r| r.step == step)
    }
}

/// Use case for running the full generation pipeline
pub struct GenerationOrchestrator {
    ladder: Arc<FallbackLadder>,
    params: PipelineParams,
    cancel: CancellationToken,
}

impl GenerationOrchestrator {
    pub fn new(ladder: Arc<FallbackLadder>, params: PipelineParams) -> Self {
        Self {
            ladder,
            params,
            cancel: CancellationToken::new(),
        }
    }

    /// Cancelling the token makes every unfinished task generate locally
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunPipelineInput,
    ) -> Result<PipelineResult, RunPipelineError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunPipelineInput,
        progress: &dyn PipelineProgressNotifier,
    ) -> Result<PipelineResult, RunPipelineError> {
        let app_idea = AppIdea::try_new(input.app_idea)?;
        let mut ctx = PromptContext::new(app_idea.clone());
        let category = ctx.category();
        info!(category = category.as_str(), mode = %self.params.generation_mode, "Starting pipeline");

        let mut reports = Vec::new();

        // Step 1: Clarifying questions
        let (questions, report) = self.question_generation(&ctx, progress).await;
        reports.push(report);

        let requirements = Requirements::from_answers(&app_idea, &questions, &input.answers);
        ctx = ctx.with_requirements(requirements.clone());

        // Step 2: Role analysis
        let (insights, report) = self.role_analysis(&ctx, progress).await;
        reports.push(report);
        ctx = ctx.with_insights(insights.clone());

        // Step 3: Specification
        let (specification, facet_reports) = self.specification_synthesis(&ctx, progress).await;
        reports.extend(facet_reports);
        ctx = ctx.with_screen_names(specification.screens.iter().map(|s| s.name.clone()).collect());

        // Step 4: Screens
        let layouts = if self.params.generation_mode.includes_layouts() {
            let (layouts, screen_reports) = self
                .render_screens(&ctx, &specification.screens, progress)
                .await;
            reports.extend(screen_reports);
            layouts
        } else {
            debug!("Skipping screen layouts");
            Vec::new()
        };

        let mockups = if self.params.generation_mode.includes_images() {
            let (mockups, mockup_reports) = self
                .render_mockups(&ctx, &specification.screens, progress)
                .await;
            reports.extend(mockup_reports);
            mockups
        } else {
            Vec::new()
        };

        let result = PipelineResult {
            app_idea: app_idea.into_content(),
            category,
            generation_mode: self.params.generation_mode,
            questions,
            requirements,
            insights,
            specification,
            layouts,
            mockups,
            reports,
        };
        info!(
            tasks = result.reports.len(),
            fallbacks = result.fallback_count(),
            "Pipeline complete"
        );
        Ok(result)
    }

    /// Fresh limits for one step: a child of the run's token plus the step
    /// deadline, if configured
    fn step_control(&self) -> InvocationControl {
        InvocationControl::new(self.cancel.child_token())
            .with_deadline(self.params.step_timeout.map(|t| Instant::now() + t))
    }

    /// Step 1: clarifying questions for the app idea
    pub async fn question_generation(
        &self,
        ctx: &PromptContext,
        progress: &dyn PipelineProgressNotifier,
    ) -> (QuestionSet, TaskReport) {
        info!("Step 1: Clarifying questions");
        let step = PipelineStep::Questions;
        progress.on_step_start(step, 1);

        let task = GenerationTask::QuestionGeneration;
        let outcome = self
            .ladder
            .run_with_control(task, ctx, &self.step_control())
            .await;
        progress.on_task_complete(step, &task.label(), outcome.rung);
        let report = TaskReport::new(step, task.label(), &outcome);
        let questions = outcome
            .result
            .into_questions()
            .unwrap_or_else(|| local::default_questions(&ctx.hint()));

        progress.on_step_complete(step);
        (questions, report)
    }

    /// Step 2: designer, analyst and architect perspectives
    pub async fn role_analysis(
        &self,
        ctx: &PromptContext,
        progress: &dyn PipelineProgressNotifier,
    ) -> (RoleInsights, TaskReport) {
        info!("Step 2: Role analysis");
        let step = PipelineStep::RoleAnalysis;
        progress.on_step_start(step, 1);

        let task = GenerationTask::RoleAnalysis;
        let outcome = self
            .ladder
            .run_with_control(task, ctx, &self.step_control())
            .await;
        progress.on_task_complete(step, &task.label(), outcome.rung);
        let report = TaskReport::new(step, task.label(), &outcome);
        let insights = outcome
            .result
            .into_role_insights()
            .unwrap_or_else(|| local::default_insights(&ctx.hint()));

        progress.on_step_complete(step);
        (insights, report)
    }

    /// Step 3: every specification facet concurrently, merged in facet order
    pub async fn specification_synthesis(
        &self,
        ctx: &PromptContext,
        progress: &dyn PipelineProgressNotifier,
    ) -> (UxSpecification, Vec<TaskReport>) {
        info!("Step 3: UX specification");
        let step = PipelineStep::Specification;
        progress.on_step_start(step, SynthesisFacet::ALL.len());

        let control = self.step_control();
        let runs = SynthesisFacet::ALL.into_iter().map(|facet| {
            let task = GenerationTask::SpecificationSynthesis(facet);
            let control = &control;
            async move {
                let outcome = self.ladder.run_with_control(task, ctx, control).await;
                progress.on_task_complete(step, &task.label(), outcome.rung);
                outcome
            }
        });
        let outcomes = join_all(runs).await;

        let mut builder = SpecificationBuilder::new();
        let mut reports = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            reports.push(TaskReport::new(step, outcome.task.label(), &outcome));
            if let Some(fragment) = outcome.result.into_fragment()
                && !builder.merge(fragment)
            {
                debug!(task = %outcome.task, "Facet already present, fragment ignored");
            }
        }

        progress.on_step_complete(step);
        (builder.build(&ctx.hint()), reports)
    }

    /// Step 4: one HTML layout per screen, concurrently
    pub async fn render_screens(
        &self,
        ctx: &PromptContext,
        screens: &[ScreenSpec],
        progress: &dyn PipelineProgressNotifier,
    ) -> (Vec<ScreenLayout>, Vec<TaskReport>) {
        info!("Step 4: Screen layouts ({} screens)", screens.len());
        let step = PipelineStep::ScreenRendering;
        let outcomes = self
            .per_screen(GenerationTask::ScreenRendering, step, ctx, screens, progress)
            .await;

        let mut layouts = Vec::with_capacity(outcomes.len());
        let mut reports = Vec::with_capacity(outcomes.len());
        for (screen_ctx, outcome) in outcomes {
            reports.push(TaskReport::new(step, screen_name(&screen_ctx), &outcome));
            layouts.push(
                outcome
                    .result
                    .into_screen_layout()
                    .unwrap_or_else(|| local::default_layout(&screen_ctx.hint())),
            );
        }
        progress.on_step_complete(step);
        (layouts, reports)
    }

    /// Image mockups, one per screen, concurrently
    pub async fn render_mockups(
        &self,
        ctx: &PromptContext,
        screens: &[ScreenSpec],
        progress: &dyn PipelineProgressNotifier,
    ) -> (Vec<ImageMockup>, Vec<TaskReport>) {
        info!("Step 5: Image mockups ({} screens)", screens.len());
        let step = PipelineStep::Mockups;
        let styled = ctx.clone().with_style(self.params.image_style.clone());
        let outcomes = self
            .per_screen(GenerationTask::ImageMockup, step, &styled, screens, progress)
            .await;

        let mut mockups = Vec::with_capacity(outcomes.len());
        let mut reports = Vec::with_capacity(outcomes.len());
        for (screen_ctx, outcome) in outcomes {
            reports.push(TaskReport::new(step, screen_name(&screen_ctx), &outcome));
            mockups.push(
                outcome
                    .result
                    .into_image_mockup()
                    .unwrap_or_else(|| local::default_mockup(&screen_ctx.hint())),
            );
        }
        progress.on_step_complete(step);
        (mockups, reports)
    }

    /// Run one task per screen, each behind its own ladder, in screen order
    async fn per_screen(
        &self,
        task: GenerationTask,
        step: PipelineStep,
        ctx: &PromptContext,
        screens: &[ScreenSpec],
        progress: &dyn PipelineProgressNotifier,
    ) -> Vec<(PromptContext, TaskOutcome)> {
        progress.on_step_start(step, screens.len());
        let control = self.step_control();
        let runs = screens.iter().map(|screen| {
            let screen_ctx = ctx.clone().with_screen(screen.clone());
            let control = &control;
            async move {
                let outcome = self
                    .ladder
                    .run_with_control(task, &screen_ctx, control)
                    .await;
                progress.on_task_complete(step, &screen.name, outcome.rung);
                (screen_ctx, outcome)
            }
        });
        join_all(runs).await
    }
}

fn screen_name(ctx: &PromptContext) -> String {
    ctx.screen
        .as_ref()
        .map(|s| s.name.clone())
        .unwrap_or_default()
}

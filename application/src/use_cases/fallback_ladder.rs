//! Fallback ladder
//!
//! Runs one generation task through `TryPrimary → TrySecondary → TryLocal`
//! until some rung yields a result. Provider failures, timeouts and
//! unusable completions are recovered here and nowhere else; callers always
//! get a schema-complete result.
//!
//! A provider rung is skipped when the registry has no provider for it.
//! When the caller's cancellation token fires or the step deadline passes,
//! the in-flight attempt is recorded as a timeout and the ladder goes
//! straight to the local rung.

use crate::config::LadderParams;
use crate::ports::metering::{MeteringSink, NoMetering, UsageRecord};
use crate::ports::provider::{GenerationProvider, ProviderFailure};
use crate::registry::ProviderRegistry;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tux_domain::extraction::markup_fragment;
use tux_domain::{
    ContextHint, FailureKind, GenerationParams, GenerationTask, LOCAL_GENERATION_METHOD,
    PromptContext, PromptTemplate, ProviderAttempt, RawCompletion, ReconciledResult,
    Reconciliation, RenderedPrompt, Rung, extract, reconcile, reconcile_with_report,
};

/// Caller-side limits for one ladder run
#[derive(Debug, Clone, Default)]
pub struct InvocationControl {
    pub cancel: CancellationToken,
    pub deadline: Option<Instant>,
}

impl InvocationControl {
    pub fn new(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Cancelled, or past the deadline
    pub fn is_interrupted(&self) -> bool {
        self.cancel.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// The rung limit, shortened to whatever is left before the deadline
    fn budget(&self, limit: Duration) -> Duration {
        match self.deadline {
            Some(deadline) => limit.min(deadline.saturating_duration_since(Instant::now())),
            None => limit,
        }
    }
}

/// The settled result of one task
#[derive(Debug, Clone, PartialEq)]
pub struct TaskOutcome {
    pub task: GenerationTask,
    pub result: ReconciledResult,
    /// The rung that produced `result`
    pub rung: Rung,
    /// Provider id of that rung, or `local_template`
    pub provider_id: String,
    /// Every attempt in ladder order, the accepted one last
    pub attempts: Vec<ProviderAttempt>,
}

impl TaskOutcome {
    pub fn is_fallback(&self) -> bool {
        self.rung == Rung::Local
    }

    /// Top-level fields the accepted attempt had to default
    pub fn defaulted_fields(&self) -> &[String] {
        self.attempts
            .last()
            .and_then(|a| match &a.outcome {
                tux_domain::AttemptOutcome::Accepted { defaulted_fields } => {
                    Some(defaulted_fields.as_slice())
                }
                tux_domain::AttemptOutcome::Failed { .. } => None,
            })
            .unwrap_or(&[])
    }
}

enum LadderState {
    TryPrimary,
    TrySecondary,
    TryLocal,
    Done(Accepted),
}

struct Accepted {
    result: ReconciledResult,
    rung: Rung,
    provider_id: String,
}

/// Everything one provider attempt needs, rendered once per run
struct Request<'a> {
    task: GenerationTask,
    prompt: &'a RenderedPrompt,
    params: &'a GenerationParams,
    hint: &'a ContextHint,
    control: &'a InvocationControl,
}

pub struct FallbackLadder {
    registry: Arc<ProviderRegistry>,
    metering: Arc<dyn MeteringSink>,
    params: LadderParams,
}

impl FallbackLadder {
    pub fn new(registry: Arc<ProviderRegistry>, params: LadderParams) -> Self {
        Self {
            registry,
            metering: Arc::new(NoMetering),
            params,
        }
    }

    pub fn with_metering(mut self, metering: Arc<dyn MeteringSink>) -> Self {
        self.metering = metering;
        self
    }

    /// A ladder over an empty registry: local generation only
    pub fn offline() -> Self {
        Self::new(Arc::new(ProviderRegistry::offline()), LadderParams::default())
    }

    pub fn params(&self) -> &LadderParams {
        &self.params
    }

    /// Run a task with no cancellation and no deadline
    pub async fn run(&self, task: GenerationTask, ctx: &PromptContext) -> TaskOutcome {
        self.run_with_control(task, ctx, &InvocationControl::default())
            .await
    }

    pub async fn run_with_control(
        &self,
        task: GenerationTask,
        ctx: &PromptContext,
        control: &InvocationControl,
    ) -> TaskOutcome {
        let hint = ctx.hint();
        let prompt = PromptTemplate::render(task, ctx);
        let mut params = GenerationParams::for_task(task);
        if task == GenerationTask::ImageMockup {
            params = params.with_style(hint.style.clone());
        }
        let request = Request {
            task,
            prompt: &prompt,
            params: &params,
            hint: &hint,
            control,
        };

        let providers = self.registry.providers_for(task.kind());
        let mut attempts = Vec::new();
        let mut state = LadderState::TryPrimary;

        let accepted = loop {
            state = match state {
                LadderState::TryPrimary => {
                    self.try_rung(
                        &request,
                        providers.first(),
                        Rung::Primary,
                        self.params.primary_timeout,
                        LadderState::TrySecondary,
                        &mut attempts,
                    )
                    .await
                }
                LadderState::TrySecondary => {
                    self.try_rung(
                        &request,
                        providers.get(1),
                        Rung::Secondary,
                        self.params.secondary_timeout,
                        LadderState::TryLocal,
                        &mut attempts,
                    )
                    .await
                }
                LadderState::TryLocal => {
                    let started = Instant::now();
                    let mut result = reconcile(None, task, &hint);
                    result.stamp_generation_method(LOCAL_GENERATION_METHOD);
                    attempts.push(ProviderAttempt::accepted(
                        LOCAL_GENERATION_METHOD,
                        Rung::Local,
                        Vec::new(),
                        started.elapsed(),
                    ));
                    LadderState::Done(Accepted {
                        result,
                        rung: Rung::Local,
                        provider_id: LOCAL_GENERATION_METHOD.to_string(),
                    })
                }
                LadderState::Done(accepted) => break accepted,
            };
        };

        info!(
            task = %task,
            rung = accepted.rung.as_str(),
            provider = %accepted.provider_id,
            attempts = attempts.len(),
            "Task settled"
        );

        TaskOutcome {
            task,
            result: accepted.result,
            rung: accepted.rung,
            provider_id: accepted.provider_id,
            attempts,
        }
    }

    /// Try one provider rung and decide the next state
    async fn try_rung(
        &self,
        request: &Request<'_>,
        provider: Option<&Arc<dyn GenerationProvider>>,
        rung: Rung,
        limit: Duration,
        on_failure: LadderState,
        attempts: &mut Vec<ProviderAttempt>,
    ) -> LadderState {
        let Some(provider) = provider else {
            debug!(task = %request.task, rung = rung.as_str(), "No provider for rung");
            return on_failure;
        };
        if request.control.is_interrupted() {
            debug!(task = %request.task, rung = rung.as_str(), "Interrupted, skipping to local");
            return LadderState::TryLocal;
        }

        let started = Instant::now();
        let (outcome, units) = self.attempt(provider.as_ref(), request, limit).await;
        let latency = started.elapsed();

        self.metering.record(UsageRecord::new(
            provider.id(),
            request.task,
            units,
            latency,
            outcome.as_ref().err().copied(),
        ));

        match outcome {
            Ok(mut reconciliation) => {
                if !reconciliation.is_complete() {
                    warn!(
                        task = %request.task,
                        provider = provider.id(),
                        failure = FailureKind::SchemaIncomplete.as_str(),
                        defaulted = ?reconciliation.defaulted,
                        "Completion accepted with defaulted fields"
                    );
                }
                reconciliation
                    .result
                    .stamp_generation_method(provider.id());
                attempts.push(ProviderAttempt::accepted(
                    provider.id(),
                    rung,
                    reconciliation.defaulted,
                    latency,
                ));
                LadderState::Done(Accepted {
                    result: reconciliation.result,
                    rung,
                    provider_id: provider.id().to_string(),
                })
            }
            Err(kind) => {
                warn!(
                    task = %request.task,
                    provider = provider.id(),
                    rung = rung.as_str(),
                    failure = kind.as_str(),
                    latency_ms = latency.as_millis() as u64,
                    "Provider attempt failed"
                );
                attempts.push(ProviderAttempt::failed(provider.id(), rung, kind, latency));
                if request.control.is_interrupted() {
                    LadderState::TryLocal
                } else {
                    on_failure
                }
            }
        }
    }

    /// Invoke a provider within the rung budget and judge its completion.
    /// Returns the verdict and the usage units reported.
    async fn attempt(
        &self,
        provider: &dyn GenerationProvider,
        request: &Request<'_>,
        limit: Duration,
    ) -> (Result<Reconciliation, FailureKind>, u64) {
        let budget = request.control.budget(limit);
        let call = tokio::time::timeout(
            budget,
            provider.invoke(request.task, request.prompt, request.params),
        );

        let reply = tokio::select! {
            biased;
            _ = request.control.cancel.cancelled() => Err(ProviderFailure::Timeout),
            result = call => result.unwrap_or(Err(ProviderFailure::Timeout)),
        };

        match reply {
            Ok(reply) => {
                let verdict = accept(&reply.completion, request.task, request.hint)
                    .ok_or(FailureKind::MalformedCompletion);
                (verdict, reply.usage_units)
            }
            Err(failure) => (Err(failure.kind()), 0),
        }
    }
}

/// Extract and reconcile a completion, or `None` if it must be rejected.
///
/// Tasks without required structure accept a bare markup fragment.
fn accept(
    completion: &RawCompletion,
    task: GenerationTask,
    hint: &ContextHint,
) -> Option<Reconciliation> {
    let payload = extract(completion, task.expected_shape()).or_else(|| {
        if task.requires_structure() {
            None
        } else {
            completion.as_text().and_then(markup_fragment)
        }
    })?;
    Some(reconcile_with_report(Some(&payload), task, hint))
}

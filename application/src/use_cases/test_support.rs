//! Scripted providers and recording sinks shared by use case tests

use crate::ports::metering::{MeteringSink, UsageRecord};
use crate::ports::provider::{GenerationProvider, ProviderFailure, ProviderReply};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tux_domain::{GenerationParams, GenerationTask, RawCompletion, RenderedPrompt, TaskKind};

/// What a scripted provider does for one call
pub(crate) enum Script {
    Reply(RawCompletion),
    Fail(ProviderFailure),
    /// Never answer; the ladder's timeout has to fire
    Hang,
}

pub(crate) fn text(body: &str) -> Script {
    Script::Reply(RawCompletion::text(body))
}

type Rule = dyn Fn(GenerationTask, &RenderedPrompt) -> Script + Send + Sync;

/// Mock provider that answers from a rule over the task and prompt
pub(crate) struct ScriptedProvider {
    id: String,
    rule: Box<Rule>,
    image_only: bool,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub(crate) fn new(
        id: &str,
        rule: impl Fn(GenerationTask, &RenderedPrompt) -> Script + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            id: id.to_string(),
            rule: Box::new(rule),
            image_only: false,
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Same reply text for every call
    pub(crate) fn replying(id: &str, body: &'static str) -> Arc<Self> {
        Self::new(id, move |_, _| text(body))
    }

    pub(crate) fn failing(id: &str, failure: ProviderFailure) -> Arc<Self> {
        Self::new(id, move |_, _| Script::Fail(failure.clone()))
    }

    pub(crate) fn hanging(id: &str) -> Arc<Self> {
        Self::new(id, |_, _| Script::Hang)
    }

    pub(crate) fn image(id: &str, url: &'static str) -> Arc<Self> {
        Arc::new(Self {
            id: id.to_string(),
            rule: Box::new(move |_, _| Script::Reply(RawCompletion::image(url, "png"))),
            image_only: true,
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Task labels this provider was invoked for, in call order
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationProvider for ScriptedProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn supports(&self, kind: TaskKind) -> bool {
        (kind == TaskKind::ImageMockup) == self.image_only
    }

    async fn invoke(
        &self,
        task: GenerationTask,
        prompt: &RenderedPrompt,
        _params: &GenerationParams,
    ) -> Result<ProviderReply, ProviderFailure> {
        self.calls.lock().unwrap().push(task.label());
        match (self.rule)(task, prompt) {
            Script::Reply(completion) => Ok(ProviderReply::new(completion, 100)),
            Script::Fail(failure) => Err(failure),
            Script::Hang => {
                std::future::pending::<()>().await;
                Err(ProviderFailure::Timeout)
            }
        }
    }
}

/// Metering sink that keeps every record
#[derive(Default)]
pub(crate) struct RecordingMetering {
    records: Mutex<Vec<UsageRecord>>,
}

impl RecordingMetering {
    pub(crate) fn records(&self) -> Vec<UsageRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl MeteringSink for RecordingMetering {
    fn record(&self, record: UsageRecord) {
        self.records.lock().unwrap().push(record);
    }
}

pub(crate) const QUESTIONS_JSON: &str = r#"Here are your questions:
```json
[
  {"id": "sitter_vetting", "question": "How should sitters be vetted?", "type": "select",
   "options": ["Background check", "Reviews only"]},
  {"id": "booking_window", "question": "How far ahead can owners book?", "type": "text"}
]
```"#;

pub(crate) const INSIGHTS_JSON: &str = r#"{"designer": "Trust signals up front.",
 "analyst": "Repeat bookings drive revenue.",
 "architect": "Event-driven booking service."}"#;

pub(crate) const SCREEN_HTML: &str =
    "<!DOCTYPE html><html><head><title>Screen</title></head><body><main>ok</main></body></html>";

//! Replicate predictions adapter for image mockups
//!
//! Creates a prediction with `Prefer: wait` and, when the model is still
//! running after the server-side wait, polls the prediction until it reaches
//! a terminal status. The ladder's rung timeout bounds the whole exchange.

use super::http::{build_client, map_transport_error, read_json};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;
use tux_application::{GenerationProvider, ProviderFailure, ProviderReply};
use tux_domain::{GenerationParams, GenerationTask, RawCompletion, RenderedPrompt, TaskKind};

pub const REPLICATE_PROVIDER_ID: &str = "replicate";

const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Sampler settings sent with every prediction
#[derive(Debug, Clone, PartialEq)]
pub struct ReplicateSettings {
    pub version: String,
    pub negative_prompt: String,
    pub num_inference_steps: u32,
    pub guidance_scale: f32,
}

pub struct ReplicateProvider {
    client: Client,
    api_token: String,
    base_url: String,
    settings: ReplicateSettings,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    status: String,
    #[serde(default)]
    output: Value,
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    urls: PredictionUrls,
}

#[derive(Debug, Default, Deserialize)]
struct PredictionUrls {
    get: Option<String>,
}

enum PredictionState {
    Done(String),
    Pending(Option<String>),
}

impl ReplicateProvider {
    pub fn new(
        api_token: String,
        base_url: impl Into<String>,
        settings: ReplicateSettings,
        request_timeout: Duration,
    ) -> Result<Self, ProviderFailure> {
        Ok(Self {
            client: build_client(request_timeout)?,
            api_token,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            settings,
        })
    }

    fn request_body(&self, prompt: &RenderedPrompt, params: &GenerationParams) -> Value {
        json!({
            "version": self.settings.version,
            "input": {
                "prompt": prompt.user,
                "negative_prompt": self.settings.negative_prompt,
                "width": params.image_width,
                "height": params.image_height,
                "num_outputs": 1,
                "scheduler": "K_EULER",
                "num_inference_steps": self.settings.num_inference_steps,
                "guidance_scale": self.settings.guidance_scale,
                "prompt_strength": 0.8,
                "refine": "expert_ensemble_refiner",
                "high_noise_frac": 0.8,
            }
        })
    }

    async fn poll(&self, url: &str) -> Result<Prediction, ProviderFailure> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(map_transport_error)?;
        read_json(response).await
    }
}

/// First image URL of a prediction output; models return either a list or
/// a single string.
fn first_output(output: &Value) -> Option<String> {
    let url = match output {
        Value::Array(items) => items.first()?.as_str()?,
        Value::String(url) => url.as_str(),
        _ => return None,
    };
    (!url.is_empty()).then(|| url.to_string())
}

fn interpret(prediction: Prediction) -> Result<PredictionState, ProviderFailure> {
    match prediction.status.as_str() {
        "succeeded" => first_output(&prediction.output)
            .map(PredictionState::Done)
            .ok_or_else(|| ProviderFailure::Malformed("Prediction has no image output".to_string())),
        "failed" | "canceled" => Err(ProviderFailure::Unavailable(format!(
            "Prediction {}: {}",
            prediction.status,
            prediction
                .error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no error detail".to_string())
        ))),
        _ => Ok(PredictionState::Pending(prediction.urls.get)),
    }
}

fn image_format(url: &str) -> String {
    url.rsplit('.')
        .next()
        .filter(|ext| matches!(*ext, "png" | "jpg" | "jpeg" | "webp"))
        .unwrap_or("png")
        .to_string()
}

#[async_trait]
impl GenerationProvider for ReplicateProvider {
    fn id(&self) -> &str {
        REPLICATE_PROVIDER_ID
    }

    fn supports(&self, kind: TaskKind) -> bool {
        kind == TaskKind::ImageMockup
    }

    async fn invoke(
        &self,
        task: GenerationTask,
        prompt: &RenderedPrompt,
        params: &GenerationParams,
    ) -> Result<ProviderReply, ProviderFailure> {
        debug!(task = %task.label(), "Replicate prediction");
        let response = self
            .client
            .post(format!("{}/v1/predictions", self.base_url))
            .bearer_auth(&self.api_token)
            .header("Prefer", "wait")
            .json(&self.request_body(prompt, params))
            .send()
            .await
            .map_err(map_transport_error)?;

        let mut state = interpret(read_json(response).await?)?;
        loop {
            match state {
                PredictionState::Done(url) => {
                    let format = image_format(&url);
                    return Ok(ProviderReply::new(RawCompletion::image(url, format), 1));
                }
                PredictionState::Pending(None) => {
                    return Err(ProviderFailure::Malformed(
                        "Pending prediction without a poll URL".to_string(),
                    ));
                }
                PredictionState::Pending(Some(url)) => {
                    tokio::time::sleep(POLL_INTERVAL).await;
                    state = interpret(self.poll(&url).await?)?;
                }
            }
        }
    }
}

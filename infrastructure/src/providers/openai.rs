//! OpenAI-compatible chat completions adapter
//!
//! Works against any server that implements `/v1/chat/completions`,
//! including local model servers.

use super::http::{build_client, map_transport_error, read_json};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;
use tux_application::{GenerationProvider, ProviderFailure, ProviderReply};
use tux_domain::{GenerationParams, GenerationTask, RawCompletion, RenderedPrompt, TaskKind};

pub const OPENAI_PROVIDER_ID: &str = "openai";

pub struct OpenAiProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: u64,
}

impl OpenAiProvider {
    pub fn new(
        api_key: Option<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self, ProviderFailure> {
        Ok(Self {
            client: build_client(request_timeout)?,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    fn request_body(&self, prompt: &RenderedPrompt, params: &GenerationParams) -> Value {
        let mut messages = Vec::new();
        if !prompt.system.is_empty() {
            messages.push(json!({"role": "system", "content": prompt.system}));
        }
        messages.push(json!({"role": "user", "content": prompt.user}));
        json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": params.max_tokens,
            "temperature": params.temperature,
            "stream": false,
        })
    }
}

fn into_reply(response: ChatCompletionResponse) -> Result<ProviderReply, ProviderFailure> {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| ProviderFailure::Malformed("No choices in response".to_string()))?;
    let units = response.usage.map(|u| u.total_tokens).unwrap_or_default();
    Ok(ProviderReply::new(RawCompletion::text(content), units))
}

#[async_trait]
impl GenerationProvider for OpenAiProvider {
    fn id(&self) -> &str {
        OPENAI_PROVIDER_ID
    }

    fn supports(&self, kind: TaskKind) -> bool {
        kind != TaskKind::ImageMockup
    }

    async fn invoke(
        &self,
        task: GenerationTask,
        prompt: &RenderedPrompt,
        params: &GenerationParams,
    ) -> Result<ProviderReply, ProviderFailure> {
        debug!(task = %task.label(), model = %self.model, "OpenAI request");
        let mut request = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .json(&self.request_body(prompt, params));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request.send().await.map_err(map_transport_error)?;

        into_reply(read_json(response).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body() {
        let provider = OpenAiProvider::new(
            None,
            "http://localhost:11434/",
            "llama3.1",
            Duration::from_secs(5),
        )
        .unwrap();
        let params = GenerationParams::for_task(GenerationTask::ScreenRendering);
        let body = provider.request_body(&RenderedPrompt::new("sys", "user"), &params);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "user");
        assert_eq!(body["max_tokens"], 8000);
        assert_eq!(provider.base_url, "http://localhost:11434");
    }

    #[test]
    fn test_reply() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": "<html></html>"}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        }))
        .unwrap();
        let reply = into_reply(response).unwrap();
        assert_eq!(reply.completion.as_text(), Some("<html></html>"));
        assert_eq!(reply.usage_units, 15);
    }

    #[test]
    fn test_missing_content_is_malformed() {
        for raw in [
            json!({"choices": []}),
            json!({"choices": [{"message": {"content": null}}]}),
            json!({"choices": [{"message": {"content": "  "}}]}),
        ] {
            let response: ChatCompletionResponse = serde_json::from_value(raw).unwrap();
            assert!(matches!(
                into_reply(response),
                Err(ProviderFailure::Malformed(_))
            ));
        }
    }
}

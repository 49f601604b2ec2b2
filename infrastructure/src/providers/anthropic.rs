//! Anthropic Messages API adapter

use super::http::{build_client, map_transport_error, read_json};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;
use tux_application::{GenerationProvider, ProviderFailure, ProviderReply};
use tux_domain::{GenerationParams, GenerationTask, RawCompletion, RenderedPrompt, TaskKind};

pub const ANTHROPIC_PROVIDER_ID: &str = "anthropic";

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    api_version: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    usage: Option<MessagesUsage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct MessagesUsage {
    input_tokens: u64,
    output_tokens: u64,
}

impl AnthropicProvider {
    pub fn new(
        api_key: String,
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_version: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self, ProviderFailure> {
        Ok(Self {
            client: build_client(request_timeout)?,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_version: api_version.into(),
        })
    }

    fn request_body(&self, prompt: &RenderedPrompt, params: &GenerationParams) -> Value {
        let mut body = json!({
            "model": self.model,
            "max_tokens": params.max_tokens,
            "temperature": params.temperature,
            "messages": [{"role": "user", "content": prompt.user}],
        });
        if !prompt.system.is_empty() {
            body["system"] = json!(prompt.system);
        }
        body
    }
}

fn into_reply(response: MessagesResponse) -> Result<ProviderReply, ProviderFailure> {
    let text: String = response
        .content
        .iter()
        .filter(|block| block.kind == "text")
        .map(|block| block.text.as_str())
        .collect();
    if text.trim().is_empty() {
        return Err(ProviderFailure::Malformed("No text content in response".to_string()));
    }
    let units = response
        .usage
        .map(|u| u.input_tokens + u.output_tokens)
        .unwrap_or_default();
    Ok(ProviderReply::new(RawCompletion::text(text), units))
}

#[async_trait]
impl GenerationProvider for AnthropicProvider {
    fn id(&self) -> &str {
        ANTHROPIC_PROVIDER_ID
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
        debug!(task = %task.label(), model = %self.model, "Anthropic request");
        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .json(&self.request_body(prompt, params))
            .send()
            .await
            .map_err(map_transport_error)?;

        into_reply(read_json(response).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> AnthropicProvider {
        AnthropicProvider::new(
            "sk-test".to_string(),
            "https://api.anthropic.com/",
            "claude-3-5-haiku-latest",
            "2023-06-01",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_request_body() {
        let provider = provider();
        assert_eq!(provider.base_url, "https://api.anthropic.com");
        let params = GenerationParams::for_task(GenerationTask::RoleAnalysis);
        let body = provider.request_body(&RenderedPrompt::new("Be brief.", "Analyze."), &params);
        assert_eq!(body["model"], "claude-3-5-haiku-latest");
        assert_eq!(body["max_tokens"], 1024);
        assert_eq!(body["system"], "Be brief.");
        assert_eq!(body["messages"][0]["content"], "Analyze.");

        let body = provider.request_body(&RenderedPrompt::new("", "Hi"), &params);
        assert!(body.get("system").is_none());
    }

    #[test]
    fn test_reply_joins_text_blocks() {
        let response: MessagesResponse = serde_json::from_value(json!({
            "content": [
                {"type": "text", "text": "```json\n{\"a\": "},
                {"type": "tool_use", "id": "x"},
                {"type": "text", "text": "1}\n```"}
            ],
            "usage": {"input_tokens": 120, "output_tokens": 30}
        }))
        .unwrap();
        let reply = into_reply(response).unwrap();
        assert_eq!(reply.completion.as_text(), Some("```json\n{\"a\": 1}\n```"));
        assert_eq!(reply.usage_units, 150);
    }

    #[test]
    fn test_empty_reply_is_malformed() {
        let response: MessagesResponse = serde_json::from_value(json!({"content": []})).unwrap();
        assert!(matches!(
            into_reply(response),
            Err(ProviderFailure::Malformed(_))
        ));
    }

    #[test]
    fn test_supports_text_tasks_only() {
        let provider = provider();
        assert!(provider.supports(TaskKind::ScreenRendering));
        assert!(!provider.supports(TaskKind::ImageMockup));
    }
}

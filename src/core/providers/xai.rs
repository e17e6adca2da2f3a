//! xAI (Grok) provider
//!
//! Speaks the OpenAI-compatible chat-completions dialect with Bearer auth.

use super::{
    build_http_client, map_status_error, map_transport_error, ChatProvider, ProviderError,
    ProviderReply,
};
use crate::config::XaiConfig;
use crate::core::types::{CallOptions, TokenUsage};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

const DEFAULT_SYSTEM_PROMPT: &str = "You are Grok, a witty AI assistant inspired by The \
Hitchhiker's Guide to the Galaxy, with deep penetration-testing expertise. Keep the humor light; \
keep the technical content precise.";

/// xAI (Grok) API client
#[derive(Debug, Clone)]
pub struct XaiProvider {
    config: XaiConfig,
    http_client: reqwest::Client,
}

impl XaiProvider {
    /// Create a new xAI provider
    pub fn new(config: XaiConfig) -> Result<Self, ProviderError> {
        let http_client = build_http_client(config.timeout_ms)?;
        Ok(Self {
            config,
            http_client,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn build_body(&self, prompt: &str, system_prompt: &str, options: CallOptions) -> Value {
        json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": prompt }
            ],
            "stream": false,
            "temperature": options.temperature,
            "max_tokens": options.max_tokens,
        })
    }

    fn parse_response(response: &Value) -> Result<ProviderReply, ProviderError> {
        let text = response
            .get("choices")
            .and_then(|c| c.as_array())
            .and_then(|c| c.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .ok_or_else(|| {
                ProviderError::Response("xai: no message content in response".to_string())
            })?;

        if text.is_empty() {
            return Err(ProviderError::Response(
                "xai: empty message content".to_string(),
            ));
        }

        let usage = response.get("usage").map(|usage| TokenUsage {
            prompt_tokens: read_u32(usage, "prompt_tokens"),
            completion_tokens: read_u32(usage, "completion_tokens"),
            total_tokens: read_u32(usage, "total_tokens"),
        });

        Ok(ProviderReply {
            text: text.to_string(),
            usage,
        })
    }
}

fn read_u32(value: &Value, key: &str) -> u32 {
    value.get(key).and_then(|v| v.as_u64()).unwrap_or(0) as u32
}

#[async_trait]
impl ChatProvider for XaiProvider {
    fn name(&self) -> &'static str {
        "grok"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    fn default_system_prompt(&self) -> &'static str {
        DEFAULT_SYSTEM_PROMPT
    }

    fn timeout(&self) -> Duration {
        Duration::from_millis(self.config.timeout_ms)
    }

    async fn send_chat(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        options: CallOptions,
    ) -> Result<ProviderReply, ProviderError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::Auth("XAI_API_KEY is not configured".to_string()))?;

        let system = system_prompt.unwrap_or(DEFAULT_SYSTEM_PROMPT);
        let body = self.build_body(prompt, system, options);

        debug!(model = %self.config.model, "sending Grok chat request");

        let response = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| map_transport_error("xai", e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| map_transport_error("xai", e))?;

        if !status.is_success() {
            return Err(map_status_error("xai", status.as_u16(), &text));
        }

        let json: Value = serde_json::from_str(&text)
            .map_err(|e| ProviderError::Response(format!("xai: response is not JSON: {}", e)))?;

        Self::parse_response(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> XaiProvider {
        XaiProvider::new(XaiConfig {
            api_key: Some("test-key".to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_body_includes_system_and_user_messages() {
        let provider = configured();
        let body = provider.build_body("probe", "analyst", CallOptions::default());

        assert_eq!(body["model"], "grok-3-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "analyst");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "probe");
        assert_eq!(body["stream"], false);
    }

    #[test]
    fn test_parse_response_extracts_text_and_usage() {
        let response = json!({
            "choices": [{ "message": { "role": "assistant", "content": "hi there" } }],
            "usage": { "prompt_tokens": 9, "completion_tokens": 3, "total_tokens": 12 }
        });

        let reply = XaiProvider::parse_response(&response).unwrap();
        assert_eq!(reply.text, "hi there");
        assert_eq!(reply.usage.unwrap().total_tokens, 12);
    }

    #[test]
    fn test_parse_response_rejects_missing_choices() {
        let err = XaiProvider::parse_response(&json!({ "id": "x" })).unwrap_err();
        assert!(matches!(err, ProviderError::Response(_)));
    }

    #[tokio::test]
    async fn test_unconfigured_provider_fails_without_network() {
        let provider = XaiProvider::new(XaiConfig::default()).unwrap();
        let err = provider
            .send_chat("hello", None, CallOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Auth(_)));
    }

    #[test]
    fn test_endpoint_building() {
        let provider = configured();
        assert_eq!(provider.endpoint(), "https://api.x.ai/v1/chat/completions");
    }
}

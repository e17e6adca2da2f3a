//! Google AI Studio (Gemini) provider
//!
//! Calls the `generateContent` endpoint with the API key passed as a query
//! parameter. Single response only; streaming is out of scope.

use super::shared::{build_generate_content_body, parse_generate_content};
use super::{
    build_http_client, map_status_error, map_transport_error, ChatProvider, ProviderError,
    ProviderReply,
};
use crate::config::GeminiConfig;
use crate::core::types::CallOptions;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const DEFAULT_SYSTEM_PROMPT: &str = "You are a professional AI security expert specializing in \
eKYC system penetration testing. Provide technical analysis, quantified risk estimates, and \
defensive recommendations.";

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    config: GeminiConfig,
    http_client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let http_client = build_http_client(config.timeout_ms)?;
        Ok(Self {
            config,
            http_client,
        })
    }

    fn endpoint(&self, api_key: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model,
            api_key
        )
    }
}

#[async_trait]
impl ChatProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
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
            .ok_or_else(|| ProviderError::Auth("GEMINI_API_KEY is not configured".to_string()))?;

        let system = system_prompt.unwrap_or(DEFAULT_SYSTEM_PROMPT);
        let body = build_generate_content_body(prompt, system, options);

        debug!(model = %self.config.model, "sending Gemini chat request");

        let response = self
            .http_client
            .post(self.endpoint(api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| map_transport_error("gemini", e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| map_transport_error("gemini", e))?;

        if !status.is_success() {
            return Err(map_status_error("gemini", status.as_u16(), &text));
        }

        let json: Value = serde_json::from_str(&text).map_err(|e| {
            ProviderError::Response(format!("gemini: response is not JSON: {}", e))
        })?;

        parse_generate_content("gemini", &json)
    }
}

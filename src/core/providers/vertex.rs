//! Vertex AI provider
//!
//! Project- and region-scoped `generateContent` endpoint with OAuth2 Bearer
//! auth. Requires project id and location in addition to the token.

use super::shared::{build_generate_content_body, parse_generate_content};
use super::{
    build_http_client, map_status_error, map_transport_error, ChatProvider, ProviderError,
    ProviderReply,
};
use crate::config::VertexConfig;
use crate::core::types::CallOptions;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const DEFAULT_SYSTEM_PROMPT: &str = "You are an eKYC security expert agent. Provide professional \
security analysis, concrete technical recommendations, risk assessment, and protective measures.";

/// Vertex AI API client
#[derive(Debug, Clone)]
pub struct VertexProvider {
    config: VertexConfig,
    http_client: reqwest::Client,
}

impl VertexProvider {
    /// Create a new Vertex AI provider
    pub fn new(config: VertexConfig) -> Result<Self, ProviderError> {
        let http_client = build_http_client(config.timeout_ms)?;
        Ok(Self {
            config,
            http_client,
        })
    }

    fn endpoint(&self) -> Result<String, ProviderError> {
        let base = self.config.endpoint_base().ok_or_else(|| {
            ProviderError::Auth("GOOGLE_CLOUD_LOCATION is not configured".to_string())
        })?;
        let project = self.config.project_id.as_deref().ok_or_else(|| {
            ProviderError::Auth("GOOGLE_CLOUD_PROJECT_ID is not configured".to_string())
        })?;
        let location = self.config.location.as_deref().ok_or_else(|| {
            ProviderError::Auth("GOOGLE_CLOUD_LOCATION is not configured".to_string())
        })?;

        Ok(format!(
            "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:generateContent",
            base, project, location, self.config.model
        ))
    }
}

#[async_trait]
impl ChatProvider for VertexProvider {
    fn name(&self) -> &'static str {
        "vertex"
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
        let token = self.config.access_token.as_deref().ok_or_else(|| {
            ProviderError::Auth("GOOGLE_CLOUD_ACCESS_TOKEN is not configured".to_string())
        })?;
        let url = self.endpoint()?;

        let system = system_prompt.unwrap_or(DEFAULT_SYSTEM_PROMPT);
        let body = build_generate_content_body(prompt, system, options);

        debug!(model = %self.config.model, "sending Vertex AI chat request");

        let response = self
            .http_client
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| map_transport_error("vertex", e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| map_transport_error("vertex", e))?;

        if !status.is_success() {
            return Err(map_status_error("vertex", status.as_u16(), &text));
        }

        let json: Value = serde_json::from_str(&text).map_err(|e| {
            ProviderError::Response(format!("vertex: response is not JSON: {}", e))
        })?;

        parse_generate_content("vertex", &json)
    }
}

//! AI chat providers
//!
//! Each provider is a thin adapter translating the uniform [`ChatProvider`]
//! contract into a vendor-specific request shape and back into plain text.
//! Vendor failures are narrowed to the three [`ProviderError`] kinds the
//! dispatcher distinguishes.

pub mod gemini;
pub mod shared;
pub mod vertex;
pub mod xai;

pub use gemini::GeminiProvider;
pub use vertex::VertexProvider;
pub use xai::XaiProvider;

use crate::core::types::{CallOptions, TokenUsage};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Provider selection key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    Grok,
    Vertex,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::Grok => "grok",
            ProviderKind::Vertex => "vertex",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider failure kinds
///
/// The only distinctions the dispatcher needs: everything network- or
/// availability-shaped is `Unavailable`, credential problems are `Auth`,
/// and an un-parseable body is `Response`.
#[derive(Error, Debug, Clone)]
pub enum ProviderError {
    /// Network error, connect failure, timeout, or upstream 5xx/429
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Missing or rejected credentials
    #[error("provider authentication failed: {0}")]
    Auth(String),

    /// Response body did not match the expected shape
    #[error("malformed provider response: {0}")]
    Response(String),
}

/// Successful provider reply
#[derive(Debug, Clone)]
pub struct ProviderReply {
    /// Generated text
    pub text: String,
    /// Token usage when the provider reported it
    pub usage: Option<TokenUsage>,
}

/// Uniform capability over hosted chat-completion APIs
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Stable provider name used as the usage-counter key
    fn name(&self) -> &'static str;

    /// Model identifier sent upstream
    fn model(&self) -> &str;

    /// Whether credentials are present
    fn is_configured(&self) -> bool;

    /// System prompt applied when the caller supplies none
    fn default_system_prompt(&self) -> &'static str;

    /// Per-call timeout budget enforced by the dispatcher
    fn timeout(&self) -> Duration;

    /// Send one chat completion; single attempt, no streaming
    async fn send_chat(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        options: CallOptions,
    ) -> Result<ProviderReply, ProviderError>;
}

/// Build the shared HTTP client for a provider
pub(crate) fn build_http_client(timeout_ms: u64) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| ProviderError::Unavailable(format!("failed to create HTTP client: {}", e)))
}

/// Map a reqwest transport error into a provider error
pub(crate) fn map_transport_error(provider: &str, err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Unavailable(format!("{} request timed out", provider))
    } else {
        ProviderError::Unavailable(format!("{} network error: {}", provider, err))
    }
}

/// Map a non-success HTTP status into a provider error
pub(crate) fn map_status_error(provider: &str, status: u16, body: &str) -> ProviderError {
    let detail = body.chars().take(200).collect::<String>();
    match status {
        401 | 403 => ProviderError::Auth(format!("{} rejected credentials ({})", provider, status)),
        _ => ProviderError::Unavailable(format!(
            "{} returned HTTP {}: {}",
            provider, status, detail
        )),
    }
}

//! Provider configuration
//!
//! One configuration block per AI provider variant. A provider without
//! credentials stays registered but unconfigured; the dispatcher serves
//! fallback responses for it instead of failing at startup.

use super::{default_timeout_ms, env_opt, env_parse};
use serde::{Deserialize, Serialize};

/// Configuration for all provider variants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Google AI Studio (Gemini) settings
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// xAI (Grok) settings
    #[serde(default)]
    pub xai: XaiConfig,
    /// Vertex AI settings
    #[serde(default)]
    pub vertex: VertexConfig,
}

impl ProvidersConfig {
    /// Load all provider settings from environment variables
    pub fn from_env() -> Self {
        Self {
            gemini: GeminiConfig::from_env(),
            xai: XaiConfig::from_env(),
            vertex: VertexConfig::from_env(),
        }
    }

    /// Validate provider settings
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (name, timeout_ms) in [
            ("gemini", self.gemini.timeout_ms),
            ("xai", self.xai.timeout_ms),
            ("vertex", self.vertex.timeout_ms),
        ] {
            if timeout_ms == 0 {
                return Err(format!("{} timeout_ms must be non-zero", name));
            }
        }
        Ok(())
    }
}

/// Google AI Studio (Gemini) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key; absent means the provider is permanently in fallback mode
    pub api_key: Option<String>,
    /// Base URL of the generative language API
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
    /// Model identifier
    #[serde(default = "default_gemini_model")]
    pub model: String,
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_base_url(),
            model: default_gemini_model(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl GeminiConfig {
    /// Load Gemini settings from environment variables
    pub fn from_env() -> Self {
        Self {
            api_key: env_opt("GEMINI_API_KEY"),
            base_url: env_opt("GEMINI_BASE_URL").unwrap_or_else(default_gemini_base_url),
            model: env_opt("GEMINI_MODEL").unwrap_or_else(default_gemini_model),
            timeout_ms: env_parse("GEMINI_TIMEOUT_MS", default_timeout_ms()),
        }
    }

    /// Whether credentials are present
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// xAI (Grok) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XaiConfig {
    /// API key; absent means the provider is permanently in fallback mode
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_xai_base_url")]
    pub base_url: String,
    /// Model identifier
    #[serde(default = "default_xai_model")]
    pub model: String,
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for XaiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_xai_base_url(),
            model: default_xai_model(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl XaiConfig {
    /// Load xAI settings from environment variables
    pub fn from_env() -> Self {
        Self {
            api_key: env_opt("XAI_API_KEY"),
            base_url: env_opt("XAI_BASE_URL").unwrap_or_else(default_xai_base_url),
            model: env_opt("XAI_MODEL").unwrap_or_else(default_xai_model),
            timeout_ms: env_parse("XAI_TIMEOUT_MS", default_timeout_ms()),
        }
    }

    /// Whether credentials are present
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Vertex AI configuration
///
/// Requires a project id and location in addition to the access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VertexConfig {
    /// OAuth2 access token used as Bearer credential
    pub access_token: Option<String>,
    /// Google Cloud project id
    pub project_id: Option<String>,
    /// Google Cloud region, e.g. `us-central1`
    pub location: Option<String>,
    /// Base URL override; derived from the location when absent
    pub base_url: Option<String>,
    /// Model identifier
    #[serde(default = "default_vertex_model")]
    pub model: String,
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for VertexConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            project_id: None,
            location: None,
            base_url: None,
            model: default_vertex_model(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl VertexConfig {
    /// Load Vertex AI settings from environment variables
    pub fn from_env() -> Self {
        Self {
            access_token: env_opt("GOOGLE_CLOUD_ACCESS_TOKEN"),
            project_id: env_opt("GOOGLE_CLOUD_PROJECT_ID"),
            location: env_opt("GOOGLE_CLOUD_LOCATION"),
            base_url: env_opt("VERTEX_BASE_URL"),
            model: env_opt("VERTEX_MODEL").unwrap_or_else(default_vertex_model),
            timeout_ms: env_parse("VERTEX_TIMEOUT_MS", default_timeout_ms()),
        }
    }

    /// Whether credentials are present
    pub fn is_configured(&self) -> bool {
        self.access_token.is_some() && self.project_id.is_some() && self.location.is_some()
    }

    /// Resolve the endpoint base, preferring an explicit override
    pub fn endpoint_base(&self) -> Option<String> {
        if let Some(base) = &self.base_url {
            return Some(base.trim_end_matches('/').to_string());
        }
        self.location
            .as_ref()
            .map(|location| format!("https://{}-aiplatform.googleapis.com", location))
    }
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_xai_base_url() -> String {
    "https://api.x.ai/v1".to_string()
}

fn default_xai_model() -> String {
    "grok-3-mini".to_string()
}

fn default_vertex_model() -> String {
    "gemini-2.5-flash".to_string()
}

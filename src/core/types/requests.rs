//! Request types

use serde::{Deserialize, Serialize};

/// A single chat request against one provider
///
/// Created per incoming call; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Free-text user prompt; must be non-empty
    pub prompt: String,
    /// System prompt override; each provider has its own default
    #[serde(default)]
    pub system_prompt: Option<String>,
}

/// Sampling options forwarded to the provider
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CallOptions {
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Completion token budget
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2048
}

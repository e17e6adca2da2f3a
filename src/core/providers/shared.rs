//! Request/response shapes shared by the Google generative endpoints
//!
//! Google AI Studio and Vertex AI speak the same `generateContent` dialect;
//! both adapters delegate here.

use super::{ProviderError, ProviderReply};
use crate::core::types::{CallOptions, TokenUsage};
use serde_json::{json, Value};

/// Build a `generateContent` request body
pub(crate) fn build_generate_content_body(
    prompt: &str,
    system_prompt: &str,
    options: CallOptions,
) -> Value {
    json!({
        "systemInstruction": {
            "parts": [{ "text": system_prompt }]
        },
        "contents": [{
            "role": "user",
            "parts": [{ "text": prompt }]
        }],
        "generationConfig": {
            "temperature": options.temperature,
            "maxOutputTokens": options.max_tokens,
        }
    })
}

/// Extract text and usage from a `generateContent` response
pub(crate) fn parse_generate_content(
    provider: &str,
    response: &Value,
) -> Result<ProviderReply, ProviderError> {
    let candidates = response
        .get("candidates")
        .and_then(|c| c.as_array())
        .filter(|c| !c.is_empty())
        .ok_or_else(|| {
            ProviderError::Response(format!("{}: no candidates in response", provider))
        })?;

    let parts = candidates[0]
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .ok_or_else(|| {
            ProviderError::Response(format!("{}: invalid candidate content structure", provider))
        })?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect::<Vec<_>>()
        .join("");

    if text.is_empty() {
        return Err(ProviderError::Response(format!(
            "{}: candidate contained no text parts",
            provider
        )));
    }

    let usage = response.get("usageMetadata").map(|metadata| {
        let prompt_tokens = read_u32(metadata, "promptTokenCount");
        let completion_tokens = read_u32(metadata, "candidatesTokenCount");
        let total_tokens = match read_u32(metadata, "totalTokenCount") {
            0 => prompt_tokens + completion_tokens,
            total => total,
        };
        TokenUsage {
            prompt_tokens,
            completion_tokens,
            total_tokens,
        }
    });

    Ok(ProviderReply { text, usage })
}

fn read_u32(value: &Value, key: &str) -> u32 {
    value.get(key).and_then(|v| v.as_u64()).unwrap_or(0) as u32
}

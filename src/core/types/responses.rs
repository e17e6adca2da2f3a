//! Response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Token accounting reported by a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt
    pub prompt_tokens: u32,
    /// Tokens produced in the completion
    pub completion_tokens: u32,
    /// Total tokens billed
    pub total_tokens: u32,
}

/// Result of one dispatched chat call
///
/// The dispatcher never propagates provider failures; degradation is
/// observable only through `is_fallback`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResult {
    /// Whether the call completed at the HTTP-contract level
    pub success: bool,
    /// Generated (or fallback) text
    pub response_text: String,
    /// Provider that handled the call
    pub provider: String,
    /// Model identifier
    pub model: String,
    /// Token usage when the provider reported it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    /// Completion time, UTC
    pub timestamp: DateTime<Utc>,
    /// True iff the provider call did not complete successfully
    pub is_fallback: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_omitted_when_absent() {
        let result = ChatResult {
            success: true,
            response_text: "degraded".to_string(),
            provider: "grok".to_string(),
            model: "grok-3-mini".to_string(),
            usage: None,
            timestamp: Utc::now(),
            is_fallback: true,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("usage").is_none());
        assert_eq!(json["is_fallback"], true);
    }
}

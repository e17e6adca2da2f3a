//! Deterministic fallback responses
//!
//! One canned report per request category, interpolated with a bounded
//! summary of the request. Returned whenever a provider call fails so the
//! caller always receives a well-formed result.

use crate::core::prompt::RequestCategory;

const SUMMARY_CHARS: usize = 100;

/// Build the fallback text for a failed dispatch
pub fn fallback_text(category: RequestCategory, provider: &str, user_prompt: &str) -> String {
    let summary = summarize(user_prompt);
    let hint = credential_hint(provider);

    match category {
        RequestCategory::Chat => format!(
            "Offline analysis mode.\n\n\
             Regarding \"{summary}\": the {provider} provider is currently unreachable, so this \
             response was generated locally.\n\n\
             General guidance: layered verification remains the strongest defense for eKYC \
             flows; treat any single biometric check as bypassable.\n\n\
             Set {hint} to enable live AI analysis."
        ),
        RequestCategory::SecurityAnalysis => format!(
            "Security threat analysis (offline mode).\n\n\
             Subject: {summary}\n\n\
             1. Threat severity: HIGH (default rating pending live analysis)\n\
             2. Attack vectors: deepfake injection, document forgery, and biometric spoofing \
             remain the dominant intrusion paths against eKYC targets\n\
             3. Impact: identity-verification bypass leading to fraudulent account creation\n\
             4. Countermeasures: deploy deepfake detection, strengthen liveness checks, and \
             cross-validate documents against issuing sources\n\
             5. Monitoring: alert on repeated verification attempts from one device fingerprint\n\n\
             Set {hint} to enable live AI analysis."
        ),
        RequestCategory::PentestPlan => format!(
            "Penetration-test plan (offline mode).\n\n\
             Engagement: {summary}\n\n\
             Phase 1: reconnaissance of the verification flow and capture interfaces\n\
             Phase 2: single-vector probes (synthetic selfie, screen replay, face swap)\n\
             Phase 3: combined-vector attempts against the weakest step found in phase 2\n\
             Phase 4: reporting with per-vector success rates and remediation guidance\n\n\
             Success criteria: a verified account created from fully synthetic inputs.\n\
             Boundaries: test accounts only, no production identities.\n\n\
             Set {hint} to enable live AI planning."
        ),
        RequestCategory::StrategyOptimization => format!(
            "Attack-strategy optimization (offline mode).\n\n\
             Request: {summary}\n\n\
             Baseline guidance: sequence document-level vectors before biometric-level vectors \
             so early failures do not burn the stronger techniques; combined vectors typically \
             outperform the best single vector by 5-15 points.\n\
             Defensive note: the same ordering tells defenders where layered checks pay off \
             most.\n\n\
             Set {hint} to enable live AI optimization."
        ),
        RequestCategory::VulnerabilityAnalysis => format!(
            "eKYC vulnerability assessment (offline mode).\n\n\
             Subject: {summary}\n\n\
             1. Biometric bypass exposure: CRITICAL pending live assessment\n\
             2. Estimated APCER 15-25% against current-generation synthetic media\n\
             3. Primary weakness: single-frame liveness checks without depth sensing\n\
             4. Recommended hardening: multi-modal liveness, document cross-validation, \
             challenge-response capture\n\n\
             Set {hint} to enable live AI assessment."
        ),
        RequestCategory::Compliance => format!(
            "Compliance guidance (offline mode).\n\n\
             Question: {summary}\n\n\
             1. Personal-data protection law: biometric data is sensitive personal data and \
             requires explicit consent\n\
             2. ISO 27001: an information-security management system is expected for \
             verification providers\n\
             3. Financial regulation: supervisory rules apply when the flow gates financial \
             services\n\n\
             Immediate actions: review data-handling procedures, establish a consent mechanism, \
             and prepare an incident-response plan.\n\
             Risk level: MEDIUM to HIGH depending on industry scope.\n\n\
             Set {hint} to enable live AI guidance."
        ),
    }
}

/// First `SUMMARY_CHARS` characters of the prompt, ellipsized
fn summarize(prompt: &str) -> String {
    let mut summary: String = prompt.chars().take(SUMMARY_CHARS).collect();
    if prompt.chars().count() > SUMMARY_CHARS {
        summary.push_str("...");
    }
    summary
}

fn credential_hint(provider: &str) -> &'static str {
    match provider {
        "gemini" => "GEMINI_API_KEY",
        "grok" => "XAI_API_KEY",
        "vertex" => "GOOGLE_CLOUD_ACCESS_TOKEN",
        _ => "the provider credentials",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_deterministic() {
        let first = fallback_text(RequestCategory::SecurityAnalysis, "grok", "deepfake probe");
        let second = fallback_text(RequestCategory::SecurityAnalysis, "grok", "deepfake probe");
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_fallback_varies_by_category() {
        let chat = fallback_text(RequestCategory::Chat, "grok", "hello");
        let plan = fallback_text(RequestCategory::PentestPlan, "grok", "hello");
        assert_ne!(chat, plan);
    }

    #[test]
    fn test_fallback_names_credential_hint() {
        let text = fallback_text(RequestCategory::Chat, "gemini", "hello");
        assert!(text.contains("GEMINI_API_KEY"));

        let text = fallback_text(RequestCategory::Chat, "vertex", "hello");
        assert!(text.contains("GOOGLE_CLOUD_ACCESS_TOKEN"));
    }

    #[test]
    fn test_summary_is_bounded_and_utf8_safe() {
        let long_prompt = "威脅".repeat(200);
        let text = fallback_text(RequestCategory::Chat, "grok", &long_prompt);
        assert!(text.contains("..."));

        let short = summarize("short prompt");
        assert_eq!(short, "short prompt");
    }
}

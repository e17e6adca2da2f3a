//! Prompt construction
//!
//! Pure template substitution: each request category has a fixed
//! system/user template pair with named placeholders. Required fields are
//! validated here, before any provider is touched; the builders perform no
//! I/O and have no side effects.

use crate::core::attack::{AttackVector, Intensity};
use crate::core::types::ChatRequest;
use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};

/// Request category a prompt was built for
///
/// Keys the dispatcher's fallback catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestCategory {
    Chat,
    SecurityAnalysis,
    PentestPlan,
    StrategyOptimization,
    VulnerabilityAnalysis,
    Compliance,
}

impl RequestCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestCategory::Chat => "chat",
            RequestCategory::SecurityAnalysis => "security-analysis",
            RequestCategory::PentestPlan => "pentest-plan",
            RequestCategory::StrategyOptimization => "optimize-strategy",
            RequestCategory::VulnerabilityAnalysis => "vulnerability-analysis",
            RequestCategory::Compliance => "compliance-question",
        }
    }
}

/// A system/user prompt pair ready for dispatch
///
/// `system` of `None` lets the provider apply its own default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: Option<String>,
    pub user: String,
}

const SECURITY_ANALYST_SYSTEM: &str = "You are a senior offensive-security analyst specializing \
in eKYC identity-verification systems. Ground every assessment in concrete attack techniques, \
quantify risk where possible, and close with actionable countermeasures.";

const PENTEST_PLANNER_SYSTEM: &str = "You are a penetration-test lead planning red-team \
engagements against eKYC onboarding flows. Produce methodical, step-by-step plans with tooling, \
success criteria, and explicit ethical boundaries.";

const STRATEGY_SYSTEM: &str = "You are an adversarial-ML strategist. Given a set of attack \
vectors against identity verification, analyze their combined effect and propose the highest-yield \
ordering and configuration, together with the defenses that would blunt it.";

const VULNERABILITY_SYSTEM: &str = "You are an AI security consultant performing vulnerability \
assessments of eKYC systems. Report findings with APCER/BPCER-style quantified impact and layered \
remediation guidance.";

const COMPLIANCE_SYSTEM: &str = "You are a compliance advisor for information-security \
regulation. Answer with the applicable regulatory requirements, concrete obligations, and a \
prioritized action list.";

/// Builders producing a [`PromptPair`] per request category
pub struct PromptBuilder;

impl PromptBuilder {
    /// Free-form chat; the provider's default system prompt applies unless
    /// the request overrides it.
    pub fn chat(request: &ChatRequest) -> Result<PromptPair> {
        require_field("prompt", &request.prompt)?;

        Ok(PromptPair {
            system: request
                .system_prompt
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.to_string()),
            user: request.prompt.clone(),
        })
    }

    /// Threat analysis of a described attack against a target system
    pub fn security_analysis(threat_description: &str, target_system: &str) -> Result<PromptPair> {
        require_field("threat_description", threat_description)?;
        require_field("target_system", target_system)?;

        let user = format!(
            "Analyze the following security threat.\n\n\
             Threat description: {threat_description}\n\
             Target system: {target_system}\n\n\
             Provide:\n\
             1. Threat severity rating (CRITICAL/HIGH/MEDIUM/LOW)\n\
             2. Attack vectors and likely intrusion paths\n\
             3. Potential impact and damage assessment\n\
             4. Concrete protective countermeasures\n\
             5. Detection and monitoring recommendations"
        );

        Ok(PromptPair {
            system: Some(SECURITY_ANALYST_SYSTEM.to_string()),
            user,
        })
    }

    /// Engagement plan for a target type using the given catalog vectors
    pub fn pentest_plan(target_type: &str, vectors: &[&AttackVector]) -> Result<PromptPair> {
        require_field("target_type", target_type)?;

        let vector_lines = describe_vectors(vectors);
        let user = format!(
            "Draft a penetration-test plan for the following engagement.\n\n\
             Target type: {target_type}\n\
             Available attack vectors:\n{vector_lines}\n\
             Provide:\n\
             1. Full test plan with phases and schedule\n\
             2. Concrete execution steps per attack vector\n\
             3. Tooling and environment requirements\n\
             4. Expected results and success criteria\n\
             5. Risk controls and ethical boundaries"
        );

        Ok(PromptPair {
            system: Some(PENTEST_PLANNER_SYSTEM.to_string()),
            user,
        })
    }

    /// Optimization of a vector combination at a given intensity
    pub fn optimize_strategy(vectors: &[&AttackVector], intensity: Intensity) -> Result<PromptPair> {
        if vectors.is_empty() {
            return Err(GatewayError::invalid_request(
                "missing required field: vector_ids",
            ));
        }

        let selected: Vec<&str> = vectors.iter().map(|v| v.id).collect();
        let vector_lines = describe_vectors(vectors);
        let user = format!(
            "Optimize the attack strategy for the following vector combination.\n\n\
             Selected vectors: {}\n\
             Attack intensity: {}\n\
             Vector details:\n{}\n\
             Provide:\n\
             1. Synergy analysis of the combination\n\
             2. Ordering, timing, and resource allocation\n\
             3. Expected success-rate improvement over single vectors\n\
             4. Detection-evasion considerations defenders should anticipate\n\
             5. Targeted countermeasures for each vector",
            selected.join(", "),
            intensity.as_str(),
            vector_lines
        );

        Ok(PromptPair {
            system: Some(STRATEGY_SYSTEM.to_string()),
            user,
        })
    }

    /// Deep vulnerability assessment of one system against one attack type
    pub fn vulnerability_analysis(target_system: &str, attack_type: &str) -> Result<PromptPair> {
        require_field("target_system", target_system)?;
        require_field("attack_type", attack_type)?;

        let user = format!(
            "Perform a security assessment of the following eKYC system.\n\n\
             Target system: {target_system}\n\
             Attack type: {attack_type}\n\n\
             Provide:\n\
             1. Vulnerability analysis and likely intrusion paths\n\
             2. Quantified risk (APCER, BPCER, ACER estimates)\n\
             3. Attack scenario simulation and detection difficulty\n\
             4. Layered defense recommendations\n\
             5. Regulatory compliance impact"
        );

        Ok(PromptPair {
            system: Some(VULNERABILITY_SYSTEM.to_string()),
            user,
        })
    }

    /// Regulatory-compliance question, optionally scoped to an industry
    pub fn compliance_question(question: &str, industry_scope: Option<&str>) -> Result<PromptPair> {
        require_field("question", question)?;

        let scope = industry_scope
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("general");
        let user = format!(
            "Answer the following information-security compliance question.\n\n\
             Question: {question}\n\
             Industry scope: {scope}\n\n\
             Provide:\n\
             1. Applicable regulations and the specific requirements involved\n\
             2. Compliance recommendations with immediate actions\n\
             3. Violation risk level and potential penalties\n\
             4. A prioritized remediation timeline"
        );

        Ok(PromptPair {
            system: Some(COMPLIANCE_SYSTEM.to_string()),
            user,
        })
    }
}

fn describe_vectors(vectors: &[&AttackVector]) -> String {
    vectors
        .iter()
        .map(|v| {
            format!(
                "- {}: {} ({}, baseline bypass rate {:.0}%)\n",
                v.id,
                v.model,
                v.scenario,
                v.success_rate * 100.0
            )
        })
        .collect()
}

fn require_field(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GatewayError::invalid_request(format!(
            "missing required field: {}",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attack;

    fn chat_request(prompt: &str, system_prompt: Option<&str>) -> ChatRequest {
        ChatRequest {
            prompt: prompt.to_string(),
            system_prompt: system_prompt.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_chat_requires_prompt() {
        let err = PromptBuilder::chat(&chat_request("", None)).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidRequest(_)));
        assert!(err.to_string().contains("prompt"));

        let err = PromptBuilder::chat(&chat_request("   ", None)).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidRequest(_)));
    }

    #[test]
    fn test_chat_keeps_system_override() {
        let pair = PromptBuilder::chat(&chat_request("hello", Some("be terse"))).unwrap();
        assert_eq!(pair.system.as_deref(), Some("be terse"));
        assert_eq!(pair.user, "hello");

        let pair = PromptBuilder::chat(&chat_request("hello", Some("  "))).unwrap();
        assert!(pair.system.is_none());
    }

    #[test]
    fn test_security_analysis_substitutes_fields() {
        let pair =
            PromptBuilder::security_analysis("deepfake injection", "bank onboarding").unwrap();
        assert!(pair.user.contains("deepfake injection"));
        assert!(pair.user.contains("bank onboarding"));
        assert!(pair.system.is_some());
    }

    #[test]
    fn test_security_analysis_requires_both_fields() {
        let err = PromptBuilder::security_analysis("", "bank onboarding").unwrap_err();
        assert!(err.to_string().contains("threat_description"));

        let err = PromptBuilder::security_analysis("deepfake", "").unwrap_err();
        assert!(err.to_string().contains("target_system"));
    }

    #[test]
    fn test_pentest_plan_lists_vectors() {
        let vectors = attack::resolve_vectors(&["A1".to_string(), "A3".to_string()]).unwrap();
        let pair = PromptBuilder::pentest_plan("mobile eKYC app", &vectors).unwrap();
        assert!(pair.user.contains("A1: StyleGAN3"));
        assert!(pair.user.contains("A3: SimSwap"));
    }

    #[test]
    fn test_optimize_strategy_requires_vectors() {
        let err = PromptBuilder::optimize_strategy(&[], Intensity::Medium).unwrap_err();
        assert!(err.to_string().contains("vector_ids"));
    }

    #[test]
    fn test_compliance_question_defaults_scope() {
        let pair = PromptBuilder::compliance_question("is biometric data sensitive?", None).unwrap();
        assert!(pair.user.contains("Industry scope: general"));

        let pair =
            PromptBuilder::compliance_question("is biometric data sensitive?", Some("finance"))
                .unwrap();
        assert!(pair.user.contains("Industry scope: finance"));
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(RequestCategory::SecurityAnalysis.as_str(), "security-analysis");
        assert_eq!(RequestCategory::StrategyOptimization.as_str(), "optimize-strategy");
    }
}

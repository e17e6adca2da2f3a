//! AI dispatch endpoints
//!
//! Every handler validates its input through the prompt builder, then hands
//! the prompt pair to the resilient dispatcher. Provider failures never
//! surface here; a degraded call still returns HTTP 200 with
//! `is_fallback: true`.

use crate::core::attack;
use crate::core::prompt::{PromptBuilder, RequestCategory};
use crate::core::providers::ProviderKind;
use crate::core::types::{CallOptions, ChatRequest};
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::info;

/// Configure AI dispatch routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/chat", web::post().to(chat))
        .route("/security-analysis", web::post().to(security_analysis))
        .route("/pentest-plan", web::post().to(pentest_plan))
        .route("/optimize-strategy", web::post().to(optimize_strategy))
        .route(
            "/vulnerability-analysis",
            web::post().to(vulnerability_analysis),
        )
        .route("/compliance/ask", web::post().to(compliance_ask));
}

/// Free-form chat request
///
/// Fields are optional at the serde layer so that missing values surface as
/// a uniform 400 envelope from validation, not a deserializer error.
#[derive(Debug, Deserialize)]
struct ChatBody {
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    system_prompt: Option<String>,
    /// Defaults to Grok, the original platform's conversational provider
    #[serde(default)]
    provider: Option<ProviderKind>,
}

async fn chat(state: web::Data<AppState>, body: web::Json<ChatBody>) -> Result<HttpResponse> {
    let body = body.into_inner();
    let request = ChatRequest {
        prompt: body.prompt.unwrap_or_default(),
        system_prompt: body.system_prompt,
    };
    let pair = PromptBuilder::chat(&request)?;
    let kind = body.provider.unwrap_or(ProviderKind::Grok);

    info!(provider = kind.as_str(), "chat request");
    let result = state
        .dispatcher
        .dispatch(kind, RequestCategory::Chat, &pair, CallOptions::default())
        .await;

    Ok(HttpResponse::Ok().json(result))
}

#[derive(Debug, Deserialize)]
struct SecurityAnalysisBody {
    #[serde(default)]
    threat_description: Option<String>,
    #[serde(default)]
    target_system: Option<String>,
}

async fn security_analysis(
    state: web::Data<AppState>,
    body: web::Json<SecurityAnalysisBody>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    let pair = PromptBuilder::security_analysis(
        body.threat_description.as_deref().unwrap_or_default(),
        body.target_system.as_deref().unwrap_or_default(),
    )?;

    info!("security analysis request");
    let result = state
        .dispatcher
        .dispatch(
            ProviderKind::Grok,
            RequestCategory::SecurityAnalysis,
            &pair,
            CallOptions::default(),
        )
        .await;

    Ok(HttpResponse::Ok().json(result))
}

#[derive(Debug, Deserialize)]
struct PentestPlanBody {
    #[serde(default)]
    target_type: Option<String>,
    /// Defaults to the full catalog
    #[serde(default)]
    attack_vectors: Option<Vec<String>>,
}

async fn pentest_plan(
    state: web::Data<AppState>,
    body: web::Json<PentestPlanBody>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    let vector_ids = body.attack_vectors.unwrap_or_else(attack::catalog_ids);
    let vectors = attack::resolve_vectors(&vector_ids)?;
    let pair =
        PromptBuilder::pentest_plan(body.target_type.as_deref().unwrap_or_default(), &vectors)?;

    info!(vectors = ?vector_ids, "pentest plan request");
    let result = state
        .dispatcher
        .dispatch(
            ProviderKind::Grok,
            RequestCategory::PentestPlan,
            &pair,
            CallOptions::default(),
        )
        .await;

    Ok(HttpResponse::Ok().json(result))
}

#[derive(Debug, Deserialize)]
struct OptimizeStrategyBody {
    /// Defaults to A1, the baseline vector
    #[serde(default)]
    vector_ids: Option<Vec<String>>,
    #[serde(default)]
    intensity: Option<attack::Intensity>,
}

async fn optimize_strategy(
    state: web::Data<AppState>,
    body: web::Json<OptimizeStrategyBody>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    let vector_ids = body
        .vector_ids
        .unwrap_or_else(|| vec!["A1".to_string()]);
    let vectors = attack::resolve_vectors(&vector_ids)?;
    let intensity = body.intensity.unwrap_or_default();
    let pair = PromptBuilder::optimize_strategy(&vectors, intensity)?;

    info!(vectors = ?vector_ids, intensity = intensity.as_str(), "strategy optimization request");
    let result = state
        .dispatcher
        .dispatch(
            ProviderKind::Gemini,
            RequestCategory::StrategyOptimization,
            &pair,
            CallOptions::default(),
        )
        .await;

    Ok(HttpResponse::Ok().json(result))
}

#[derive(Debug, Deserialize)]
struct VulnerabilityAnalysisBody {
    #[serde(default)]
    target_system: Option<String>,
    #[serde(default)]
    attack_type: Option<String>,
}

async fn vulnerability_analysis(
    state: web::Data<AppState>,
    body: web::Json<VulnerabilityAnalysisBody>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    let pair = PromptBuilder::vulnerability_analysis(
        body.target_system.as_deref().unwrap_or_default(),
        body.attack_type.as_deref().unwrap_or_default(),
    )?;

    info!("vulnerability analysis request");
    let result = state
        .dispatcher
        .dispatch(
            ProviderKind::Gemini,
            RequestCategory::VulnerabilityAnalysis,
            &pair,
            CallOptions::default(),
        )
        .await;

    Ok(HttpResponse::Ok().json(result))
}

#[derive(Debug, Deserialize)]
struct ComplianceBody {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    industry_scope: Option<String>,
}

async fn compliance_ask(
    state: web::Data<AppState>,
    body: web::Json<ComplianceBody>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    let pair = PromptBuilder::compliance_question(
        body.question.as_deref().unwrap_or_default(),
        body.industry_scope.as_deref(),
    )?;

    info!("compliance question");
    let result = state
        .dispatcher
        .dispatch(
            ProviderKind::Gemini,
            RequestCategory::Compliance,
            &pair,
            CallOptions::default(),
        )
        .await;

    Ok(HttpResponse::Ok().json(result))
}

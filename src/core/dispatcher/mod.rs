//! Provider-resilient request dispatch
//!
//! The dispatcher owns the provider set and the usage counters. Every
//! dispatch is exactly one provider attempt under a bounded timeout; any
//! failure degrades to a deterministic fallback result instead of an error.
//! Callers never see a propagated provider failure.

pub mod fallback;

use crate::config::ProvidersConfig;
use crate::core::prompt::{PromptPair, RequestCategory};
use crate::core::providers::{
    ChatProvider, GeminiProvider, ProviderKind, VertexProvider, XaiProvider,
};
use crate::core::types::{CallOptions, ChatResult};
use crate::monitoring::UsageTracker;
use crate::utils::error::Result;
use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Configuration status of one registered provider
#[derive(Debug, Clone, Serialize)]
pub struct ProviderStatus {
    pub name: &'static str,
    pub model: String,
    pub configured: bool,
}

/// Dispatches chat calls to providers, absorbing failures into fallbacks
pub struct ResilientDispatcher {
    providers: HashMap<ProviderKind, Arc<dyn ChatProvider>>,
    usage: Arc<UsageTracker>,
}

impl ResilientDispatcher {
    /// Create an empty dispatcher; providers are added via [`register`]
    ///
    /// [`register`]: Self::register
    pub fn new(usage: Arc<UsageTracker>) -> Self {
        Self {
            providers: HashMap::new(),
            usage,
        }
    }

    /// Build the full provider set from configuration
    ///
    /// Unconfigured providers are registered anyway; they answer with
    /// fallback results until credentials appear at the next restart.
    pub fn from_config(config: &ProvidersConfig, usage: Arc<UsageTracker>) -> Result<Self> {
        let mut dispatcher = Self::new(usage);
        dispatcher.register(
            ProviderKind::Gemini,
            Arc::new(GeminiProvider::new(config.gemini.clone())?),
        );
        dispatcher.register(
            ProviderKind::Grok,
            Arc::new(XaiProvider::new(config.xai.clone())?),
        );
        dispatcher.register(
            ProviderKind::Vertex,
            Arc::new(VertexProvider::new(config.vertex.clone())?),
        );
        Ok(dispatcher)
    }

    /// Register a provider under a kind, replacing any previous one
    pub fn register(&mut self, kind: ProviderKind, provider: Arc<dyn ChatProvider>) {
        self.usage.register(provider.name());
        self.providers.insert(kind, provider);
    }

    /// Configuration status of every registered provider
    pub fn provider_status(&self) -> Vec<ProviderStatus> {
        let mut status: Vec<ProviderStatus> = self
            .providers
            .values()
            .map(|p| ProviderStatus {
                name: p.name(),
                model: p.model().to_string(),
                configured: p.is_configured(),
            })
            .collect();
        status.sort_by_key(|s| s.name);
        status
    }

    /// Whether at least one provider has credentials
    pub fn any_configured(&self) -> bool {
        self.providers.values().any(|p| p.is_configured())
    }

    /// Dispatch one chat call; never fails
    ///
    /// Exactly one provider attempt, bounded by the provider's timeout.
    /// On any failure the result carries `is_fallback: true` and the
    /// category's canned text.
    pub async fn dispatch(
        &self,
        kind: ProviderKind,
        category: RequestCategory,
        prompt: &PromptPair,
        options: CallOptions,
    ) -> ChatResult {
        let Some(provider) = self.providers.get(&kind) else {
            // Unreachable with from_config; kept total for manual wiring.
            self.usage.record_request(kind.as_str());
            self.usage.record_error(kind.as_str());
            return fallback_result(kind.as_str(), "unregistered", category, prompt);
        };

        self.usage.record_request(provider.name());
        debug!(
            provider = provider.name(),
            category = category.as_str(),
            "dispatching chat request"
        );

        let attempt = tokio::time::timeout(
            provider.timeout(),
            provider.send_chat(&prompt.user, prompt.system.as_deref(), options),
        )
        .await;

        match attempt {
            Ok(Ok(reply)) => ChatResult {
                success: true,
                response_text: reply.text,
                provider: provider.name().to_string(),
                model: provider.model().to_string(),
                usage: reply.usage,
                timestamp: Utc::now(),
                is_fallback: false,
            },
            Ok(Err(err)) => {
                warn!(
                    provider = provider.name(),
                    category = category.as_str(),
                    error = %err,
                    "provider call failed, serving fallback"
                );
                self.usage.record_error(provider.name());
                fallback_result(provider.name(), provider.model(), category, prompt)
            }
            Err(_elapsed) => {
                warn!(
                    provider = provider.name(),
                    category = category.as_str(),
                    timeout_ms = provider.timeout().as_millis() as u64,
                    "provider call timed out, serving fallback"
                );
                self.usage.record_error(provider.name());
                fallback_result(provider.name(), provider.model(), category, prompt)
            }
        }
    }

    /// The usage tracker shared with this dispatcher
    pub fn usage(&self) -> &Arc<UsageTracker> {
        &self.usage
    }
}

fn fallback_result(
    provider: &str,
    model: &str,
    category: RequestCategory,
    prompt: &PromptPair,
) -> ChatResult {
    ChatResult {
        success: true,
        response_text: fallback::fallback_text(category, provider, &prompt.user),
        provider: provider.to_string(),
        model: model.to_string(),
        usage: None,
        timestamp: Utc::now(),
        is_fallback: true,
    }
}

//! Dispatcher resilience properties against scripted providers
//!
//! The scripted provider counts invocations, so the tests can assert both
//! the result shape and that validation failures never reach a provider.

use async_trait::async_trait;
use redteam_gateway::core::dispatcher::ResilientDispatcher;
use redteam_gateway::core::prompt::{PromptBuilder, RequestCategory};
use redteam_gateway::core::providers::{ChatProvider, ProviderError, ProviderKind, ProviderReply};
use redteam_gateway::core::types::{CallOptions, ChatRequest};
use redteam_gateway::monitoring::UsageTracker;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Provider whose behavior is scripted per test, counting every call
struct ScriptedProvider {
    reply: Result<ProviderReply, ProviderError>,
    delay: Option<Duration>,
    timeout: Duration,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    fn succeeding(text: &str) -> Self {
        Self {
            reply: Ok(ProviderReply {
                text: text.to_string(),
                usage: None,
            }),
            delay: None,
            timeout: Duration::from_millis(500),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing(err: ProviderError) -> Self {
        Self {
            reply: Err(err),
            delay: None,
            timeout: Duration::from_millis(500),
            calls: AtomicUsize::new(0),
        }
    }

    fn hanging() -> Self {
        Self {
            reply: Ok(ProviderReply {
                text: "too late".to_string(),
                usage: None,
            }),
            delay: Some(Duration::from_secs(30)),
            timeout: Duration::from_millis(100),
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "grok"
    }

    fn model(&self) -> &str {
        "grok-3-mini"
    }

    fn is_configured(&self) -> bool {
        true
    }

    fn default_system_prompt(&self) -> &'static str {
        "test system"
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn send_chat(
        &self,
        _prompt: &str,
        _system_prompt: Option<&str>,
        _options: CallOptions,
    ) -> Result<ProviderReply, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.reply.clone()
    }
}

fn dispatcher_with(provider: Arc<ScriptedProvider>) -> ResilientDispatcher {
    let usage = Arc::new(UsageTracker::new());
    let mut dispatcher = ResilientDispatcher::new(usage);
    dispatcher.register(ProviderKind::Grok, provider);
    dispatcher
}

fn chat_pair(prompt: &str) -> redteam_gateway::core::prompt::PromptPair {
    PromptBuilder::chat(&ChatRequest {
        prompt: prompt.to_string(),
        system_prompt: None,
    })
    .unwrap()
}

#[tokio::test]
async fn stubbed_success_is_passed_through() {
    let provider = Arc::new(ScriptedProvider::succeeding("hi there"));
    let dispatcher = dispatcher_with(Arc::clone(&provider));

    let result = dispatcher
        .dispatch(
            ProviderKind::Grok,
            RequestCategory::Chat,
            &chat_pair("hello"),
            CallOptions::default(),
        )
        .await;

    assert!(result.success);
    assert!(!result.is_fallback);
    assert_eq!(result.response_text, "hi there");
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn unreachable_provider_increments_error_count_once() {
    let provider = Arc::new(ScriptedProvider::failing(ProviderError::Unavailable(
        "connection reset".to_string(),
    )));
    let dispatcher = dispatcher_with(Arc::clone(&provider));

    let before = dispatcher.usage().stats();
    assert_eq!(before.providers["grok"].total_requests, 0);

    let result = dispatcher
        .dispatch(
            ProviderKind::Grok,
            RequestCategory::Chat,
            &chat_pair("hello"),
            CallOptions::default(),
        )
        .await;

    assert!(result.is_fallback);
    assert!(!result.response_text.is_empty());

    let after = dispatcher.usage().stats();
    assert_eq!(after.providers["grok"].total_requests, 1);
    assert_eq!(after.providers["grok"].error_count, 1);
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn invalid_request_never_reaches_the_provider() {
    let provider = Arc::new(ScriptedProvider::succeeding("unused"));
    let dispatcher = dispatcher_with(Arc::clone(&provider));

    // Missing both required fields fails in the prompt builder, before any
    // dispatch happens.
    let err = PromptBuilder::security_analysis("", "").unwrap_err();
    assert!(err.to_string().contains("threat_description"));

    assert_eq!(provider.call_count(), 0);
    let stats = dispatcher.usage().stats();
    assert_eq!(stats.providers["grok"].total_requests, 0);
}

#[tokio::test]
async fn stats_are_idempotent_without_dispatch() {
    let provider = Arc::new(ScriptedProvider::succeeding("ok"));
    let dispatcher = dispatcher_with(provider);

    dispatcher
        .dispatch(
            ProviderKind::Grok,
            RequestCategory::Chat,
            &chat_pair("hello"),
            CallOptions::default(),
        )
        .await;

    let first = dispatcher.usage().stats();
    let second = dispatcher.usage().stats();
    assert_eq!(first, second);
}

#[tokio::test]
async fn dispatch_returns_within_the_timeout_budget() {
    let provider = Arc::new(ScriptedProvider::hanging());
    let dispatcher = dispatcher_with(Arc::clone(&provider));

    let started = std::time::Instant::now();
    let result = dispatcher
        .dispatch(
            ProviderKind::Grok,
            RequestCategory::Chat,
            &chat_pair("hello"),
            CallOptions::default(),
        )
        .await;

    assert!(result.is_fallback);
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(provider.call_count(), 1);
    assert_eq!(dispatcher.usage().stats().providers["grok"].error_count, 1);
}

#[tokio::test]
async fn concurrent_dispatches_count_independently() {
    let ok_provider = Arc::new(ScriptedProvider::succeeding("fine"));
    let usage = Arc::new(UsageTracker::new());
    let mut dispatcher = ResilientDispatcher::new(Arc::clone(&usage));
    dispatcher.register(ProviderKind::Grok, Arc::clone(&ok_provider) as Arc<dyn ChatProvider>);

    let pair = chat_pair("hello");
    let before = usage.stats().providers["grok"].total_requests;

    let (a, b) = tokio::join!(
        dispatcher.dispatch(
            ProviderKind::Grok,
            RequestCategory::Chat,
            &pair,
            CallOptions::default(),
        ),
        dispatcher.dispatch(
            ProviderKind::Grok,
            RequestCategory::Chat,
            &pair,
            CallOptions::default(),
        ),
    );

    assert!(!a.is_fallback);
    assert!(!b.is_fallback);
    assert_eq!(usage.stats().providers["grok"].total_requests, before + 2);
    assert_eq!(ok_provider.call_count(), 2);
}

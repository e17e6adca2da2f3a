//! HTTP-level provider adapter tests against a wiremock upstream

use redteam_gateway::config::{GeminiConfig, VertexConfig, XaiConfig};
use redteam_gateway::core::providers::{
    ChatProvider, GeminiProvider, ProviderError, VertexProvider, XaiProvider,
};
use redteam_gateway::core::types::CallOptions;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gemini_with_base(base_url: String) -> GeminiProvider {
    GeminiProvider::new(GeminiConfig {
        api_key: Some("test-key".to_string()),
        base_url,
        timeout_ms: 2_000,
        ..Default::default()
    })
    .unwrap()
}

fn xai_with_base(base_url: String) -> XaiProvider {
    XaiProvider::new(XaiConfig {
        api_key: Some("test-key".to_string()),
        base_url,
        timeout_ms: 2_000,
        ..Default::default()
    })
    .unwrap()
}

fn vertex_with_base(base_url: String) -> VertexProvider {
    VertexProvider::new(VertexConfig {
        access_token: Some("test-token".to_string()),
        project_id: Some("demo-project".to_string()),
        location: Some("us-central1".to_string()),
        base_url: Some(base_url),
        timeout_ms: 2_000,
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn gemini_parses_a_generate_content_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{ "role": "user", "parts": [{ "text": "hello" }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "analysis complete" }] }
            }],
            "usageMetadata": {
                "promptTokenCount": 10,
                "candidatesTokenCount": 20,
                "totalTokenCount": 30
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = gemini_with_base(server.uri());
    let reply = provider
        .send_chat("hello", None, CallOptions::default())
        .await
        .unwrap();

    assert_eq!(reply.text, "analysis complete");
    assert_eq!(reply.usage.unwrap().total_tokens, 30);
}

#[tokio::test]
async fn gemini_maps_401_to_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
        .mount(&server)
        .await;

    let provider = gemini_with_base(server.uri());
    let err = provider
        .send_chat("hello", None, CallOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Auth(_)));
}

#[tokio::test]
async fn gemini_maps_500_to_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let provider = gemini_with_base(server.uri());
    let err = provider
        .send_chat("hello", None, CallOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Unavailable(_)));
}

#[tokio::test]
async fn gemini_maps_garbage_body_to_response_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let provider = gemini_with_base(server.uri());
    let err = provider
        .send_chat("hello", None, CallOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Response(_)));
}

#[tokio::test]
async fn gemini_maps_connection_refused_to_unavailable() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let provider = gemini_with_base(uri);
    let err = provider
        .send_chat("hello", None, CallOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Unavailable(_)));
}

#[tokio::test]
async fn xai_sends_bearer_auth_and_parses_choices() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "grok-3-mini",
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "hi there" } }],
            "usage": { "prompt_tokens": 4, "completion_tokens": 2, "total_tokens": 6 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = xai_with_base(server.uri());
    let reply = provider
        .send_chat("hello", Some("be terse"), CallOptions::default())
        .await
        .unwrap();

    assert_eq!(reply.text, "hi there");
    assert_eq!(reply.usage.unwrap().prompt_tokens, 4);
}

#[tokio::test]
async fn xai_maps_429_to_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let provider = xai_with_base(server.uri());
    let err = provider
        .send_chat("hello", None, CallOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Unavailable(_)));
}

#[tokio::test]
async fn xai_maps_missing_choices_to_response_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "resp-1" })))
        .mount(&server)
        .await;

    let provider = xai_with_base(server.uri());
    let err = provider
        .send_chat("hello", None, CallOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Response(_)));
}

#[tokio::test]
async fn xai_times_out_against_a_stalled_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(std::time::Duration::from_secs(30))
                .set_body_json(json!({ "choices": [] })),
        )
        .mount(&server)
        .await;

    let provider = XaiProvider::new(XaiConfig {
        api_key: Some("test-key".to_string()),
        base_url: server.uri(),
        timeout_ms: 200,
        ..Default::default()
    })
    .unwrap();

    let started = std::time::Instant::now();
    let err = provider
        .send_chat("hello", None, CallOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Unavailable(_)));
    assert!(started.elapsed() < std::time::Duration::from_secs(5));
}

#[tokio::test]
async fn vertex_hits_the_project_scoped_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(
            "/v1/projects/demo-project/locations/us-central1/publishers/google/models/gemini-2.5-flash:generateContent",
        ))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "agent response" }] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = vertex_with_base(server.uri());
    let reply = provider
        .send_chat("hello", None, CallOptions::default())
        .await
        .unwrap();

    assert_eq!(reply.text, "agent response");
    assert!(reply.usage.is_none());
}

#[tokio::test]
async fn vertex_maps_403_to_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("permission denied"))
        .mount(&server)
        .await;

    let provider = vertex_with_base(server.uri());
    let err = provider
        .send_chat("hello", None, CallOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Auth(_)));
}

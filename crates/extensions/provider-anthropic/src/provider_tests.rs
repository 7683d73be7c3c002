use super::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn key(value: &str) -> SecretString {
    SecretString::from(value)
}

#[test]
fn test_provider_kind() {
    let provider = AnthropicProvider::new(key("sk-ant"));
    assert_eq!(provider.kind(), ProviderKind::Anthropic);
}

#[test]
fn test_is_configured() {
    assert!(AnthropicProvider::new(key("sk-ant")).is_configured());
    assert!(!AnthropicProvider::new(key("")).is_configured());
}

#[test]
fn test_defaults() {
    let provider = AnthropicProvider::new(key("sk-ant"));
    assert_eq!(provider.endpoint(), "https://api.anthropic.com/v1/messages");
    assert_eq!(provider.model, "claude-3-sonnet-20240229");
    assert_eq!(provider.max_tokens, 1024);
}

#[test]
fn test_build_request_uses_top_level_system() {
    let provider = AnthropicProvider::new(key("sk-ant")).with_max_tokens(2048);
    let request = provider.build_request("Explain DP");
    assert_eq!(request.system, TUTOR_SYSTEM_PROMPT);
    assert_eq!(request.max_tokens, 2048);
    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.messages[0].role, "user");
    assert_eq!(request.messages[0].content, "Explain DP");
}

#[tokio::test]
async fn test_get_assistance_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(header("x-api-key", "sk-ant"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "model": "claude-3-sonnet-20240229",
            "max_tokens": 1024
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_1",
            "type": "message",
            "role": "assistant",
            "content": [{ "type": "text", "text": "Reverse with two indices." }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = AnthropicProvider::with_url(key("sk-ant"), mock_server.uri());
    let text = provider.get_assistance("Reverse a string").await.unwrap();
    assert_eq!(text, "Reverse with two indices.");
}

#[tokio::test]
async fn test_get_assistance_no_text_block() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": [] })))
        .mount(&mock_server)
        .await;

    let provider = AnthropicProvider::with_url(key("sk-ant"), mock_server.uri());
    assert_eq!(provider.get_assistance("x").await.unwrap(), "");
}

#[tokio::test]
async fn test_get_assistance_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(529).set_body_json(json!({
            "type": "error",
            "error": { "type": "overloaded_error", "message": "Overloaded" }
        })))
        .mount(&mock_server)
        .await;

    let provider = AnthropicProvider::with_url(key("sk-ant"), mock_server.uri());
    match provider.get_assistance("x").await.unwrap_err() {
        ProviderError::ApiError { status, message } => {
            assert_eq!(status, 529);
            assert_eq!(message, "Overloaded");
        }
        other => panic!("Expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_assistance_forbidden() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&mock_server)
        .await;

    let provider = AnthropicProvider::with_url(key("sk-ant"), mock_server.uri());
    let err = provider.get_assistance("x").await.unwrap_err();
    assert!(matches!(err, ProviderError::AuthenticationFailed(_)));
}

#[tokio::test]
async fn test_network_error() {
    // Nothing listens on port 9 on the loopback interface.
    let provider = AnthropicProvider::with_url(key("sk-ant"), "http://127.0.0.1:9");
    let err = provider.get_assistance("x").await.unwrap_err();
    assert!(matches!(err, ProviderError::Network(_)));
}

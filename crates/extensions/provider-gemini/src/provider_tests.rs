use super::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn key(value: &str) -> SecretString {
    SecretString::from(value)
}

#[test]
fn test_provider_kind() {
    let provider = GeminiProvider::new(key("g-key"));
    assert_eq!(provider.kind(), ProviderKind::Gemini);
}

#[test]
fn test_is_configured() {
    assert!(GeminiProvider::new(key("g-key")).is_configured());
    assert!(!GeminiProvider::new(key("")).is_configured());
}

#[test]
fn test_default_endpoint() {
    let provider = GeminiProvider::new(key("g-key"));
    assert_eq!(
        provider.client.endpoint(&provider.model),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
    );
}

#[test]
fn test_build_request_shape() {
    let provider = GeminiProvider::new(key("g-key")).with_temperature(0.3);
    let request = provider.build_request("Explain BFS");
    assert_eq!(request.contents.len(), 1);
    assert_eq!(request.contents[0].parts[0].text.as_deref(), Some("Explain BFS"));
    assert_eq!(
        request.system_instruction.parts[0].text.as_deref(),
        Some(TUTOR_SYSTEM_PROMPT)
    );
    assert_eq!(request.generation_config.temperature, Some(0.3));
}

#[tokio::test]
async fn test_get_assistance_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .and(header("x-goog-api-key", "g-key"))
        .and(body_partial_json(json!({
            "systemInstruction": { "parts": [{ "text": TUTOR_SYSTEM_PROMPT }] }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Use a " }, { "text": "queue." }] },
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = GeminiProvider::with_url(key("g-key"), mock_server.uri());
    let text = provider.get_assistance("Explain BFS").await.unwrap();
    assert_eq!(text, "Use a queue.");
}

#[tokio::test]
async fn test_get_assistance_custom_model() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = GeminiProvider::with_url(key("g-key"), mock_server.uri())
        .with_model("gemini-2.0-flash");
    assert_eq!(provider.get_assistance("x").await.unwrap(), "");
}

#[tokio::test]
async fn test_get_assistance_bad_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT" }
        })))
        .mount(&mock_server)
        .await;

    let provider = GeminiProvider::with_url(key("g-key"), mock_server.uri());
    match provider.get_assistance("x").await.unwrap_err() {
        ProviderError::ApiError { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "API key not valid");
        }
        other => panic!("Expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_assistance_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let provider = GeminiProvider::with_url(key("g-key"), mock_server.uri());
    let err = provider.get_assistance("x").await.unwrap_err();
    assert!(matches!(err, ProviderError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_unconfigured_provider() {
    let provider = GeminiProvider::new(key(""));
    let err = provider.get_assistance("x").await.unwrap_err();
    assert!(matches!(err, ProviderError::NotConfigured(ProviderKind::Gemini)));
}

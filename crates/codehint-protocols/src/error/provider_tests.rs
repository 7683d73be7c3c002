use super::*;

#[test]
fn test_from_api_response_unauthorized() {
    let err = ProviderError::from_api_response(401, "Invalid API key".to_string());
    match err {
        ProviderError::AuthenticationFailed(message) => assert_eq!(message, "Invalid API key"),
        other => panic!("Expected AuthenticationFailed, got {:?}", other),
    }
}

#[test]
fn test_from_api_response_forbidden() {
    let err = ProviderError::from_api_response(403, "forbidden".to_string());
    assert!(matches!(err, ProviderError::AuthenticationFailed(_)));
}

#[test]
fn test_from_api_response_rate_limited() {
    let err = ProviderError::from_api_response(429, "slow down".to_string());
    assert!(matches!(err, ProviderError::RateLimited { .. }));
}

#[test]
fn test_from_api_response_server_error() {
    let err = ProviderError::from_api_response(500, "Internal Server Error".to_string());
    match err {
        ProviderError::ApiError { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("Expected ApiError, got {:?}", other),
    }
}

#[test]
fn test_not_configured_display() {
    let err = ProviderError::NotConfigured(ProviderKind::Gemini);
    assert_eq!(err.to_string(), "Provider not configured: gemini");
}

#[test]
fn test_network_display() {
    let err = ProviderError::Network("Connection refused".to_string());
    assert!(err.to_string().contains("Network error"));
    assert!(err.to_string().contains("Connection refused"));
}

#[test]
fn test_malformed_display() {
    let err = ProviderError::MalformedResponse("expected value at line 1".to_string());
    assert!(err.to_string().starts_with("Malformed response"));
}

#[test]
fn test_from_error_body_extracts_message() {
    let body = r#"{"error": {"message": "model not found", "type": "invalid_request_error"}}"#;
    let err = ProviderError::from_error_body(404, body.to_string());
    match err {
        ProviderError::ApiError { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "model not found");
        }
        other => panic!("Expected ApiError, got {:?}", other),
    }
}

#[test]
fn test_from_error_body_keeps_plain_body() {
    let err = ProviderError::from_error_body(502, "Bad Gateway".to_string());
    match err {
        ProviderError::ApiError { message, .. } => assert_eq!(message, "Bad Gateway"),
        other => panic!("Expected ApiError, got {:?}", other),
    }
}

//! AI provider errors.

use thiserror::Error;

use crate::provider::ProviderKind;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(ProviderKind),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Rate limited: retry after {retry_after_seconds} seconds")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl ProviderError {
    /// Classify a non-success HTTP status returned by an upstream API.
    pub fn from_api_response(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ProviderError::AuthenticationFailed(message),
            429 => ProviderError::RateLimited {
                retry_after_seconds: 0,
            },
            _ => ProviderError::ApiError { status, message },
        }
    }

    /// Like [`ProviderError::from_api_response`], but pulls the message out of
    /// an `{"error": {"message": ...}}` body when the upstream sends one.
    pub fn from_error_body(status: u16, body: String) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(String::from))
            .unwrap_or(body);
        Self::from_api_response(status, message)
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;

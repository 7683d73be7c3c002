//! Gemini API client.

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use codehint_protocols::error::ProviderError;

use crate::types::*;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini API client.
pub struct GeminiClient {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    pub fn new(api_key: SecretString, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .connect_timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    pub(crate) fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Generate content (non-streaming).
    ///
    /// The key travels in the `x-goog-api-key` header so it never shows up
    /// in a logged URL.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError> {
        debug!("Gemini generate_content: model={}", model);

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ProviderError::from_error_body(status.as_u16(), body));
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::MalformedResponse(e.to_string()))
    }
}

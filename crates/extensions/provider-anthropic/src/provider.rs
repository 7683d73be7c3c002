//! Anthropic provider implementation.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use codehint_protocols::error::ProviderError;
use codehint_protocols::provider::{AssistanceProvider, ProviderKind, TUTOR_SYSTEM_PROMPT};

use crate::api::{ApiMessage, ApiRequest, ApiResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const API_VERSION: &str = "2023-06-01";

/// Anthropic provider.
pub struct AnthropicProvider {
    api_key: SecretString,
    base_url: String,
    model: String,
    max_tokens: u32,
    client: reqwest::Client,
}

impl AnthropicProvider {
    pub fn new(api_key: SecretString) -> Self {
        Self::with_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_url(api_key: SecretString, base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            client,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/messages", self.base_url)
    }

    fn build_request(&self, prompt: &str) -> ApiRequest {
        ApiRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            system: TUTOR_SYSTEM_PROMPT.to_string(),
            messages: vec![ApiMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        }
    }
}

#[async_trait]
impl AssistanceProvider for AnthropicProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    fn is_configured(&self) -> bool {
        !self.api_key.expose_secret().trim().is_empty()
    }

    async fn get_assistance(&self, prompt: &str) -> Result<String, ProviderError> {
        if !self.is_configured() {
            return Err(ProviderError::NotConfigured(self.kind()));
        }

        debug!("Anthropic messages: model={}, max_tokens={}", self.model, self.max_tokens);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", API_VERSION)
            .json(&self.build_request(prompt))
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !status.is_success() {
            // {"type": "error", "error": {"type": "...", "message": "..."}}
            return Err(ProviderError::from_error_body(status.as_u16(), body));
        }

        let api_response: ApiResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;
        Ok(api_response.into_text())
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;

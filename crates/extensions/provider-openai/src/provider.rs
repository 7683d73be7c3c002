//! OpenAI provider implementation.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use codehint_protocols::error::ProviderError;
use codehint_protocols::provider::{AssistanceProvider, ProviderKind, TUTOR_SYSTEM_PROMPT};

use crate::api::{ApiMessage, ApiRequest, ApiResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// OpenAI provider.
pub struct OpenAIProvider {
    api_key: SecretString,
    base_url: String,
    model: String,
    temperature: f32,
    client: reqwest::Client,
}

impl OpenAIProvider {
    pub fn new(api_key: SecretString) -> Self {
        Self::with_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create provider with a custom base URL (for OpenAI-compatible APIs).
    pub fn with_url(api_key: SecretString, base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            client,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_request(&self, prompt: &str) -> ApiRequest {
        ApiRequest {
            model: self.model.clone(),
            messages: vec![ApiMessage::system(TUTOR_SYSTEM_PROMPT), ApiMessage::user(prompt)],
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl AssistanceProvider for OpenAIProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAI
    }

    fn is_configured(&self) -> bool {
        !self.api_key.expose_secret().trim().is_empty()
    }

    async fn get_assistance(&self, prompt: &str) -> Result<String, ProviderError> {
        if !self.is_configured() {
            return Err(ProviderError::NotConfigured(self.kind()));
        }

        debug!("OpenAI chat completion: model={}", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.api_key.expose_secret())
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

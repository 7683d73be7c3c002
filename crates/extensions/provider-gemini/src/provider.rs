//! Gemini provider implementation.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use codehint_protocols::error::ProviderError;
use codehint_protocols::provider::{AssistanceProvider, ProviderKind, TUTOR_SYSTEM_PROMPT};

use crate::client::{GeminiClient, DEFAULT_BASE_URL};
use crate::types::*;

/// Must accept `systemInstruction`; the 1.0 `gemini-pro` model does not.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Gemini provider.
pub struct GeminiProvider {
    client: GeminiClient,
    model: String,
    generation_config: GenerationConfig,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    pub fn new(api_key: SecretString) -> Self {
        Self::with_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_url(api_key: SecretString, base_url: impl Into<String>) -> Self {
        Self {
            client: GeminiClient::new(api_key, base_url),
            model: DEFAULT_MODEL.to_string(),
            generation_config: GenerationConfig::default(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.generation_config.temperature = Some(temperature);
        self
    }

    pub fn with_max_output_tokens(mut self, max_tokens: u32) -> Self {
        self.generation_config.max_output_tokens = Some(max_tokens);
        self
    }

    fn build_request(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::text(prompt)],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part::text(TUTOR_SYSTEM_PROMPT)],
            },
            generation_config: self.generation_config.clone(),
        }
    }
}

#[async_trait]
impl AssistanceProvider for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn is_configured(&self) -> bool {
        !self.client.api_key().expose_secret().trim().is_empty()
    }

    async fn get_assistance(&self, prompt: &str) -> Result<String, ProviderError> {
        if !self.is_configured() {
            return Err(ProviderError::NotConfigured(self.kind()));
        }

        let request = self.build_request(prompt);
        let response = self.client.generate_content(&self.model, &request).await?;
        Ok(response.text())
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;

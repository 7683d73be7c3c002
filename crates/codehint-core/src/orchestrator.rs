//! Assistance orchestration: prompt construction, provider selection and
//! reply normalization.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{error, info};

use codehint_protocols::assistance::{split_hint_lines, AssistanceResponse, ResponseKind};
use codehint_protocols::error::AssistError;
use codehint_protocols::provider::ProviderKind;

use crate::registry::ProviderRegistry;

/// Owns the current provider selection and turns requests into answers.
pub struct AssistanceService {
    registry: Arc<ProviderRegistry>,
    current: RwLock<ProviderKind>,
}

impl AssistanceService {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self::with_default(registry, ProviderKind::default())
    }

    /// Start with `initial` selected. The initial kind is not checked
    /// against the configured set.
    pub fn with_default(registry: Arc<ProviderRegistry>, initial: ProviderKind) -> Self {
        Self {
            registry,
            current: RwLock::new(initial),
        }
    }

    pub fn current_provider(&self) -> ProviderKind {
        *self.current.read()
    }

    pub fn configured_providers(&self) -> Vec<ProviderKind> {
        self.registry.list_configured_providers()
    }

    /// Select `kind` if it is configured. On failure the selection is
    /// unchanged.
    pub fn set_provider(&self, kind: ProviderKind) -> Result<(), AssistError> {
        self.check_provider(kind)?;
        *self.current.write() = kind;
        info!("Provider set to {}", kind);
        Ok(())
    }

    /// `InvalidProvider` unless `kind` is configured. Does not change the
    /// selection.
    pub fn check_provider(&self, kind: ProviderKind) -> Result<(), AssistError> {
        if self.registry.list_configured_providers().contains(&kind) {
            Ok(())
        } else {
            Err(AssistError::InvalidProvider(kind.to_string()))
        }
    }

    /// Build the prompt sent to the provider.
    pub fn build_prompt(problem: &str, snippet: Option<&str>, kind: ResponseKind) -> String {
        match snippet.filter(|s| !s.is_empty()) {
            Some(snippet) => {
                let ask = match kind {
                    ResponseKind::Hint => "a helpful hint",
                    ResponseKind::Solution => "a detailed solution",
                };
                format!(
                    "For this part of the coding problem: \"{}\", please provide {}.",
                    snippet, ask
                )
            }
            None => {
                let ask = match kind {
                    ResponseKind::Hint => "step-by-step hints",
                    ResponseKind::Solution => "a complete solution with explanation",
                };
                format!("For this coding problem: \"{}\", please provide {}.", problem, ask)
            }
        }
    }

    /// Split provider text into hint lines, keeping the text itself unchanged.
    pub fn normalize(text: &str) -> (Vec<String>, String) {
        (split_hint_lines(text), text.to_string())
    }

    /// Ask the selected provider for help.
    ///
    /// The provider is resolved once, when the call starts; a concurrent
    /// [`AssistanceService::set_provider`] does not affect a call in flight.
    /// The returned response has no target language; callers fill it in.
    pub async fn request_assistance(
        &self,
        problem: &str,
        snippet: Option<&str>,
        kind: ResponseKind,
    ) -> Result<AssistanceResponse, AssistError> {
        let provider_kind = self.current_provider();
        let provider = self.registry.get_provider(provider_kind);
        let prompt = Self::build_prompt(problem, snippet, kind);

        let text = provider.get_assistance(&prompt).await.map_err(|e| {
            error!("Provider {} failed: {}", provider_kind, e);
            AssistError::AssistanceUnavailable
        })?;

        let (hint_lines, explanation) = Self::normalize(&text);
        Ok(AssistanceResponse {
            hint_lines,
            explanation,
            target_language: String::new(),
        })
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;

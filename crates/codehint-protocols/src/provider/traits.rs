//! Assistance provider trait definition.

use async_trait::async_trait;

use super::ProviderKind;
use crate::error::ProviderError;

/// System instruction sent alongside every prompt.
pub const TUTOR_SYSTEM_PROMPT: &str =
    "You are a helpful coding tutor. Provide clear, educational responses with examples.";

/// Core trait for AI backends.
///
/// Implementations map the shared prompt onto their backend's request shape
/// and unwrap the reply into plain text. A decoded reply that lacks the
/// expected text field yields an empty string rather than an error.
#[async_trait]
pub trait AssistanceProvider: Send + Sync {
    /// Which backend this instance talks to.
    fn kind(&self) -> ProviderKind;

    /// Whether a non-empty credential is present. Never touches the network.
    fn is_configured(&self) -> bool;

    /// Send one prompt and return the generated text.
    async fn get_assistance(&self, prompt: &str) -> Result<String, ProviderError>;
}

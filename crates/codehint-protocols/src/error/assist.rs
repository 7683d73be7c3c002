//! Orchestrator errors.

use thiserror::Error;

/// Errors surfaced by the assistance orchestrator.
///
/// Provider internals never appear here: upstream failures collapse into
/// [`AssistError::AssistanceUnavailable`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssistError {
    #[error("Provider not available: {0}")]
    InvalidProvider(String),

    #[error("Failed to get AI assistance")]
    AssistanceUnavailable,
}

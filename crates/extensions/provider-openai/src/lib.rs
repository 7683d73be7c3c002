//! OpenAI chat-completion provider for CodeHint.

mod api;
mod provider;

pub use provider::{OpenAIProvider, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE};

//! Anthropic messages provider for CodeHint.

mod api;
mod provider;

pub use provider::{AnthropicProvider, API_VERSION, DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};

//! # CodeHint Provider - Gemini
//!
//! Google Gemini generate-content provider for CodeHint.

mod client;
mod provider;
mod types;

pub use client::DEFAULT_BASE_URL;
pub use provider::{GeminiProvider, DEFAULT_MODEL};
pub use types::*;

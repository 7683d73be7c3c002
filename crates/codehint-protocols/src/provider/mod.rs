//! AI provider protocol definitions.
//!
//! Providers connect to chat/generation APIs (OpenAI, Anthropic, Gemini) and
//! turn a single prompt into plain text.

mod kind;
mod traits;

pub use kind::*;
pub use traits::*;

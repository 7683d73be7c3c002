//! Anthropic Messages API types.

use serde::{Deserialize, Serialize};

/// Messages API request.
#[derive(Debug, Serialize)]
pub struct ApiRequest {
    pub model: String,
    pub max_tokens: u32,
    pub system: String,
    pub messages: Vec<ApiMessage>,
}

#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub role: String,
    pub content: String,
}

/// Messages API response.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

/// A response content block. Non-text blocks carry no `text`.
#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl ApiResponse {
    /// Text of the first `text` block, or empty when there is none.
    pub fn into_text(self) -> String {
        self.content
            .into_iter()
            .find(|block| block.block_type == "text")
            .and_then(|block| block.text)
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;

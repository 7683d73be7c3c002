//! Assistance request/response types.

use serde::{Deserialize, Serialize};

/// Shape of the answer the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    #[default]
    Hint,
    Solution,
}

/// One user request for help with a coding problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistanceRequest {
    /// Full problem statement as scraped from the page.
    pub problem_text: String,

    /// Optional fragment the user highlighted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_snippet: Option<String>,

    #[serde(default)]
    pub response_kind: ResponseKind,

    /// Programming language the answer should use.
    #[serde(rename = "language")]
    pub target_language: String,
}

impl AssistanceRequest {
    pub fn new(
        problem_text: impl Into<String>,
        response_kind: ResponseKind,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            problem_text: problem_text.into(),
            selected_snippet: None,
            response_kind,
            target_language: target_language.into(),
        }
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.selected_snippet = Some(snippet.into());
        self
    }

    /// The highlighted snippet, treating an empty selection as no selection.
    pub fn snippet(&self) -> Option<&str> {
        self.selected_snippet.as_deref().filter(|s| !s.is_empty())
    }
}

/// Normalized provider reply.
///
/// `hint_lines` is a view of `explanation`: its non-blank lines, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistanceResponse {
    #[serde(rename = "hints")]
    pub hint_lines: Vec<String>,

    pub explanation: String,

    #[serde(rename = "language", default)]
    pub target_language: String,
}

impl AssistanceResponse {
    /// Build a response from raw provider text.
    pub fn from_explanation(explanation: String, target_language: impl Into<String>) -> Self {
        Self {
            hint_lines: split_hint_lines(&explanation),
            explanation,
            target_language: target_language.into(),
        }
    }
}

/// Split text on line breaks, dropping lines that are empty or whitespace-only.
pub fn split_hint_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "assistance_tests.rs"]
mod tests;

//! Presentation surface for finished answers.
//!
//! The popup page reads its payload with
//! `JSON.parse(decodeURIComponent(new URLSearchParams(search).get('data')))`,
//! so the payload is component-encoded first and form-encoded on top.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use codehint_protocols::assistance::AssistanceResponse;

#[derive(Debug, Error)]
pub enum PresentError {
    #[error("Failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to launch opener '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Shows a solution URL to the user.
#[async_trait]
pub trait Presenter: Send + Sync {
    async fn present(&self, url: &str) -> Result<(), PresentError>;
}

/// Logs the URL only.
#[derive(Debug, Default)]
pub struct LogPresenter;

#[async_trait]
impl Presenter for LogPresenter {
    async fn present(&self, url: &str) -> Result<(), PresentError> {
        info!("Solution ready: {}", url);
        Ok(())
    }
}

/// Launches an external opener (e.g. `xdg-open`) with the URL as its only
/// argument. The child is not awaited.
#[derive(Debug)]
pub struct CommandPresenter {
    program: String,
}

impl CommandPresenter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl Presenter for CommandPresenter {
    async fn present(&self, url: &str) -> Result<(), PresentError> {
        debug!("Opening solution with {}", self.program);
        tokio::process::Command::new(&self.program)
            .arg(url)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()
            .map_err(|source| PresentError::Launch {
                program: self.program.clone(),
                source,
            })?;
        Ok(())
    }
}

/// What the popup page renders.
#[derive(Serialize)]
struct SolutionPayload<'a> {
    hints: &'a [String],
    explanation: &'a str,
}

/// `{base}/solution.html?data=<payload>`.
pub fn solution_url(base: &str, response: &AssistanceResponse) -> Result<String, PresentError> {
    let payload = serde_json::to_string(&SolutionPayload {
        hints: &response.hint_lines,
        explanation: &response.explanation,
    })?;
    let component = encode_uri_component(&payload);
    let query: String = url::form_urlencoded::byte_serialize(component.as_bytes()).collect();
    Ok(format!(
        "{}/solution.html?data={}",
        base.trim_end_matches('/'),
        query
    ))
}

/// `encodeURIComponent`: everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(text: &str) -> AssistanceResponse {
        AssistanceResponse::from_explanation(text.to_string(), "python")
    }

    /// Inverse of the two encoding layers, as the popup page applies them.
    fn decode_payload(url: &str) -> serde_json::Value {
        let query = url.split_once('?').unwrap().1;
        let (_, data) = url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| *k == "data")
            .unwrap();
        let json = percent_encoding::percent_decode_str(&data)
            .decode_utf8()
            .unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_encode_uri_component_reserved() {
        assert_eq!(encode_uri_component("a b&c=d/e?"), "a%20b%26c%3Dd%2Fe%3F");
        assert_eq!(encode_uri_component("{\"x\":1}"), "%7B%22x%22%3A1%7D");
    }

    #[test]
    fn test_encode_uri_component_unreserved() {
        let unreserved = "AZaz09-_.!~*'()";
        assert_eq!(encode_uri_component(unreserved), unreserved);
    }

    #[test]
    fn test_encode_uri_component_utf8() {
        assert_eq!(encode_uri_component("é"), "%C3%A9");
        assert_eq!(encode_uri_component("\n"), "%0A");
    }

    #[test]
    fn test_solution_url_shape() {
        let url = solution_url("chrome-extension://codehint/", &response("hi")).unwrap();
        assert!(url.starts_with("chrome-extension://codehint/solution.html?data="));
        // The component layer's '%' is itself form-encoded.
        assert!(url.contains("%257B"));
    }

    #[test]
    fn test_solution_url_payload_decodes() {
        let text = "Use two pointers.\n\n```python\nl, r = 0, len(s) - 1\n```";
        let url = solution_url("http://localhost", &response(text)).unwrap();

        let payload = decode_payload(&url);
        assert_eq!(payload["explanation"], text);
        assert_eq!(payload["hints"][0], "Use two pointers.");
        assert!(payload.get("language").is_none());
    }

    #[tokio::test]
    async fn test_log_presenter() {
        assert!(LogPresenter.present("http://localhost/solution.html").await.is_ok());
    }

    #[tokio::test]
    async fn test_command_presenter_missing_program() {
        let presenter = CommandPresenter::new("/nonexistent/codehint-opener");
        let err = presenter.present("http://localhost").await.unwrap_err();
        assert!(matches!(err, PresentError::Launch { .. }));
    }
}

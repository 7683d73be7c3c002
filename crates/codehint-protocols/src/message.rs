//! Broker message envelope.
//!
//! Page and popup contexts exchange JSON objects of the form
//! `{ "type": <TAG>, ...payload }` with the broker. Field names here are the
//! compatibility contract with those contexts.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::assistance::{AssistanceRequest, AssistanceResponse, ResponseKind};
use crate::error::{BrokerError, ErrorCode};

pub const TAG_PING: &str = "PING";
pub const TAG_PROVIDER_CHANGED: &str = "PROVIDER_CHANGED";
pub const TAG_ASSISTANCE_REQUESTED: &str = "ASSISTANCE_REQUESTED";
pub const TAG_HELP_REQUESTED: &str = "HELP_REQUESTED";
pub const TAG_TEXT_SELECTED: &str = "TEXT_SELECTED";

/// An inbound broker message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrokerMessage {
    /// Readiness probe.
    Ping,

    /// Switch the active provider.
    ProviderChanged { provider: String },

    /// Ask the current provider for help.
    AssistanceRequested(AssistanceRequest),

    /// Any tag the broker does not handle.
    Unrecognized { tag: String },
}

/// Problem data posted by the in-page script under the older tags.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageProblem {
    description: String,
    #[serde(default)]
    selected_text: Option<String>,
    language: String,
}

#[derive(Debug, Deserialize)]
struct PageEnvelope {
    data: PageProblem,
}

#[derive(Debug, Deserialize)]
struct ProviderChangedPayload {
    provider: String,
}

impl BrokerMessage {
    /// Parse a raw envelope.
    ///
    /// Unknown tags parse successfully into [`BrokerMessage::Unrecognized`];
    /// a known tag with a bad payload is an [`BrokerError::InvalidMessage`].
    pub fn from_value(value: Value) -> Result<Self, BrokerError> {
        let tag = match value.get("type") {
            Some(Value::String(tag)) => tag.clone(),
            Some(other) => other.to_string(),
            None => "undefined".to_string(),
        };

        let invalid = |e: serde_json::Error| BrokerError::InvalidMessage(format!("{}: {}", tag, e));

        match tag.as_str() {
            TAG_PING => Ok(BrokerMessage::Ping),
            TAG_PROVIDER_CHANGED => {
                let payload: ProviderChangedPayload =
                    serde_json::from_value(value).map_err(invalid)?;
                Ok(BrokerMessage::ProviderChanged {
                    provider: payload.provider,
                })
            }
            TAG_ASSISTANCE_REQUESTED => {
                let request: AssistanceRequest = serde_json::from_value(value).map_err(invalid)?;
                Ok(BrokerMessage::AssistanceRequested(request))
            }
            TAG_HELP_REQUESTED | TAG_TEXT_SELECTED => {
                let envelope: PageEnvelope = serde_json::from_value(value).map_err(invalid)?;
                let problem = envelope.data;
                let mut request = AssistanceRequest::new(
                    problem.description,
                    ResponseKind::Solution,
                    problem.language,
                );
                if tag == TAG_TEXT_SELECTED {
                    request.response_kind = ResponseKind::Hint;
                    request.selected_snippet = problem.selected_text;
                }
                Ok(BrokerMessage::AssistanceRequested(request))
            }
            _ => Ok(BrokerMessage::Unrecognized { tag: tag.clone() }),
        }
    }

    /// Encode into the canonical envelope.
    pub fn to_value(&self) -> Value {
        match self {
            BrokerMessage::Ping => json!({ "type": TAG_PING }),
            BrokerMessage::ProviderChanged { provider } => {
                json!({ "type": TAG_PROVIDER_CHANGED, "provider": provider })
            }
            BrokerMessage::AssistanceRequested(request) => {
                let mut value = serde_json::to_value(request).unwrap_or_else(|_| json!({}));
                value["type"] = Value::String(TAG_ASSISTANCE_REQUESTED.to_string());
                value
            }
            BrokerMessage::Unrecognized { tag } => json!({ "type": tag }),
        }
    }

    /// The envelope tag, for logging.
    pub fn tag(&self) -> &str {
        match self {
            BrokerMessage::Ping => TAG_PING,
            BrokerMessage::ProviderChanged { .. } => TAG_PROVIDER_CHANGED,
            BrokerMessage::AssistanceRequested(_) => TAG_ASSISTANCE_REQUESTED,
            BrokerMessage::Unrecognized { tag } => tag,
        }
    }
}

/// A broker reply. Failures travel over the same channel as successes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BrokerReply {
    /// Answer to `PING`.
    Pong { success: bool, initialized: bool },

    /// Normalized assistance result.
    Assistance { data: AssistanceResponse },

    /// Acknowledgement of a provider change.
    Ack { success: bool },

    Failure { error: String, code: ErrorCode },
}

impl BrokerReply {
    pub fn pong(initialized: bool) -> Self {
        BrokerReply::Pong {
            success: true,
            initialized,
        }
    }

    pub fn ack() -> Self {
        BrokerReply::Ack { success: true }
    }

    pub fn failure(error: &BrokerError) -> Self {
        BrokerReply::Failure {
            error: error.to_string(),
            code: error.code(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, BrokerReply::Failure { .. })
    }
}

impl From<Result<BrokerReply, BrokerError>> for BrokerReply {
    fn from(result: Result<BrokerReply, BrokerError>) -> Self {
        result.unwrap_or_else(|e| BrokerReply::failure(&e))
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;

//! Broker errors and their wire codes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::AssistError;

#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("Background script not initialized")]
    NotInitialized,

    #[error("Unknown message type: {0}")]
    UnknownMessage(String),

    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    #[error(transparent)]
    Assist(#[from] AssistError),

    #[error("Preference store error: {0}")]
    PreferenceStore(String),

    #[error("Broker unavailable")]
    Unavailable,
}

/// Machine-readable failure code carried next to the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotInitialized,
    InvalidProvider,
    AssistanceUnavailable,
    UnknownMessage,
    InvalidMessage,
    PreferenceStore,
    Unavailable,
}

impl BrokerError {
    pub fn code(&self) -> ErrorCode {
        match self {
            BrokerError::NotInitialized => ErrorCode::NotInitialized,
            BrokerError::UnknownMessage(_) => ErrorCode::UnknownMessage,
            BrokerError::InvalidMessage(_) => ErrorCode::InvalidMessage,
            BrokerError::Assist(AssistError::InvalidProvider(_)) => ErrorCode::InvalidProvider,
            BrokerError::Assist(AssistError::AssistanceUnavailable) => {
                ErrorCode::AssistanceUnavailable
            }
            BrokerError::PreferenceStore(_) => ErrorCode::PreferenceStore,
            BrokerError::Unavailable => ErrorCode::Unavailable,
        }
    }
}

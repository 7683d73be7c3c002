//! Broker lifecycle state.

use std::fmt;

use serde::Serialize;

/// Broker state. Entered once, in order; `Ready` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum BrokerState {
    /// Spawned, startup not begun.
    Uninitialized = 0,
    /// Loading the saved preference.
    Initializing = 1,
    /// Handling all messages.
    Ready = 2,
    /// Startup failed; only `PING` is answered.
    Failed = 3,
}

impl From<u8> for BrokerState {
    fn from(v: u8) -> Self {
        match v {
            1 => BrokerState::Initializing,
            2 => BrokerState::Ready,
            3 => BrokerState::Failed,
            _ => BrokerState::Uninitialized,
        }
    }
}

impl BrokerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrokerState::Uninitialized => "uninitialized",
            BrokerState::Initializing => "initializing",
            BrokerState::Ready => "ready",
            BrokerState::Failed => "failed",
        }
    }
}

impl fmt::Display for BrokerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8_roundtrip() {
        for state in [
            BrokerState::Uninitialized,
            BrokerState::Initializing,
            BrokerState::Ready,
            BrokerState::Failed,
        ] {
            assert_eq!(BrokerState::from(state as u8), state);
        }
        assert_eq!(BrokerState::from(200), BrokerState::Uninitialized);
    }

    #[test]
    fn test_serialization_matches_display() {
        let json = serde_json::to_string(&BrokerState::Ready).unwrap();
        assert_eq!(json, "\"ready\"");
        assert_eq!(BrokerState::Failed.to_string(), "failed");
    }
}

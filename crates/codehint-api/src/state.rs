//! Application state.

use std::time::{Duration, Instant};

use codehint_core::BrokerHandle;

/// Application state shared across handlers.
pub struct AppState {
    pub broker: BrokerHandle,
    start_time: Instant,
}

impl AppState {
    pub fn new(broker: BrokerHandle) -> Self {
        Self {
            broker,
            start_time: Instant::now(),
        }
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}

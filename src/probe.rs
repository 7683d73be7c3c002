//! Readiness probe against a running broker.

use std::time::Duration;

use tracing::debug;

use codehint_config::ProbeConfig;
use codehint_protocols::message::{BrokerMessage, BrokerReply};

pub(crate) const NOT_READY: &str = "Background script not ready after multiple attempts";

/// PINGs `{base}/message` until the broker answers initialized.
pub(crate) struct Prober {
    client: reqwest::Client,
    url: String,
    attempts: u32,
    delay: Duration,
    timeout: Duration,
}

impl Prober {
    pub(crate) fn new(base_url: &str, config: &ProbeConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: format!("{}/message", base_url.trim_end_matches('/')),
            attempts: config.attempts,
            delay: Duration::from_millis(config.delay_ms),
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    /// One PING. Transport failures and non-pong replies count as not ready.
    async fn ping(&self) -> bool {
        let response = self
            .client
            .post(&self.url)
            .timeout(self.timeout)
            .json(&BrokerMessage::Ping.to_value())
            .send()
            .await;

        let reply = match response {
            Ok(response) => response.json::<BrokerReply>().await,
            Err(e) => {
                debug!("Ping failed: {}", e);
                return false;
            }
        };

        match reply {
            Ok(BrokerReply::Pong {
                success,
                initialized,
            }) => success && initialized,
            Ok(other) => {
                debug!("Unexpected ping reply: {:?}", other);
                false
            }
            Err(e) => {
                debug!("Unreadable ping reply: {}", e);
                false
            }
        }
    }

    pub(crate) async fn wait_ready(&self) -> Result<(), Box<dyn std::error::Error>> {
        for attempt in 1..=self.attempts {
            if self.ping().await {
                return Ok(());
            }
            debug!("Broker not ready (attempt {}/{})", attempt, self.attempts);
            if attempt < self.attempts {
                tokio::time::sleep(self.delay).await;
            }
        }
        Err(NOT_READY.into())
    }
}

//! Cloneable entry point to a running broker.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use codehint_protocols::error::BrokerError;
use codehint_protocols::message::{BrokerMessage, BrokerReply};
use codehint_protocols::provider::ProviderKind;

use super::{BrokerState, Envelope};
use crate::orchestrator::AssistanceService;

/// Sends messages to the broker actor and awaits their replies.
///
/// The actor stops once every handle has been dropped or shut down.
#[derive(Clone)]
pub struct BrokerHandle {
    tx: mpsc::Sender<Envelope>,
    state: Arc<AtomicU8>,
    service: Arc<AssistanceService>,
}

impl BrokerHandle {
    pub(super) fn new(
        tx: mpsc::Sender<Envelope>,
        state: Arc<AtomicU8>,
        service: Arc<AssistanceService>,
    ) -> Self {
        Self { tx, state, service }
    }

    pub fn state(&self) -> BrokerState {
        BrokerState::from(self.state.load(Ordering::SeqCst))
    }

    pub fn is_ready(&self) -> bool {
        self.state() == BrokerState::Ready
    }

    pub fn current_provider(&self) -> ProviderKind {
        self.service.current_provider()
    }

    pub fn configured_providers(&self) -> Vec<ProviderKind> {
        self.service.configured_providers()
    }

    /// Send one message and wait for its reply.
    pub async fn send(&self, message: BrokerMessage) -> BrokerReply {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self.tx.send((message, reply_tx)).await.is_err() {
            warn!("Broker channel closed");
            return BrokerReply::failure(&BrokerError::Unavailable);
        }
        reply_rx
            .await
            .unwrap_or_else(|_| BrokerReply::failure(&BrokerError::Unavailable))
    }

    /// Parse a raw envelope and send it.
    ///
    /// A payload that does not parse is reported as `NotInitialized` until
    /// the broker is ready, matching the gate applied to parsed messages.
    pub async fn dispatch_value(&self, value: Value) -> BrokerReply {
        match BrokerMessage::from_value(value) {
            Ok(message) => self.send(message).await,
            Err(e) if self.is_ready() => BrokerReply::failure(&e),
            Err(e) => {
                debug!("Unparsed message before initialization: {}", e);
                BrokerReply::failure(&BrokerError::NotInitialized)
            }
        }
    }

    /// Release this handle's end of the channel.
    pub fn shutdown(self) {
        debug!("Broker handle shut down");
        drop(self.tx);
    }
}

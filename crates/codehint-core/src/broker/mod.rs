//! The background coordinator.
//!
//! A [`Broker`] owns the provider selection and serves messages arriving on
//! one channel. [`Broker::spawn`] starts the actor task and the startup
//! sequence, and returns the [`BrokerHandle`] every context talks through.
//! `PING` is answered inline at any point; every other message is gated on
//! [`BrokerState::Ready`] and handled on its own task.

mod handle;
mod state;

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, Mutex};
use tracing::{debug, error, info, warn};

use codehint_protocols::assistance::{AssistanceRequest, AssistanceResponse};
use codehint_protocols::error::BrokerError;
use codehint_protocols::message::{BrokerMessage, BrokerReply};
use codehint_protocols::provider::ProviderKind;

use crate::orchestrator::AssistanceService;
use crate::preference::PreferenceStore;
use crate::presenter::{solution_url, Presenter};

pub use handle::BrokerHandle;
pub use state::BrokerState;

pub(crate) type Envelope = (BrokerMessage, oneshot::Sender<BrokerReply>);

const CHANNEL_CAPACITY: usize = 64;

/// The background coordinator.
pub struct Broker {
    service: Arc<AssistanceService>,
    preferences: Arc<dyn PreferenceStore>,
    presenter: Arc<dyn Presenter>,
    presentation_base: String,
    state: Arc<AtomicU8>,
    /// Held across save-then-select so the stored preference and the live
    /// selection change together.
    provider_change: Mutex<()>,
}

impl Broker {
    pub fn new(
        service: Arc<AssistanceService>,
        preferences: Arc<dyn PreferenceStore>,
        presenter: Arc<dyn Presenter>,
        presentation_base: impl Into<String>,
    ) -> Self {
        Self {
            service,
            preferences,
            presenter,
            presentation_base: presentation_base.into(),
            state: Arc::new(AtomicU8::new(BrokerState::Uninitialized as u8)),
            provider_change: Mutex::new(()),
        }
    }

    pub fn state(&self) -> BrokerState {
        BrokerState::from(self.state.load(Ordering::SeqCst))
    }

    fn set_state(&self, state: BrokerState) {
        self.state.store(state as u8, Ordering::SeqCst);
    }

    /// Start the actor and the startup sequence. Must be called inside a
    /// Tokio runtime.
    pub fn spawn(self) -> BrokerHandle {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let broker = Arc::new(self);
        let handle = BrokerHandle::new(tx, broker.state.clone(), broker.service.clone());

        let startup = broker.clone();
        tokio::spawn(async move { startup.initialize().await });
        tokio::spawn(broker.run(rx));

        handle
    }

    /// Load the saved preference and move to `Ready`, or to `Failed` when
    /// the store cannot be read.
    async fn initialize(&self) {
        self.set_state(BrokerState::Initializing);
        info!("Broker initializing");

        match self.preferences.load_provider().await {
            Ok(Some(saved)) => self.apply_saved_provider(&saved),
            Ok(None) => {
                info!(
                    "No saved provider, using {}",
                    self.service.current_provider()
                );
            }
            Err(e) => {
                error!("Failed to load saved provider: {}", e);
                self.set_state(BrokerState::Failed);
                return;
            }
        }

        self.set_state(BrokerState::Ready);
        info!("Broker ready (provider: {})", self.service.current_provider());
    }

    fn apply_saved_provider(&self, saved: &str) {
        let result = saved
            .parse::<ProviderKind>()
            .and_then(|kind| self.service.set_provider(kind));
        match result {
            Ok(()) => info!("Loaded saved provider: {}", saved),
            Err(e) => warn!(
                "Ignoring saved provider '{}' ({}), keeping {}",
                saved,
                e,
                self.service.current_provider()
            ),
        }
    }

    async fn run(self: Arc<Self>, mut rx: mpsc::Receiver<Envelope>) {
        debug!("Broker actor started");

        while let Some((message, reply_tx)) = rx.recv().await {
            debug!("Broker received {}", message.tag());

            if matches!(message, BrokerMessage::Ping) {
                let _ = reply_tx.send(BrokerReply::pong(self.state() == BrokerState::Ready));
                continue;
            }

            if self.state() != BrokerState::Ready {
                warn!("Received {} before initialization", message.tag());
                let _ = reply_tx.send(BrokerReply::failure(&BrokerError::NotInitialized));
                continue;
            }

            let broker = self.clone();
            tokio::spawn(async move {
                let reply = BrokerReply::from(broker.handle(message).await);
                if reply.is_failure() {
                    debug!("Broker replying with failure: {:?}", reply);
                }
                let _ = reply_tx.send(reply);
            });
        }

        debug!("Broker actor stopped");
    }

    async fn handle(&self, message: BrokerMessage) -> Result<BrokerReply, BrokerError> {
        match message {
            BrokerMessage::Ping => Ok(BrokerReply::pong(self.state() == BrokerState::Ready)),
            BrokerMessage::ProviderChanged { provider } => self.change_provider(&provider).await,
            BrokerMessage::AssistanceRequested(request) => self.assist(request).await,
            BrokerMessage::Unrecognized { tag } => Err(BrokerError::UnknownMessage(tag)),
        }
    }

    async fn change_provider(&self, provider: &str) -> Result<BrokerReply, BrokerError> {
        let kind: ProviderKind = provider.parse()?;
        self.service.check_provider(kind)?;

        let _guard = self.provider_change.lock().await;
        self.preferences
            .save_provider(kind.as_str())
            .await
            .map_err(|e| BrokerError::PreferenceStore(e.to_string()))?;
        self.service.set_provider(kind)?;
        Ok(BrokerReply::ack())
    }

    async fn assist(&self, request: AssistanceRequest) -> Result<BrokerReply, BrokerError> {
        info!(
            "Assistance requested: kind={:?}, language={}",
            request.response_kind, request.target_language
        );

        let problem = format!(
            "Please provide a solution in {}. {}",
            request.target_language, request.problem_text
        );
        let mut response = self
            .service
            .request_assistance(&problem, request.snippet(), request.response_kind)
            .await?;

        self.present(&response).await;

        response.target_language = request.target_language;
        Ok(BrokerReply::Assistance { data: response })
    }

    /// Failures here are logged and never fail the reply.
    async fn present(&self, response: &AssistanceResponse) {
        let url = match solution_url(&self.presentation_base, response) {
            Ok(url) => url,
            Err(e) => {
                warn!("Failed to build solution URL: {}", e);
                return;
            }
        };
        if let Err(e) = self.presenter.present(&url).await {
            warn!("Failed to present solution: {}", e);
        }
    }
}

#[cfg(test)]
#[path = "broker_tests.rs"]
mod tests;

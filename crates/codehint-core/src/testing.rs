//! Stub providers shared by the unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use codehint_protocols::error::ProviderError;
use codehint_protocols::provider::{AssistanceProvider, ProviderKind};

use crate::registry::ProviderFactory;

/// Provider that answers with canned text and records every prompt.
pub struct StubProvider {
    kind: ProviderKind,
    configured: bool,
    reply: Option<String>,
    delay: Duration,
    prompts: Mutex<Vec<String>>,
}

impl StubProvider {
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().len()
    }
}

#[async_trait]
impl AssistanceProvider for StubProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn get_assistance(&self, prompt: &str) -> Result<String, ProviderError> {
        self.prompts.lock().push(prompt.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => Err(ProviderError::ApiError {
                status: 500,
                message: format!("{} exploded", self.kind),
            }),
        }
    }
}

/// Factory building [`StubProvider`]s and counting constructions.
#[derive(Default)]
pub struct StubFactory {
    configured: HashSet<ProviderKind>,
    replies: HashMap<ProviderKind, String>,
    delays: HashMap<ProviderKind, Duration>,
    created: Mutex<HashMap<ProviderKind, Arc<StubProvider>>>,
    creations: AtomicUsize,
}

impl StubFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `kind` configured, answering every prompt with `reply`.
    pub fn configured(mut self, kind: ProviderKind, reply: &str) -> Self {
        self.configured.insert(kind);
        self.replies.insert(kind, reply.to_string());
        self
    }

    /// Mark `kind` configured but failing every call.
    pub fn failing(mut self, kind: ProviderKind) -> Self {
        self.configured.insert(kind);
        self.replies.remove(&kind);
        self
    }

    pub fn with_delay(mut self, kind: ProviderKind, delay: Duration) -> Self {
        self.delays.insert(kind, delay);
        self
    }

    pub fn creations(&self) -> usize {
        self.creations.load(Ordering::SeqCst)
    }

    /// The last instance built for `kind`.
    pub fn instance(&self, kind: ProviderKind) -> Option<Arc<StubProvider>> {
        self.created.lock().get(&kind).cloned()
    }
}

impl ProviderFactory for StubFactory {
    fn create(&self, kind: ProviderKind) -> Arc<dyn AssistanceProvider> {
        self.creations.fetch_add(1, Ordering::SeqCst);
        // Widen the window for racing first calls.
        std::thread::sleep(Duration::from_millis(5));
        let provider = Arc::new(StubProvider {
            kind,
            configured: self.configured.contains(&kind),
            reply: self.replies.get(&kind).cloned(),
            delay: self.delays.get(&kind).copied().unwrap_or_default(),
            prompts: Mutex::new(Vec::new()),
        });
        self.created.lock().insert(kind, provider.clone());
        provider
    }
}

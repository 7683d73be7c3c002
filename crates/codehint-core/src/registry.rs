//! Provider registry with lazy, memoized construction.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use codehint_protocols::provider::{AssistanceProvider, ProviderKind};

/// Builds a provider instance for a kind.
///
/// Called at most once per kind by [`ProviderRegistry`]. Implementations must
/// not call back into the registry.
pub trait ProviderFactory: Send + Sync {
    fn create(&self, kind: ProviderKind) -> Arc<dyn AssistanceProvider>;
}

/// Registry holding one provider instance per kind for its whole lifetime.
pub struct ProviderRegistry {
    factory: Arc<dyn ProviderFactory>,
    providers: DashMap<ProviderKind, Arc<dyn AssistanceProvider>>,
}

impl ProviderRegistry {
    /// Create a new provider registry.
    pub fn new(factory: Arc<dyn ProviderFactory>) -> Self {
        Self {
            factory,
            providers: DashMap::new(),
        }
    }

    /// Get the instance for `kind`, constructing it on first use.
    ///
    /// The entry lock is held while the factory runs, so concurrent first
    /// calls for the same kind observe a single instance.
    pub fn get_provider(&self, kind: ProviderKind) -> Arc<dyn AssistanceProvider> {
        self.providers
            .entry(kind)
            .or_insert_with(|| {
                debug!("Constructing provider: {}", kind);
                self.factory.create(kind)
            })
            .clone()
    }

    /// Kinds whose provider reports a credential, in enumeration order.
    pub fn list_configured_providers(&self) -> Vec<ProviderKind> {
        ProviderKind::ALL
            .into_iter()
            .filter(|kind| self.get_provider(*kind).is_configured())
            .collect()
    }

    /// Number of instances constructed so far.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

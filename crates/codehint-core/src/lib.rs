//! # CodeHint Core
//!
//! Runtime pieces of the CodeHint broker.
//!
//! ## Components
//!
//! - [`ProviderRegistry`] - Lazily built, memoized provider instances
//! - [`AssistanceService`] - Prompt construction, provider selection, reply normalization
//! - [`Broker`] / [`BrokerHandle`] - The long-lived coordinator and its message channel
//! - [`PreferenceStore`] - The single persisted provider preference
//! - [`Presenter`] - Where finished answers are shown

pub mod broker;
pub mod orchestrator;
pub mod preference;
pub mod presenter;
pub mod registry;

#[cfg(test)]
pub(crate) mod testing;

pub use broker::{Broker, BrokerHandle, BrokerState};
pub use orchestrator::AssistanceService;
pub use preference::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceError, PreferenceStore,
    SELECTED_PROVIDER_KEY,
};
pub use presenter::{solution_url, CommandPresenter, LogPresenter, PresentError, Presenter};
pub use registry::{ProviderFactory, ProviderRegistry};

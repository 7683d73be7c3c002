//! Error types for the CodeHint protocol layer.

mod assist;
mod broker;
mod provider;

pub use assist::*;
pub use broker::*;
pub use provider::*;

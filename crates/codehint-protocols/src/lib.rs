//! # CodeHint Protocols
//!
//! Core protocol definitions for the CodeHint broker.
//! Contains only interfaces and wire types - no implementations.
//!
//! ## Core Types
//!
//! - [`AssistanceProvider`] - Trait implemented by every AI backend
//! - [`ProviderKind`] - The fixed set of supported backends
//! - [`AssistanceRequest`] / [`AssistanceResponse`] - Orchestrator data model
//! - [`BrokerMessage`] / [`BrokerReply`] - Cross-context message envelope

pub mod assistance;
pub mod error;
pub mod message;
pub mod provider;

pub use assistance::{AssistanceRequest, AssistanceResponse, ResponseKind};
pub use error::{AssistError, BrokerError, ErrorCode, ProviderError};
pub use message::{BrokerMessage, BrokerReply};
pub use provider::{AssistanceProvider, ProviderKind, TUTOR_SYSTEM_PROMPT};

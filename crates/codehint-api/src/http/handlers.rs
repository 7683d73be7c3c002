//! Broker API handlers.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use codehint_core::BrokerState;
use codehint_protocols::message::BrokerReply;
use codehint_protocols::provider::ProviderKind;

use crate::state::AppState;

/// Forward one envelope to the broker.
///
/// Always answers 200; broker failures travel in the body.
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    Json(envelope): Json<Value>,
) -> Json<BrokerReply> {
    let tag = envelope.get("type").cloned().unwrap_or_default();
    debug!("POST /message: {}", tag);
    Json(state.broker.dispatch_value(envelope).await)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub state: BrokerState,
    pub uptime_seconds: u64,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        state: state.broker.state(),
        uptime_seconds: state.uptime().as_secs(),
    })
}

#[derive(Debug, Serialize)]
pub struct ProvidersResponse {
    pub current: ProviderKind,
    pub configured: Vec<ProviderKind>,
}

pub async fn providers(State(state): State<Arc<AppState>>) -> Json<ProvidersResponse> {
    Json(ProvidersResponse {
        current: state.broker.current_provider(),
        configured: state.broker.configured_providers(),
    })
}

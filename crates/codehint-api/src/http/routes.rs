//! HTTP route definitions.

use std::sync::Arc;

use axum::{
    http::{header, request::Parts, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers::{health, post_message, providers};
use crate::state::AppState;

/// Create the router.
///
/// ```text
/// POST /message   - Broker message envelope
/// GET  /health    - Liveness and broker state
/// GET  /providers - Current selection and configured providers
/// ```
///
/// Cross-origin access is limited to browser extension pages.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/message", post(post_message))
        .route("/health", get(health))
        .route("/providers", get(providers))
        .with_state(state)
        .layer(extension_cors())
        .layer(TraceLayer::new_for_http())
}

/// Origin schemes of extension pages.
const EXTENSION_SCHEMES: [&str; 2] = ["chrome-extension://", "moz-extension://"];

fn is_extension_origin(origin: &HeaderValue) -> bool {
    origin
        .to_str()
        .map(|origin| EXTENSION_SCHEMES.iter().any(|scheme| origin.starts_with(scheme)))
        .unwrap_or(false)
}

fn extension_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            |origin: &HeaderValue, _parts: &Parts| is_extension_origin(origin),
        ))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;

//! HTTP interface module.
//!
//! - `POST /message` - Broker message envelope in, broker reply out
//! - `GET /health` - Liveness plus broker state
//! - `GET /providers` - Current and configured providers

pub mod handlers;
pub mod routes;

//! # CodeHint API
//!
//! Loopback HTTP surface for the broker. Browser-side contexts post message
//! envelopes to `/message` and get the broker's reply back as the body.
//!
//! ```text
//!   page script / popup ──POST /message──▶ BrokerHandle ──mpsc──▶ Broker actor
//!                       ◀── 200 {reply} ──              ◀─oneshot─
//! ```

pub mod http;
pub mod server;
pub mod state;

pub use http::routes::create_router;
pub use server::{InterfaceConfig, InterfaceServer};
pub use state::AppState;

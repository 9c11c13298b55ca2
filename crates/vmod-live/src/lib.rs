//! # vmod-live
//!
//! Live status monitor: a best-effort WebSocket to the engine that tells
//! the operator whether the engine is reachable right now.

pub mod monitor;
pub mod state;

pub use monitor::{live_url, LiveMonitor, DEFAULT_RETRY_DELAY, LIVE_PATH};
pub use state::LiveState;

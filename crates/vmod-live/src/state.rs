//! Live connection state

use serde::Serialize;
use std::fmt;

/// Liveness of the engine's WebSocket, as last observed
///
/// Cycles `Disconnected -> Connecting -> Connected -> Disconnected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LiveState {
    /// No socket; either idle, waiting to retry, or no API key configured
    #[default]
    Disconnected,
    /// Handshake in progress
    Connecting,
    /// Socket open
    Connected,
}

impl LiveState {
    #[inline]
    pub fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Badge text
    pub fn label(self) -> &'static str {
        match self {
            Self::Connected => "Live",
            Self::Connecting => "Connecting",
            Self::Disconnected => "Offline",
        }
    }
}

impl fmt::Display for LiveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

//! Background WebSocket liveness monitor
//!
//! One task owns the socket. State changes are published on a watch
//! channel; cancelling the token (or dropping the monitor) stops the task,
//! closing the socket and abandoning any pending retry.

use futures_util::StreamExt;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use vmod_common::SharedConnection;

use crate::state::LiveState;

/// Engine path of the liveness socket
pub const LIVE_PATH: &str = "/api/ws/live";
/// Delay between reconnection attempts
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);
/// Upper bound on one handshake
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

type LiveSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket URL for a base URL: `http` becomes `ws`, `https` becomes `wss`
pub fn live_url(base_url: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let base = match base.strip_prefix("http") {
        Some(rest) => format!("ws{rest}"),
        None => base.to_string(),
    };
    format!("{base}{LIVE_PATH}")
}

/// Handle to the running monitor task
#[derive(Debug)]
pub struct LiveMonitor {
    state: watch::Receiver<LiveState>,
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl LiveMonitor {
    /// Start monitoring. Must be called inside a tokio runtime.
    pub fn spawn(connection: SharedConnection, retry_delay: Duration) -> Self {
        Self::spawn_with_token(connection, retry_delay, CancellationToken::new())
    }

    /// Start monitoring under a parent token; cancelling the parent tears
    /// the monitor down
    pub fn spawn_with_token(
        connection: SharedConnection,
        retry_delay: Duration,
        parent: CancellationToken,
    ) -> Self {
        let token = parent.child_token();
        let (tx, rx) = watch::channel(LiveState::Disconnected);
        let worker = Worker {
            connection,
            retry_delay,
            token: token.clone(),
            state: tx,
        };
        let task = tokio::spawn(worker.run());
        Self {
            state: rx,
            token,
            task: Some(task),
        }
    }

    /// Current state
    pub fn state(&self) -> LiveState {
        *self.state.borrow()
    }

    /// Receiver that wakes on every state change
    pub fn subscribe(&self) -> watch::Receiver<LiveState> {
        self.state.clone()
    }

    /// Stop the task and wait for it to close its socket
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "Live monitor task ended abnormally");
            }
        }
    }
}

impl Drop for LiveMonitor {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

struct Worker {
    connection: SharedConnection,
    retry_delay: Duration,
    token: CancellationToken,
    state: watch::Sender<LiveState>,
}

impl Worker {
    async fn run(self) {
        debug!("Live monitor started");
        loop {
            if self.connection.api_key().is_some() {
                let url = live_url(&self.connection.base_url());
                if let Some(socket) = self.connect(&url).await {
                    self.watch_socket(socket).await;
                }
            } else {
                // No attempt without a key; the key is re-read after the delay
                self.set_state(LiveState::Disconnected);
                debug!("No API key configured, live monitor idle");
            }

            if self.token.is_cancelled() || !self.wait_retry().await {
                break;
            }
        }
        self.set_state(LiveState::Disconnected);
        debug!("Live monitor stopped");
    }

    async fn connect(&self, url: &str) -> Option<LiveSocket> {
        self.set_state(LiveState::Connecting);
        debug!(%url, "Opening live socket");

        let attempt = tokio::time::timeout(CONNECT_TIMEOUT, connect_async(url));
        let result = tokio::select! {
            () = self.token.cancelled() => return None,
            result = attempt => result,
        };

        match result {
            Ok(Ok((socket, _response))) => {
                self.set_state(LiveState::Connected);
                Some(socket)
            }
            Ok(Err(e)) => {
                warn!(%url, error = %e, "Live socket connection failed");
                self.set_state(LiveState::Disconnected);
                None
            }
            Err(_) => {
                warn!(%url, "Live socket handshake timed out");
                self.set_state(LiveState::Disconnected);
                None
            }
        }
    }

    /// Hold the socket until it closes, errors or the monitor is cancelled
    async fn watch_socket(&self, mut socket: LiveSocket) {
        loop {
            let frame = tokio::select! {
                () = self.token.cancelled() => {
                    let _ = socket.close(None).await;
                    break;
                }
                frame = socket.next() => frame,
            };

            match frame {
                Some(Ok(Message::Close(frame))) => {
                    debug!(?frame, "Live socket closed by engine");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!(error = %e, "Live socket error");
                    // Close explicitly rather than leave it half-open
                    let _ = socket.close(None).await;
                    break;
                }
                None => break,
            }
        }
        self.set_state(LiveState::Disconnected);
    }

    /// Sleep out the retry delay; `false` if cancelled meanwhile
    async fn wait_retry(&self) -> bool {
        tokio::select! {
            () = self.token.cancelled() => false,
            () = tokio::time::sleep(self.retry_delay) => true,
        }
    }

    fn set_state(&self, next: LiveState) {
        let changed = self.state.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
        if changed {
            info!(state = %next, "Live state changed");
        }
    }
}

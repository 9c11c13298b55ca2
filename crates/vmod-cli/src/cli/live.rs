//! Live status command handler.

use serde_json::json;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use vmod_common::SharedConnection;
use vmod_live::{LiveMonitor, LiveState};

use super::output::Output;

/// Print every liveness change until `token` fires, then tear the monitor down.
pub async fn handle_live(
    connection: SharedConnection,
    retry_delay: Duration,
    token: CancellationToken,
    out: Output,
) -> anyhow::Result<()> {
    if connection.api_key().is_none() {
        eprintln!("warning: no API key configured; run `vmod config set --api-key <KEY>`");
    }

    let monitor = LiveMonitor::spawn_with_token(connection, retry_delay, token.clone());
    let mut states = monitor.subscribe();
    let initial = *states.borrow_and_update();
    print_state(out, initial)?;

    loop {
        tokio::select! {
            () = token.cancelled() => break,
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = *states.borrow_and_update();
                print_state(out, state)?;
            }
        }
    }

    monitor.shutdown().await;
    Ok(())
}

fn print_state(out: Output, state: LiveState) -> anyhow::Result<()> {
    out.event(&json!({ "state": state }), &format!("[{state}]"))
}

//! Live Monitor Integration Tests
//!
//! Runs the liveness monitor against the fake engine's WebSocket.
//!
//! Run with: cargo test -p integration-tests --test live_tests

use integration_tests::{eventually, wait_for_state, FakeEngine, TEST_API_KEY};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use vmod_common::{ConnectionConfig, SharedConnection};
use vmod_live::{LiveMonitor, LiveState};

const RETRY: Duration = Duration::from_millis(50);
const PATIENCE: Duration = Duration::from_secs(5);

#[tokio::test]
async fn test_connects_with_key() {
    let engine = FakeEngine::start().await.unwrap();
    let monitor = LiveMonitor::spawn(engine.connection(), RETRY);
    let mut states = monitor.subscribe();

    assert!(wait_for_state(&mut states, LiveState::Connected, PATIENCE).await);
    assert!(eventually(PATIENCE, || engine.live_connections() == 1).await);

    let handshake = engine
        .requests()
        .into_iter()
        .find(|r| r.path == "/api/ws/live")
        .unwrap();
    assert_eq!(handshake.method, "GET");

    monitor.shutdown().await;
    assert!(eventually(PATIENCE, || engine.live_connections() == 0).await);
}

#[tokio::test]
async fn test_no_key_never_connects() {
    let engine = FakeEngine::start().await.unwrap();
    let monitor = LiveMonitor::spawn(engine.connection_with_key(None), RETRY);

    tokio::time::sleep(RETRY * 5).await;
    assert_eq!(monitor.state(), LiveState::Disconnected);
    assert_eq!(engine.live_accepted(), 0);
    assert_eq!(engine.request_count(), 0);

    monitor.shutdown().await;
}

#[tokio::test]
async fn test_key_set_later_connects() {
    let engine = FakeEngine::start().await.unwrap();
    let connection = engine.connection_with_key(None);
    let monitor = LiveMonitor::spawn(connection.clone(), RETRY);
    let mut states = monitor.subscribe();

    tokio::time::sleep(RETRY * 2).await;
    connection.set_api_key(Some(TEST_API_KEY.to_string()));

    assert!(wait_for_state(&mut states, LiveState::Connected, PATIENCE).await);
    monitor.shutdown().await;
}

#[tokio::test]
async fn test_reconnects_after_engine_closes() {
    let engine = FakeEngine::start().await.unwrap();
    let monitor = LiveMonitor::spawn(engine.connection(), RETRY);
    let mut states = monitor.subscribe();

    assert!(wait_for_state(&mut states, LiveState::Connected, PATIENCE).await);
    assert!(eventually(PATIENCE, || engine.live_connections() == 1).await);

    engine.drop_live_sockets();

    assert!(eventually(PATIENCE, || engine.live_accepted() >= 2).await);
    assert!(wait_for_state(&mut states, LiveState::Connected, PATIENCE).await);

    monitor.shutdown().await;
}

#[tokio::test]
async fn test_unreachable_engine_stays_offline() {
    let connection = SharedConnection::new(ConnectionConfig::new(
        "http://127.0.0.1:9",
        Some(TEST_API_KEY.to_string()),
    ));
    let monitor = LiveMonitor::spawn(connection, RETRY);

    tokio::time::sleep(RETRY * 5).await;
    assert_ne!(monitor.state(), LiveState::Connected);

    monitor.shutdown().await;
}

#[tokio::test]
async fn test_parent_token_tears_down() {
    let engine = FakeEngine::start().await.unwrap();
    let parent = CancellationToken::new();
    let monitor = LiveMonitor::spawn_with_token(engine.connection(), RETRY, parent.clone());
    let mut states = monitor.subscribe();

    assert!(wait_for_state(&mut states, LiveState::Connected, PATIENCE).await);

    parent.cancel();
    assert!(wait_for_state(&mut states, LiveState::Disconnected, PATIENCE).await);
    assert!(eventually(PATIENCE, || engine.live_connections() == 0).await);

    drop(monitor);
}

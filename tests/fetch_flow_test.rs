//! Integration tests for the full fetch lifecycle.
//!
//! These tests drive the [`App`] the way the event loop does: inject or
//! await messages, apply them in arrival order, and assert on the machine
//! and gate state plus the requests that actually reached the backend.

use std::sync::Arc;
use std::time::Duration;

use roster::app::{App, AppMessage};
use roster::connectivity::ConnectivityState;
use roster::directory::DirectoryClient;
use roster::state::LoadingState;
use tokio::sync::mpsc::UnboundedReceiver;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn users_body() -> serde_json::Value {
    serde_json::json!([
        {"id": 1, "name": "ana", "email": "a@x.com"},
        {"id": 2, "name": "Bo", "email": "b@x.com"}
    ])
}

fn app_for(server: &MockServer) -> (App, UnboundedReceiver<AppMessage>) {
    let mut app = App::new(Arc::new(DirectoryClient::with_base_url(server.uri())));
    let rx = app.message_rx.take().expect("fresh app has a receiver");
    (app, rx)
}

async fn recv_and_apply(app: &mut App, rx: &mut UnboundedReceiver<AppMessage>) {
    let message = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("message within deadline")
        .expect("channel open");
    app.handle_message(message);
}

// ============================================================================
// Mount -> Loaded
// ============================================================================

#[tokio::test]
async fn test_mount_fetches_and_stores_collection() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_body()))
        .mount(&mock_server)
        .await;

    let (mut app, mut rx) = app_for(&mock_server);
    app.handle_message(AppMessage::HealthResolved(true));
    assert!(app.machine.is_loading());

    recv_and_apply(&mut app, &mut rx).await;
    match app.machine.state() {
        LoadingState::Loaded(users) => {
            assert_eq!(users.len(), 2);
            assert_eq!(users[0].name, "ana");
            assert_eq!(users[1].name, "Bo");
        }
        other => panic!("expected Loaded, got {:?}", other),
    }
    assert!(app.updated_at.is_some());
}

// ============================================================================
// Failure -> refresh -> recovery
// ============================================================================

#[tokio::test]
async fn test_failed_fetch_recovers_on_refresh() {
    let mock_server = MockServer::start().await;
    // First request fails, every later one succeeds.
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_body()))
        .mount(&mock_server)
        .await;

    let (mut app, mut rx) = app_for(&mock_server);
    app.handle_message(AppMessage::HealthResolved(true));

    recv_and_apply(&mut app, &mut rx).await;
    match app.machine.state() {
        LoadingState::Failed(message) => assert!(!message.is_empty()),
        other => panic!("expected Failed, got {:?}", other),
    }

    app.request_refresh();
    assert!(app.machine.is_loading());

    recv_and_apply(&mut app, &mut rx).await;
    assert!(matches!(app.machine.state(), LoadingState::Loaded(users) if users.len() == 2));
}

// ============================================================================
// Refresh re-entrancy guard
// ============================================================================

#[tokio::test]
async fn test_refresh_storm_while_loading_dispatches_once() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_body()))
        .mount(&mock_server)
        .await;

    let (mut app, mut rx) = app_for(&mock_server);
    app.handle_message(AppMessage::HealthResolved(true));
    for _ in 0..5 {
        app.request_refresh();
        assert!(app.machine.is_loading());
    }

    recv_and_apply(&mut app, &mut rx).await;
    assert!(matches!(app.machine.state(), LoadingState::Loaded(_)));

    // Exactly one fetch reached the wire, and nothing else is in flight.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(rx.try_recv().is_err());
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
}

// ============================================================================
// Connectivity gate
// ============================================================================

#[tokio::test]
async fn test_healthy_probe_mounts_data_subsystem() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_body()))
        .mount(&mock_server)
        .await;

    let (mut app, mut rx) = app_for(&mock_server);
    app.start_probe();

    recv_and_apply(&mut app, &mut rx).await;
    assert_eq!(app.gate.state(), ConnectivityState::Connected);
    assert!(app.machine.is_loading());

    recv_and_apply(&mut app, &mut rx).await;
    assert!(matches!(app.machine.state(), LoadingState::Loaded(_)));

    // Probe plus one fetch, both against the shared endpoint.
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_failed_probe_never_invokes_list_fetch() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let (mut app, mut rx) = app_for(&mock_server);
    app.start_probe();

    recv_and_apply(&mut app, &mut rx).await;
    assert_eq!(app.gate.state(), ConnectivityState::Disconnected);
    assert_eq!(*app.machine.state(), LoadingState::Idle);

    // The data subsystem was never mounted: the probe is the only request.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(rx.try_recv().is_err());
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_session_restart_reprobes_with_fresh_gate() {
    let mock_server = MockServer::start().await;
    // Backend down for the first session, up for the second.
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_body()))
        .mount(&mock_server)
        .await;

    let (mut app, mut rx) = app_for(&mock_server);
    app.start_probe();
    recv_and_apply(&mut app, &mut rx).await;
    assert_eq!(app.gate.state(), ConnectivityState::Disconnected);

    // Restart: a new session owns a new gate and a new machine.
    let (mut app, mut rx) = app_for(&mock_server);
    app.start_probe();
    recv_and_apply(&mut app, &mut rx).await;
    assert_eq!(app.gate.state(), ConnectivityState::Connected);

    recv_and_apply(&mut app, &mut rx).await;
    assert!(matches!(app.machine.state(), LoadingState::Loaded(users) if users.len() == 2));
}

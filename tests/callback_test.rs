use std::{collections::HashMap, sync::Arc};

use spweekly::api::complete_login;
use spweekly::config::Config;
use spweekly::spotify::auth::AuthError;
use spweekly::types::PendingAuth;
use tokio::sync::{Mutex, oneshot};

// Helper function to create a test config
fn create_test_config() -> Config {
    Config {
        client_id: "test_client_id".to_string(),
        client_secret: "EMPTY_SECRET".to_string(),
        redirect_uri: "http://localhost:8080/callback".to_string(),
        server_address: "localhost:8080".to_string(),
        archive_name: None,
    }
}

// Helper function to create the shared login state the callback works on
fn create_pending_auth(state: &str) -> (Arc<Mutex<PendingAuth>>, oneshot::Receiver<()>) {
    let (done_tx, done_rx) = oneshot::channel();
    let pending = Arc::new(Mutex::new(PendingAuth {
        code_verifier: "test_verifier".to_string(),
        state: state.to_string(),
        token: None,
        done: Some(done_tx),
    }));
    (pending, done_rx)
}

#[tokio::test]
async fn test_rejects_mismatched_state() {
    let config = create_test_config();
    let (pending, mut done_rx) = create_pending_auth("expected_state");

    let mut params = HashMap::new();
    params.insert("state".to_string(), "forged_state".to_string());
    params.insert("code".to_string(), "some_code".to_string());

    let err = complete_login(&config, &params, &pending)
        .await
        .expect_err("should fail");
    assert!(matches!(err, AuthError::StateMismatch));

    // Nothing should have happened: no token, no completion signal
    let guard = pending.lock().await;
    assert!(guard.token.is_none());
    assert!(guard.done.is_some());
    drop(guard);
    assert!(done_rx.try_recv().is_err());
}

#[tokio::test]
async fn test_rejects_missing_state() {
    let config = create_test_config();
    let (pending, _done_rx) = create_pending_auth("expected_state");

    // A callback with no state parameter at all
    let mut params = HashMap::new();
    params.insert("code".to_string(), "some_code".to_string());

    let err = complete_login(&config, &params, &pending)
        .await
        .expect_err("should fail");
    assert!(matches!(err, AuthError::StateMismatch));
}

#[tokio::test]
async fn test_rejects_missing_code() {
    let config = create_test_config();
    let (pending, mut done_rx) = create_pending_auth("expected_state");

    // State matches, but the authorization code is absent
    let mut params = HashMap::new();
    params.insert("state".to_string(), "expected_state".to_string());

    let err = complete_login(&config, &params, &pending)
        .await
        .expect_err("should fail");
    match err {
        AuthError::ExchangeFailed(msg) => assert!(msg.contains("missing authorization code")),
        other => panic!("expected ExchangeFailed, got {other:?}"),
    }

    // The completion signal stays armed for a later, valid callback
    let guard = pending.lock().await;
    assert!(guard.token.is_none());
    assert!(guard.done.is_some());
    drop(guard);
    assert!(done_rx.try_recv().is_err());
}

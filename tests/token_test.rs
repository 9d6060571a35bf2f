use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Duration, Utc};
use spweekly::management::{TokenError, TokenManager};
use spweekly::spotify::auth::token_from_response;
use spweekly::types::{Token, TokenResponse};

// Helper function to create a test token
fn create_test_token(access_token: &str, minutes_until_expiry: i64) -> Token {
    Token {
        access_token: access_token.to_string(),
        token_type: "Bearer".to_string(),
        refresh_token: "test_refresh_token".to_string(),
        expiry: Utc::now() + Duration::minutes(minutes_until_expiry),
    }
}

// Helper function to create a unique scratch directory for token files
fn create_test_dir(tag: &str) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("spweekly-token-test-{tag}-{unique}"));
    std::fs::create_dir_all(&dir).expect("create dir");
    dir
}

#[tokio::test]
async fn test_persist_and_load_round_trip() {
    let dir = create_test_dir("round-trip");
    let path = dir.join("token.json");

    let token = create_test_token("access_123", 60);
    let manager = TokenManager::with_path(token.clone(), path.clone());
    manager.persist().await.expect("persist");

    // The file should be pretty-printed JSON
    let contents = std::fs::read_to_string(&path).expect("read");
    assert!(contents.contains("\n  \"access_token\""));

    // Loading it back should produce the same token
    let loaded = TokenManager::load_from(path).await.expect("load");
    assert_eq!(loaded.current_token().access_token, token.access_token);
    assert_eq!(loaded.current_token().token_type, token.token_type);
    assert_eq!(loaded.current_token().refresh_token, token.refresh_token);
    assert_eq!(loaded.current_token().expiry, token.expiry);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_persist_creates_parent_directories() {
    let dir = create_test_dir("parents");
    let path = dir.join("nested/deeper/token.json");

    let manager = TokenManager::with_path(create_test_token("access_123", 60), path.clone());
    manager.persist().await.expect("persist");

    assert!(path.is_file());

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_load_missing_token() {
    let dir = create_test_dir("missing");
    let path = dir.join("token.json");

    // A missing file should map to NotFound, carrying the path
    let err = TokenManager::load_from(path.clone())
        .await
        .expect_err("should fail");
    match err {
        TokenError::NotFound(p) => assert_eq!(p, path),
        other => panic!("expected NotFound, got {other:?}"),
    }

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_load_rejects_unknown_fields() {
    let dir = create_test_dir("unknown-fields");
    let path = dir.join("token.json");
    std::fs::write(
        &path,
        r#"{
  "access_token": "access_123",
  "token_type": "Bearer",
  "refresh_token": "refresh_123",
  "expiry": "2030-01-01T00:00:00Z",
  "surprise": true
}"#,
    )
    .expect("write");

    // A field outside the schema should fail the load, not be ignored
    let err = TokenManager::load_from(path).await.expect_err("should fail");
    assert!(matches!(err, TokenError::Corrupt(_)));

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_load_rejects_malformed_json() {
    let dir = create_test_dir("malformed");
    let path = dir.join("token.json");
    std::fs::write(&path, "not json at all").expect("write");

    let err = TokenManager::load_from(path).await.expect_err("should fail");
    assert!(matches!(err, TokenError::Corrupt(_)));

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_replace_persists_only_on_change() {
    let dir = create_test_dir("replace");
    let path = dir.join("token.json");

    let token = create_test_token("access_123", 60);
    let mut manager = TokenManager::with_path(token.clone(), path.clone());

    // Same access token: nothing should be written
    let mut unchanged = create_test_token("access_123", 120);
    unchanged.refresh_token = "rotated_refresh".to_string();
    manager.replace(unchanged).await.expect("replace");
    assert!(!path.exists());

    // New access token: the replacement should be persisted
    let renewed = create_test_token("access_456", 120);
    manager.replace(renewed).await.expect("replace");
    assert!(path.is_file());

    let loaded = TokenManager::load_from(path).await.expect("load");
    assert_eq!(loaded.current_token().access_token, "access_456");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_is_expired() {
    // Plenty of lifetime left
    let manager = TokenManager::new(create_test_token("access_123", 60));
    assert!(!manager.is_expired());

    // Inside the four-minute refresh margin counts as expired
    let manager = TokenManager::new(create_test_token("access_123", 2));
    assert!(manager.is_expired());

    // Already past expiry
    let manager = TokenManager::new(create_test_token("access_123", -10));
    assert!(manager.is_expired());
}

#[test]
fn test_token_from_response_carries_refresh_over() {
    let response = TokenResponse {
        access_token: "access_123".to_string(),
        token_type: "Bearer".to_string(),
        expires_in: 3600,
        refresh_token: None,
        scope: None,
    };

    // A response without a refresh token keeps the previous one
    let token = token_from_response(response.clone(), Some("previous_refresh"));
    assert_eq!(token.refresh_token, "previous_refresh");

    // A rotated refresh token wins over the previous one
    let mut rotated = response.clone();
    rotated.refresh_token = Some("rotated_refresh".to_string());
    let token = token_from_response(rotated, Some("previous_refresh"));
    assert_eq!(token.refresh_token, "rotated_refresh");

    // Nothing at all leaves the field empty
    let token = token_from_response(response, None);
    assert_eq!(token.refresh_token, "");
}

#[test]
fn test_token_from_response_expiry() {
    let response = TokenResponse {
        access_token: "access_123".to_string(),
        token_type: "Bearer".to_string(),
        expires_in: 3600,
        refresh_token: None,
        scope: None,
    };

    let before = Utc::now();
    let token = token_from_response(response, None);
    let after = Utc::now();

    // Expiry should land one hour out, give or take the call itself
    assert!(token.expiry >= before + Duration::seconds(3600));
    assert!(token.expiry <= after + Duration::seconds(3600));
}

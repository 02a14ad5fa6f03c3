mod common;

use std::sync::atomic::Ordering;

use common::{FakeSpotify, as_api};
use spotremote::{Error, management::TokenManager};

#[test]
fn test_empty_refresh_token_is_configuration_error() {
    let fake = FakeSpotify::default().arc();

    let err = TokenManager::new(as_api(&fake), "").err().unwrap();
    assert!(matches!(err, Error::Configuration(_)));

    let err = TokenManager::new(as_api(&fake), "  ").err().unwrap();
    assert!(matches!(err, Error::Configuration(_)));

    // Constructing never touches the network
    assert_eq!(fake.network_calls(), 0);
}

#[tokio::test]
async fn test_obtain_access_token_round_trips_every_call() {
    let fake = FakeSpotify::default().arc();
    let tokens = TokenManager::new(as_api(&fake), "stored-refresh").unwrap();

    let first = tokens.obtain_access_token().await.unwrap();
    assert_eq!(fake.refresh_calls.load(Ordering::SeqCst), 1);

    let second = tokens.obtain_access_token().await.unwrap();
    assert_eq!(fake.refresh_calls.load(Ordering::SeqCst), 2);

    // No caching: each call yields a freshly derived token
    assert_eq!(first.as_str(), "access-1");
    assert_eq!(second.as_str(), "access-2");

    // Always exchanges the configured refresh token
    assert_eq!(
        *fake.refresh_tokens_seen.lock().unwrap(),
        vec!["stored-refresh".to_string(), "stored-refresh".to_string()]
    );
}

#[tokio::test]
async fn test_rotated_refresh_token_is_not_adopted() {
    let fake = FakeSpotify {
        rotate_refresh_token: true,
        ..Default::default()
    }
    .arc();
    let tokens = TokenManager::new(as_api(&fake), "stored-refresh").unwrap();

    tokens.obtain_access_token().await.unwrap();
    tokens.obtain_access_token().await.unwrap();

    assert!(
        fake.refresh_tokens_seen
            .lock()
            .unwrap()
            .iter()
            .all(|t| t == "stored-refresh")
    );
}

#[tokio::test]
async fn test_failed_exchange_is_authentication_failure() {
    let fake = FakeSpotify {
        fail_refresh: true,
        ..Default::default()
    }
    .arc();
    let tokens = TokenManager::new(as_api(&fake), "revoked").unwrap();

    let err = tokens.obtain_access_token().await.unwrap_err();
    assert!(matches!(err, Error::Authentication(_)));

    // Single attempt, no retry
    assert_eq!(fake.refresh_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_access_token_debug_hides_secret() {
    let token = spotremote::types::AccessToken::new("very-secret");
    assert_eq!(format!("{:?}", token), "AccessToken(***)");
}

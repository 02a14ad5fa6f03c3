mod common;

use std::sync::{Arc, atomic::Ordering};

use common::{FakeSpotify, as_api, track};
use spotremote::{
    Error,
    management::{PlaybackManager, TokenManager},
    spotify::NO_ACTIVE_DEVICE,
    types::TopTrack,
};

fn manager(fake: &Arc<FakeSpotify>) -> PlaybackManager {
    let tokens = TokenManager::new(as_api(fake), "stored-refresh").unwrap();
    PlaybackManager::new(as_api(fake), tokens)
}

#[tokio::test]
async fn test_snapshot_projects_top_tracks() {
    let fake = FakeSpotify {
        now_playing: Some(track("Song 2", &["Blur"], "spotify:track:now")),
        top: vec![
            track("Under Pressure", &["Queen", "David Bowie"], "spotify:track:1"),
            track("Heroes", &["David Bowie"], "spotify:track:2"),
        ],
        ..Default::default()
    }
    .arc();

    let snapshot = manager(&fake).current_playback_snapshot().await.unwrap();

    assert_eq!(snapshot.now_playing.unwrap().name, "Song 2");
    assert_eq!(
        snapshot.top_tracks,
        vec![
            TopTrack {
                name: "Under Pressure".to_string(),
                artist: "Queen, David Bowie".to_string(),
                uri: "spotify:track:1".to_string(),
            },
            TopTrack {
                name: "Heroes".to_string(),
                artist: "David Bowie".to_string(),
                uri: "spotify:track:2".to_string(),
            },
        ]
    );

    // One token, shared by both concurrent calls, top 10 requested
    assert_eq!(fake.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        *fake.tokens_used.lock().unwrap(),
        vec!["access-1".to_string(), "access-1".to_string()]
    );
    assert_eq!(*fake.top_limits.lock().unwrap(), vec![10]);
}

#[tokio::test]
async fn test_snapshot_with_nothing_playing() {
    let fake = FakeSpotify {
        top: vec![track("Heroes", &["David Bowie"], "spotify:track:2")],
        ..Default::default()
    }
    .arc();

    let snapshot = manager(&fake).current_playback_snapshot().await.unwrap();
    assert!(snapshot.now_playing.is_none());
    assert_eq!(snapshot.top_tracks.len(), 1);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert!(json["nowPlaying"].is_null());
    assert_eq!(json["topTracks"][0]["artist"], "David Bowie");
}

#[tokio::test]
async fn test_snapshot_fails_as_a_whole() {
    let fake = FakeSpotify {
        now_playing: Some(track("Song 2", &["Blur"], "spotify:track:now")),
        fail_top_tracks: true,
        ..Default::default()
    }
    .arc();

    let err = manager(&fake).current_playback_snapshot().await.unwrap_err();
    assert!(matches!(err, Error::Upstream(_)));
}

#[tokio::test]
async fn test_snapshot_fails_when_currently_playing_fails() {
    let fake = FakeSpotify {
        top: vec![track("Heroes", &["David Bowie"], "spotify:track:2")],
        fail_currently_playing: true,
        ..Default::default()
    }
    .arc();

    let err = manager(&fake).current_playback_snapshot().await.unwrap_err();
    assert!(matches!(err, Error::Upstream(_)));
    assert_eq!(err.status_code().as_u16(), 500);
}

#[tokio::test]
async fn test_authentication_failure_stops_playback_calls() {
    let fake = FakeSpotify {
        fail_refresh: true,
        ..Default::default()
    }
    .arc();
    let player = manager(&fake);

    assert!(matches!(
        player.current_playback_snapshot().await.unwrap_err(),
        Error::Authentication(_)
    ));
    assert!(matches!(
        player.pause_playback().await.unwrap_err(),
        Error::Authentication(_)
    ));

    assert_eq!(fake.currently_playing_calls.load(Ordering::SeqCst), 0);
    assert_eq!(fake.top_tracks_calls.load(Ordering::SeqCst), 0);
    assert_eq!(fake.pause_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_start_playback_requires_uri() {
    let fake = FakeSpotify::default().arc();
    let player = manager(&fake);

    for uri in ["", "   "] {
        match player.start_playback(uri).await.unwrap_err() {
            Error::InvalidRequest(message) => assert_eq!(message, "Track URI is required"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    // Rejected before any token exchange or player call
    assert_eq!(fake.network_calls(), 0);
}

#[tokio::test]
async fn test_start_playback_plays_single_uri() {
    let fake = FakeSpotify::default().arc();

    manager(&fake)
        .start_playback(" spotify:track:4uLU6hMCjMI75M1A2tKUQC ")
        .await
        .unwrap();

    assert_eq!(
        *fake.played_uris.lock().unwrap(),
        vec!["spotify:track:4uLU6hMCjMI75M1A2tKUQC".to_string()]
    );
    assert_eq!(fake.refresh_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_no_active_device_by_reason() {
    let fake = FakeSpotify {
        play_error: Some((
            404,
            "Player command failed: No active device found".to_string(),
            Some(NO_ACTIVE_DEVICE.to_string()),
        )),
        ..Default::default()
    }
    .arc();

    let err = manager(&fake)
        .start_playback("spotify:track:1")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NoActiveDevice));
    assert_eq!(err.status_code().as_u16(), 400);
}

#[tokio::test]
async fn test_no_active_device_by_message() {
    let fake = FakeSpotify {
        play_error: Some((404, "NO_ACTIVE_DEVICE".to_string(), None)),
        ..Default::default()
    }
    .arc();

    let err = manager(&fake)
        .start_playback("spotify:track:1")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NoActiveDevice));
}

#[tokio::test]
async fn test_other_play_errors_are_upstream() {
    let fake = FakeSpotify {
        play_error: Some((
            403,
            "Player command failed: Premium required".to_string(),
            Some("PREMIUM_REQUIRED".to_string()),
        )),
        ..Default::default()
    }
    .arc();

    let err = manager(&fake)
        .start_playback("spotify:track:1")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Upstream(_)));
    assert_eq!(err.status_code().as_u16(), 500);
}

#[tokio::test]
async fn test_pause() {
    let fake = FakeSpotify::default().arc();
    manager(&fake).pause_playback().await.unwrap();
    assert_eq!(fake.pause_calls.load(Ordering::SeqCst), 1);

    let fake = FakeSpotify {
        fail_pause: true,
        ..Default::default()
    }
    .arc();
    let err = manager(&fake).pause_playback().await.unwrap_err();
    assert!(matches!(err, Error::Upstream(_)));
}

#[tokio::test]
async fn test_each_operation_derives_a_fresh_token() {
    let fake = FakeSpotify::default().arc();
    let player = manager(&fake);

    player.pause_playback().await.unwrap();
    player.start_playback("spotify:track:1").await.unwrap();
    player.now_playing().await.unwrap();

    assert_eq!(fake.refresh_calls.load(Ordering::SeqCst), 3);
    assert_eq!(
        *fake.tokens_used.lock().unwrap(),
        vec![
            "access-1".to_string(),
            "access-2".to_string(),
            "access-3".to_string()
        ]
    );
}

#[tokio::test]
async fn test_top_tracks_limit_bounds() {
    let fake = FakeSpotify {
        top: vec![track("Heroes", &["David Bowie"], "spotify:track:2")],
        ..Default::default()
    }
    .arc();
    let player = manager(&fake);

    assert!(matches!(
        player.top_tracks(0).await.unwrap_err(),
        Error::InvalidRequest(_)
    ));
    assert!(matches!(
        player.top_tracks(51).await.unwrap_err(),
        Error::InvalidRequest(_)
    ));
    assert_eq!(fake.network_calls(), 0);

    let tracks = player.top_tracks(50).await.unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(*fake.top_limits.lock().unwrap(), vec![50]);
}

#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use spotremote::{
    config::Config,
    spotify::{ApiError, SpotifyApi},
    types::{AccessToken, AlbumRef, ArtistRef, TokenResponse, Track},
};

/// In-memory stand-in for Spotify that records every call.
///
/// Each refresh hands out a new token (`access-1`, `access-2`, ...) so tests
/// can check that a token is never reused across operations.
#[derive(Default)]
pub struct FakeSpotify {
    pub fail_refresh: bool,
    pub fail_exchange: bool,
    pub fail_currently_playing: bool,
    pub fail_top_tracks: bool,
    pub fail_pause: bool,
    pub exchange_without_refresh_token: bool,
    pub rotate_refresh_token: bool,
    pub now_playing: Option<Track>,
    pub top: Vec<Track>,
    /// `(status, message, reason)` returned by `play`.
    pub play_error: Option<(u16, String, Option<String>)>,

    pub refresh_calls: AtomicUsize,
    pub exchange_calls: AtomicUsize,
    pub currently_playing_calls: AtomicUsize,
    pub top_tracks_calls: AtomicUsize,
    pub play_calls: AtomicUsize,
    pub pause_calls: AtomicUsize,

    pub refresh_tokens_seen: Mutex<Vec<String>>,
    pub codes_seen: Mutex<Vec<String>>,
    pub tokens_used: Mutex<Vec<String>>,
    pub played_uris: Mutex<Vec<String>>,
    pub top_limits: Mutex<Vec<u32>>,
}

impl FakeSpotify {
    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn network_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
            + self.exchange_calls.load(Ordering::SeqCst)
            + self.currently_playing_calls.load(Ordering::SeqCst)
            + self.top_tracks_calls.load(Ordering::SeqCst)
            + self.play_calls.load(Ordering::SeqCst)
            + self.pause_calls.load(Ordering::SeqCst)
    }

    fn use_token(&self, token: &AccessToken) {
        self.tokens_used
            .lock()
            .unwrap()
            .push(token.as_str().to_string());
    }
}

#[async_trait::async_trait]
impl SpotifyApi for FakeSpotify {
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenResponse, ApiError> {
        let n = self.refresh_calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.refresh_tokens_seen
            .lock()
            .unwrap()
            .push(refresh_token.to_string());

        if self.fail_refresh {
            return Err(ApiError::Api {
                status: 400,
                message: "Refresh token revoked".to_string(),
                reason: Some("invalid_grant".to_string()),
            });
        }

        Ok(TokenResponse {
            access_token: format!("access-{n}"),
            token_type: "Bearer".to_string(),
            scope: "user-top-read".to_string(),
            expires_in: 3600,
            refresh_token: self
                .rotate_refresh_token
                .then(|| format!("rotated-{n}")),
        })
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenResponse, ApiError> {
        self.exchange_calls.fetch_add(1, Ordering::SeqCst);
        self.codes_seen.lock().unwrap().push(code.to_string());

        if self.fail_exchange {
            return Err(ApiError::Api {
                status: 400,
                message: "Invalid authorization code".to_string(),
                reason: Some("invalid_grant".to_string()),
            });
        }

        Ok(TokenResponse {
            access_token: "exchanged-access".to_string(),
            token_type: "Bearer".to_string(),
            scope: "user-read-playback-state user-top-read".to_string(),
            expires_in: 3600,
            refresh_token: (!self.exchange_without_refresh_token)
                .then(|| "exchanged-refresh".to_string()),
        })
    }

    async fn currently_playing(&self, token: &AccessToken) -> Result<Option<Track>, ApiError> {
        self.currently_playing_calls.fetch_add(1, Ordering::SeqCst);
        self.use_token(token);

        if self.fail_currently_playing {
            return Err(ApiError::Api {
                status: 502,
                message: "Bad Gateway".to_string(),
                reason: None,
            });
        }
        Ok(self.now_playing.clone())
    }

    async fn top_tracks(&self, token: &AccessToken, limit: u32) -> Result<Vec<Track>, ApiError> {
        self.top_tracks_calls.fetch_add(1, Ordering::SeqCst);
        self.use_token(token);
        self.top_limits.lock().unwrap().push(limit);

        if self.fail_top_tracks {
            return Err(ApiError::Transport("connection reset".to_string()));
        }
        Ok(self.top.clone())
    }

    async fn play(&self, token: &AccessToken, uris: &[String]) -> Result<(), ApiError> {
        self.play_calls.fetch_add(1, Ordering::SeqCst);
        self.use_token(token);
        self.played_uris.lock().unwrap().extend(uris.iter().cloned());

        match &self.play_error {
            Some((status, message, reason)) => Err(ApiError::Api {
                status: *status,
                message: message.clone(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    async fn pause(&self, token: &AccessToken) -> Result<(), ApiError> {
        self.pause_calls.fetch_add(1, Ordering::SeqCst);
        self.use_token(token);

        if self.fail_pause {
            return Err(ApiError::Api {
                status: 403,
                message: "Player command failed: Restriction violated".to_string(),
                reason: Some("UNKNOWN".to_string()),
            });
        }
        Ok(())
    }
}

pub fn as_api(fake: &Arc<FakeSpotify>) -> Arc<dyn SpotifyApi> {
    Arc::clone(fake) as Arc<dyn SpotifyApi>
}

pub fn test_config(refresh_token: Option<&str>) -> Config {
    let refresh_token = refresh_token.map(str::to_string);
    Config::from_lookup(move |key| match key {
        "SPOTIFY_CLIENT_ID" => Some("test-client-id".to_string()),
        "SPOTIFY_CLIENT_SECRET" => Some("test-client-secret".to_string()),
        "SPOTIFY_REFRESH_TOKEN" => refresh_token.clone(),
        _ => None,
    })
    .unwrap()
}

pub fn track(name: &str, artists: &[&str], uri: &str) -> Track {
    Track {
        name: name.to_string(),
        artists: artists
            .iter()
            .map(|a| ArtistRef {
                name: a.to_string(),
                uri: None,
            })
            .collect(),
        uri: uri.to_string(),
        album: Some(AlbumRef {
            name: format!("{name} (Album)"),
            uri: None,
        }),
        duration_ms: Some(200_000),
    }
}

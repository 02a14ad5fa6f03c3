//! # Spotify Integration Module
//!
//! The only layer that talks to Spotify. Everything above it depends on the
//! [`SpotifyApi`] capability trait, so the token manager, the authorization
//! flow and the playback facade can be exercised against fakes.
//!
//! ```text
//! HTTP handlers / CLI
//!          ↓
//! management (TokenManager, PlaybackManager, StateManager)
//!          ↓
//! SpotifyApi  ──  SpotifyClient (reqwest)
//!          ↓
//! accounts.spotify.com / api.spotify.com
//! ```
//!
//! ## Submodules
//!
//! - [`auth`] - The authorization-code flow: authorization URL, callback
//!   handling and the code-for-tokens exchange.
//! - [`client`] - [`SpotifyClient`], the reqwest implementation of
//!   [`SpotifyApi`].
//!
//! ## Endpoints used
//!
//! - `POST /api/token` - authorization-code and refresh-token grants
//! - `GET /me/player/currently-playing`
//! - `GET /me/top/tracks`
//! - `PUT /me/player/play`
//! - `PUT /me/player/pause`
//!
//! No call is retried. Rate limits are not handled.

pub mod auth;
pub mod client;

pub use auth::{AuthorizationFlow, AuthorizationRequest};
pub use client::SpotifyClient;

use crate::types::{AccessToken, TokenResponse, Track};

/// Reason Spotify reports when a player command has no device to run on.
pub const NO_ACTIVE_DEVICE: &str = "NO_ACTIVE_DEVICE";

/// Failure of a single call to Spotify.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("{status}: {message}")]
    Api {
        status: u16,
        message: String,
        reason: Option<String>,
    },

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_no_active_device(&self) -> bool {
        match self {
            ApiError::Api {
                message, reason, ..
            } => reason.as_deref() == Some(NO_ACTIVE_DEVICE) || message.contains(NO_ACTIVE_DEVICE),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// The capabilities this backend needs from Spotify.
///
/// Each method performs exactly one network round trip.
#[async_trait::async_trait]
pub trait SpotifyApi: Send + Sync {
    /// Exchanges a refresh token for a new access token.
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenResponse, ApiError>;

    /// Exchanges an authorization code for an access/refresh token pair.
    async fn exchange_code(&self, code: &str) -> Result<TokenResponse, ApiError>;

    /// The track currently playing, or `None` when nothing is playing.
    async fn currently_playing(&self, token: &AccessToken) -> Result<Option<Track>, ApiError>;

    async fn top_tracks(&self, token: &AccessToken, limit: u32) -> Result<Vec<Track>, ApiError>;

    async fn play(&self, token: &AccessToken, uris: &[String]) -> Result<(), ApiError>;

    async fn pause(&self, token: &AccessToken) -> Result<(), ApiError>;
}

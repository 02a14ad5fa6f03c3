use std::sync::Arc;

use tracing::warn;

use crate::{
    Error,
    management::TokenManager,
    spotify::{ApiError, SpotifyApi},
    types::{PlaybackSnapshot, TopTrack, Track},
};

/// Number of top tracks included in a playback snapshot.
pub const SNAPSHOT_TOP_TRACKS: u32 = 10;

/// Upper bound Spotify accepts for `/me/top/tracks`.
pub const MAX_TOP_TRACKS: u32 = 50;

/// Thin pass-through to the Spotify player.
///
/// Every operation derives a fresh access token first and then issues its
/// call(s) with it. Nothing is retried.
pub struct PlaybackManager {
    api: Arc<dyn SpotifyApi>,
    tokens: TokenManager,
}

impl PlaybackManager {
    pub fn new(api: Arc<dyn SpotifyApi>, tokens: TokenManager) -> Self {
        Self { api, tokens }
    }

    /// What is playing right now together with the user's top 10 tracks.
    ///
    /// Both calls run concurrently. Nothing playing is `now_playing: None`; a
    /// failure of either call fails the whole snapshot.
    pub async fn current_playback_snapshot(&self) -> Result<PlaybackSnapshot, Error> {
        let token = self.tokens.obtain_access_token().await?;

        let (now_playing, top) = tokio::try_join!(
            self.api.currently_playing(&token),
            self.api.top_tracks(&token, SNAPSHOT_TOP_TRACKS),
        )
        .map_err(upstream)?;

        Ok(PlaybackSnapshot {
            now_playing,
            top_tracks: top.into_iter().map(TopTrack::from).collect(),
        })
    }

    pub async fn now_playing(&self) -> Result<Option<Track>, Error> {
        let token = self.tokens.obtain_access_token().await?;
        self.api.currently_playing(&token).await.map_err(upstream)
    }

    /// # Errors
    ///
    /// [`Error::InvalidRequest`] unless `1 <= limit <= 50`.
    pub async fn top_tracks(&self, limit: u32) -> Result<Vec<TopTrack>, Error> {
        if limit == 0 || limit > MAX_TOP_TRACKS {
            return Err(Error::InvalidRequest(format!(
                "limit must be between 1 and {MAX_TOP_TRACKS}"
            )));
        }

        let token = self.tokens.obtain_access_token().await?;
        let tracks = self.api.top_tracks(&token, limit).await.map_err(upstream)?;
        Ok(tracks.into_iter().map(TopTrack::from).collect())
    }

    /// Starts playing `track_uri` on the user's active device.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRequest`] for an empty URI, before any network call
    /// - [`Error::NoActiveDevice`] when Spotify has no device to play on
    /// - [`Error::Upstream`] for any other Spotify failure
    pub async fn start_playback(&self, track_uri: &str) -> Result<(), Error> {
        let track_uri = track_uri.trim();
        if track_uri.is_empty() {
            return Err(Error::InvalidRequest("Track URI is required".to_string()));
        }

        let token = self.tokens.obtain_access_token().await?;
        self.api
            .play(&token, &[track_uri.to_string()])
            .await
            .map_err(|e| {
                if e.is_no_active_device() {
                    Error::NoActiveDevice
                } else {
                    upstream(e)
                }
            })
    }

    pub async fn pause_playback(&self) -> Result<(), Error> {
        let token = self.tokens.obtain_access_token().await?;
        self.api.pause(&token).await.map_err(upstream)
    }
}

fn upstream(err: ApiError) -> Error {
    warn!(error = %err, "Spotify API call failed");
    Error::Upstream(err.to_string())
}

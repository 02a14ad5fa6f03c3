use std::sync::Arc;

use axum::{
    Extension,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::error;

use crate::{
    Error,
    management::PlaybackManager,
    server::AppState,
    types::PlayRequest,
};

pub const NO_ACTIVE_DEVICE_MESSAGE: &str =
    "No active Spotify device. Open Spotify on your phone or computer and play a song once.";

pub const NOT_CONFIGURED_MESSAGE: &str =
    "Spotify refresh token is not configured. Complete /auth/login and set SPOTIFY_REFRESH_TOKEN.";

/// JSON `{error}` body with a status code.
struct JsonError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl JsonError {
    /// Caller-actionable errors keep their own message; everything else is
    /// logged and answered with `fallback`.
    fn from_error(err: Error, fallback: &str) -> Self {
        match err {
            Error::InvalidRequest(message) => Self {
                status: StatusCode::BAD_REQUEST,
                message,
            },
            Error::NoActiveDevice => Self {
                status: StatusCode::BAD_REQUEST,
                message: NO_ACTIVE_DEVICE_MESSAGE.to_string(),
            },
            other => {
                error!(error = %other, "{fallback}");
                Self {
                    status: other.status_code(),
                    message: fallback.to_string(),
                }
            }
        }
    }

    fn not_configured() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: NOT_CONFIGURED_MESSAGE.to_string(),
        }
    }
}

fn player(state: &AppState) -> Result<Arc<PlaybackManager>, JsonError> {
    state.playback.clone().ok_or_else(JsonError::not_configured)
}

/// `GET /spotify`: `{nowPlaying, topTracks}`.
pub async fn snapshot(Extension(state): Extension<AppState>) -> Response {
    let player = match player(&state) {
        Ok(player) => player,
        Err(e) => return e.into_response(),
    };

    match player.current_playback_snapshot().await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => JsonError::from_error(e, "Failed to fetch Spotify data").into_response(),
    }
}

/// `POST /spotify/play` with body `{uri}`.
///
/// A missing or unreadable body is treated like a missing URI.
pub async fn play(
    Extension(state): Extension<AppState>,
    body: Result<Json<PlayRequest>, JsonRejection>,
) -> Response {
    let uri = body
        .ok()
        .and_then(|Json(req)| req.uri)
        .unwrap_or_default();

    if uri.trim().is_empty() {
        return JsonError::from_error(
            Error::InvalidRequest("Track URI is required".to_string()),
            "Failed to start playback",
        )
        .into_response();
    }

    let player = match player(&state) {
        Ok(player) => player,
        Err(e) => return e.into_response(),
    };

    match player.start_playback(&uri).await {
        Ok(()) => Json(json!({ "status": "Playing track", "uri": uri.trim() })).into_response(),
        Err(e) => JsonError::from_error(e, "Failed to start playback").into_response(),
    }
}

/// `POST /spotify/pause`.
pub async fn pause(Extension(state): Extension<AppState>) -> Response {
    let player = match player(&state) {
        Ok(player) => player,
        Err(e) => return e.into_response(),
    };

    match player.pause_playback().await {
        Ok(()) => Json(json!({ "status": "Playback paused" })).into_response(),
        Err(e) => JsonError::from_error(e, "Failed to pause playback").into_response(),
    }
}

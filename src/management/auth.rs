use std::sync::Arc;

use tracing::{debug, warn};

use crate::{Error, spotify::SpotifyApi, types::AccessToken};

/// Derives access tokens from the configured refresh token.
///
/// Nothing is cached: every call to [`TokenManager::obtain_access_token`] is one
/// round trip to the token endpoint, and the returned token is meant for the
/// calls of a single request only.
pub struct TokenManager {
    api: Arc<dyn SpotifyApi>,
    refresh_token: String,
}

impl TokenManager {
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `refresh_token` is empty.
    pub fn new(api: Arc<dyn SpotifyApi>, refresh_token: impl Into<String>) -> Result<Self, Error> {
        let refresh_token = refresh_token.into();
        if refresh_token.trim().is_empty() {
            return Err(Error::Configuration(
                "SPOTIFY_REFRESH_TOKEN must be set".to_string(),
            ));
        }

        Ok(Self { api, refresh_token })
    }

    /// Exchanges the refresh token for a fresh access token.
    ///
    /// A single attempt; the caller decides whether to try again.
    ///
    /// # Errors
    ///
    /// Any failure of the exchange (network, revoked token, malformed response)
    /// is reported as [`Error::Authentication`].
    pub async fn obtain_access_token(&self) -> Result<AccessToken, Error> {
        let response = self
            .api
            .refresh_access_token(&self.refresh_token)
            .await
            .map_err(|e| {
                warn!(error = %e, "failed to refresh access token");
                Error::Authentication(e.to_string())
            })?;

        if response.access_token.is_empty() {
            return Err(Error::Authentication(
                "token endpoint returned an empty access token".to_string(),
            ));
        }

        if response.refresh_token.is_some() {
            debug!("Spotify rotated the refresh token; the configured one stays in use");
        }

        Ok(AccessToken::new(response.access_token))
    }
}

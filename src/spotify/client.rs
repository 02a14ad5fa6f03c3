use reqwest::{Client, Response, StatusCode};
use tracing::debug;

use crate::{
    config::{Config, Credentials},
    spotify::{ApiError, SpotifyApi},
    types::{
        AccessToken, ApiErrorResponse, CurrentlyPlayingResponse, OAuthErrorResponse,
        StartPlaybackRequest, TokenResponse, TopTracksResponse, Track,
    },
    utils,
};

/// reqwest-backed implementation of [`SpotifyApi`].
///
/// Token requests authenticate the application with HTTP Basic credentials
/// built from the client id and secret; Web API requests carry the caller's
/// bearer token.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    client: Client,
    credentials: Credentials,
    token_url: String,
    api_url: String,
}

impl SpotifyClient {
    pub fn new(config: &Config) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &Config) -> Self {
        Self {
            client,
            credentials: config.credentials.clone(),
            token_url: config.token_url(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
        }
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<TokenResponse, ApiError> {
        let res = self
            .client
            .post(&self.token_url)
            .header(
                reqwest::header::AUTHORIZATION,
                utils::basic_auth_header(
                    &self.credentials.client_id,
                    &self.credentials.client_secret,
                ),
            )
            .form(form)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<OAuthErrorResponse>(&body) {
                Ok(err) => ApiError::Api {
                    status: status.as_u16(),
                    message: err.error_description.unwrap_or_else(|| err.error.clone()),
                    reason: Some(err.error),
                },
                Err(_) => ApiError::Api {
                    status: status.as_u16(),
                    message: body,
                    reason: None,
                },
            });
        }

        Ok(res.json().await?)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}

/// Turns a non-success Web API response into [`ApiError::Api`].
async fn check_status(res: Response) -> Result<Response, ApiError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    Err(match serde_json::from_str::<ApiErrorResponse>(&body) {
        Ok(envelope) => ApiError::Api {
            status: status.as_u16(),
            message: envelope.error.message,
            reason: envelope.error.reason,
        },
        Err(_) => ApiError::Api {
            status: status.as_u16(),
            message: body,
            reason: None,
        },
    })
}

#[async_trait::async_trait]
impl SpotifyApi for SpotifyClient {
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenResponse, ApiError> {
        debug!("requesting access token with refresh token grant");
        self.request_token(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenResponse, ApiError> {
        debug!("exchanging authorization code");
        self.request_token(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.credentials.redirect_uri.as_str()),
        ])
        .await
    }

    async fn currently_playing(&self, token: &AccessToken) -> Result<Option<Track>, ApiError> {
        let res = self
            .client
            .get(self.endpoint("/me/player/currently-playing"))
            .bearer_auth(token.as_str())
            .send()
            .await?;
        let res = check_status(res).await?;

        // 204 means nothing is playing
        if res.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = res.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        let playing: CurrentlyPlayingResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(playing.item)
    }

    async fn top_tracks(&self, token: &AccessToken, limit: u32) -> Result<Vec<Track>, ApiError> {
        let res = self
            .client
            .get(self.endpoint("/me/top/tracks"))
            .query(&[("limit", limit)])
            .bearer_auth(token.as_str())
            .send()
            .await?;
        let top: TopTracksResponse = check_status(res).await?.json().await?;
        Ok(top.items)
    }

    async fn play(&self, token: &AccessToken, uris: &[String]) -> Result<(), ApiError> {
        let res = self
            .client
            .put(self.endpoint("/me/player/play"))
            .bearer_auth(token.as_str())
            .json(&StartPlaybackRequest {
                uris: uris.to_vec(),
            })
            .send()
            .await?;
        check_status(res).await?;
        Ok(())
    }

    async fn pause(&self, token: &AccessToken) -> Result<(), ApiError> {
        let res = self
            .client
            .put(self.endpoint("/me/player/pause"))
            .bearer_auth(token.as_str())
            .header(reqwest::header::CONTENT_LENGTH, 0)
            .send()
            .await?;
        check_status(res).await?;
        Ok(())
    }
}

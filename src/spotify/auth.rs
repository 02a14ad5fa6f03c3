use std::sync::Arc;

use tracing::{info, warn};
use url::Url;

use crate::{
    Error,
    config::{Config, Credentials, SPOTIFY_SCOPES},
    management::StateManager,
    spotify::SpotifyApi,
    types::{CallbackParams, TokenPair},
    utils,
};

/// A prepared authorization request: where to send the user and the state
/// that the callback has to bring back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    pub url: String,
    pub state: String,
}

/// Drives the OAuth 2.0 authorization-code flow.
///
/// A login attempt moves through three stages:
///
/// 1. **Awaiting user consent**: nothing issued yet.
/// 2. **Awaiting callback**: [`AuthorizationFlow::initiate`] generated a state
///    and an authorization URL; the user is on Spotify's consent page.
/// 3. **Completed**: [`AuthorizationFlow::complete_callback`] accepted the
///    redirect and exchanged the code for a [`TokenPair`].
///
/// The refresh token of a completed attempt is handed back to the caller. It is
/// never stored here; the operator copies it into `SPOTIFY_REFRESH_TOKEN`.
pub struct AuthorizationFlow {
    api: Arc<dyn SpotifyApi>,
    credentials: Credentials,
    authorize_url: String,
    states: StateManager,
}

impl AuthorizationFlow {
    pub fn new(api: Arc<dyn SpotifyApi>, config: &Config) -> Self {
        Self::with_states(api, config, StateManager::default())
    }

    pub fn with_states(api: Arc<dyn SpotifyApi>, config: &Config, states: StateManager) -> Self {
        Self {
            api,
            credentials: config.credentials.clone(),
            authorize_url: config.authorize_url(),
            states,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn states(&self) -> &StateManager {
        &self.states
    }

    /// Starts a login attempt.
    ///
    /// Generates a fresh state, remembers it and builds the authorization URL
    /// carrying `response_type=code`, the client id, the scopes, the redirect
    /// URI and the state.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] if the configured accounts URL is not a valid URL.
    pub async fn initiate(&self) -> Result<AuthorizationRequest, Error> {
        let state = utils::generate_state();
        let url = build_authorize_url(&self.authorize_url, &self.credentials, &state)?;

        self.states.add(state.clone()).await;
        info!(redirect_uri = %self.credentials.redirect_uri, "issued authorization request");

        Ok(AuthorizationRequest {
            url: url.to_string(),
            state,
        })
    }

    /// Consumes the parameters Spotify appended to the redirect URI.
    ///
    /// Checks run in this order and stop at the first failure, before any
    /// network call:
    ///
    /// 1. an `error` parameter: [`Error::AuthorizationDenied`]
    /// 2. no `code`: [`Error::MissingAuthorizationCode`]
    /// 3. a `state` that was not issued, was already used or expired:
    ///    [`Error::StateMismatch`]
    ///
    /// Otherwise the code is exchanged in one call to the token endpoint.
    ///
    /// # Errors
    ///
    /// [`Error::TokenExchange`] if the exchange fails.
    pub async fn complete_callback(&self, params: &CallbackParams) -> Result<TokenPair, Error> {
        if let Some(error) = params.error.as_deref().filter(|e| !e.is_empty()) {
            warn!(error, "Spotify denied the authorization request");
            return Err(Error::AuthorizationDenied {
                error: error.to_string(),
                description: params.error_description.clone(),
            });
        }

        let Some(code) = params.code.as_deref().filter(|c| !c.is_empty()) else {
            warn!("callback carried no authorization code");
            return Err(Error::MissingAuthorizationCode);
        };

        let state = params.state.as_deref().unwrap_or_default();
        if state.is_empty() || !self.states.consume(state).await {
            warn!("callback state does not match an issued login attempt");
            return Err(Error::StateMismatch);
        }

        let response = self.api.exchange_code(code).await.map_err(|e| {
            warn!(error = %e, "authorization code exchange failed");
            Error::TokenExchange(e.to_string())
        })?;

        let Some(refresh_token) = response.refresh_token.filter(|t| !t.is_empty()) else {
            return Err(Error::TokenExchange(
                "token endpoint returned no refresh token".to_string(),
            ));
        };

        info!("authorization code exchanged for tokens");

        Ok(TokenPair {
            access_token: response.access_token,
            refresh_token,
            scope: response.scope,
            expires_in: response.expires_in,
            obtained_at: utils::now_timestamp(),
        })
    }

    /// Exchanges `refresh_token` for a new access token.
    ///
    /// The returned pair keeps `refresh_token` unless Spotify rotated it.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRequest`] for an empty token, [`Error::Authentication`]
    /// if the exchange fails.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, Error> {
        let refresh_token = refresh_token.trim();
        if refresh_token.is_empty() {
            return Err(Error::InvalidRequest(
                "Missing refresh_token parameter".to_string(),
            ));
        }

        let response = self
            .api
            .refresh_access_token(refresh_token)
            .await
            .map_err(|e| Error::Authentication(e.to_string()))?;

        Ok(TokenPair {
            access_token: response.access_token,
            refresh_token: response
                .refresh_token
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| refresh_token.to_string()),
            scope: response.scope,
            expires_in: response.expires_in,
            obtained_at: utils::now_timestamp(),
        })
    }
}

/// Builds the URL of Spotify's consent page.
///
/// # Errors
///
/// [`Error::Configuration`] if `authorize_url` does not parse.
pub fn build_authorize_url(
    authorize_url: &str,
    credentials: &Credentials,
    state: &str,
) -> Result<Url, Error> {
    let scope = SPOTIFY_SCOPES.join(" ");
    Url::parse_with_params(
        authorize_url,
        &[
            ("response_type", "code"),
            ("client_id", credentials.client_id.as_str()),
            ("scope", scope.as_str()),
            ("redirect_uri", credentials.redirect_uri.as_str()),
            ("state", state),
        ],
    )
    .map_err(|e| Error::Configuration(format!("invalid authorization URL: {e}")))
}

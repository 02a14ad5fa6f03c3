use std::sync::Arc;

use axum::{
    Extension, Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    Error, Res, api,
    config::Config,
    management::{PlaybackManager, TokenManager},
    spotify::{AuthorizationFlow, SpotifyApi, SpotifyClient},
};

/// Everything the handlers share. Immutable apart from the issued login
/// states inside the authorization flow.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthorizationFlow>,
    /// `None` until a refresh token is configured.
    pub playback: Option<Arc<PlaybackManager>>,
}

impl AppState {
    pub fn new(api: Arc<dyn SpotifyApi>, config: &Config) -> Result<Self, Error> {
        let playback = match &config.refresh_token {
            Some(refresh_token) => {
                let tokens = TokenManager::new(Arc::clone(&api), refresh_token.clone())?;
                Some(Arc::new(PlaybackManager::new(Arc::clone(&api), tokens)))
            }
            None => None,
        };

        Ok(Self {
            auth: Arc::new(AuthorizationFlow::new(api, config)),
            playback,
        })
    }

    /// State wired to the real Spotify client.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::new(Arc::new(SpotifyClient::new(config)), config)
    }
}

pub fn router(state: AppState) -> Router {
    let auth = Router::new()
        .route("/login", get(api::login))
        .route("/login-auto", get(api::login_auto))
        .route("/callback", get(api::callback))
        .route("/refresh_token", get(api::refresh_token))
        .route("/test", get(api::test));

    Router::new()
        .route("/", get(api::root))
        .route("/health", get(api::health))
        .route("/spotify", get(api::snapshot))
        .route("/spotify/play", post(api::play))
        .route("/spotify/pause", post(api::pause))
        .nest("/auth", auth)
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn start_api_server(config: Config) -> Res<()> {
    let state = AppState::from_config(&config)?;
    let app = router(state);

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}

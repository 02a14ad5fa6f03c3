use crate::{config::Config, error, info, server::start_api_server, success, warning};

pub async fn serve(config: Config) {
    if config.refresh_token.is_none() {
        warning!(
            "SPOTIFY_REFRESH_TOKEN is not set. Playback routes answer with an error until it is; visit /auth/login to obtain one."
        );
    }

    info!("Server is running on http://localhost:{}", config.port);
    if let Err(e) = start_api_server(config).await {
        error!("Server stopped: {}", e);
    }
    success!("Server stopped.");
}

/// Runs the backend and points the default browser at the automatic login
/// route. The refresh token is shown on the callback page.
pub async fn auth(config: Config) {
    let login_url = format!("http://127.0.0.1:{}/auth/login-auto", config.port);
    let redirect_uri = config.credentials.redirect_uri.clone();

    let server = tokio::spawn(start_api_server(config));

    info!("Redirect URI configured: {}", redirect_uri);
    if webbrowser::open(&login_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            login_url
        )
    }
    info!("Copy the refresh token from the browser into SPOTIFY_REFRESH_TOKEN, then press Ctrl+C.");

    match server.await {
        Ok(Ok(())) => success!("Authorization server stopped."),
        Ok(Err(e)) => error!("Server stopped: {}", e),
        Err(e) => error!("Server task failed: {}", e),
    }
}

use axum::{
    Extension,
    extract::OriginalUri,
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use tracing::{error, info};

use crate::{api::pages, server::AppState};

/// Shows the authorization URL as a link instead of redirecting, so the
/// operator can inspect what is sent to Spotify.
pub async fn login(Extension(state): Extension<AppState>) -> Response {
    match state.auth.initiate().await {
        Ok(request) => {
            info!("serving authorization link");
            Html(pages::login(&request, state.auth.credentials())).into_response()
        }
        Err(e) => {
            error!(error = %e, "cannot build authorization URL");
            (e.status_code(), Html(pages::plain_error(&e.to_string()))).into_response()
        }
    }
}

/// Sends the browser straight to Spotify's consent page with a 302.
pub async fn login_auto(Extension(state): Extension<AppState>) -> Response {
    match state.auth.initiate().await {
        Ok(request) => {
            info!("redirecting to Spotify authorization");
            (StatusCode::FOUND, [(header::LOCATION, request.url)]).into_response()
        }
        Err(e) => {
            error!(error = %e, "cannot build authorization URL");
            (e.status_code(), Html(pages::plain_error(&e.to_string()))).into_response()
        }
    }
}

/// Diagnostic page: where the request arrived and which settings are present.
pub async fn test(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    OriginalUri(uri): OriginalUri,
) -> Html<String> {
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown-host");
    let current_url = format!("http://{host}{uri}");
    let credentials = state.auth.credentials();

    Html(pages::diagnostics(&pages::Diagnostics {
        current_url: &current_url,
        redirect_uri: &credentials.redirect_uri,
        client_id_set: !credentials.client_id.is_empty(),
        client_secret_set: !credentials.client_secret.is_empty(),
        refresh_token_set: state.playback.is_some(),
    }))
}

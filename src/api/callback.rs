use axum::{
    Extension,
    extract::Query,
    response::{Html, IntoResponse, Response},
};
use tracing::{info, warn};

use crate::{
    api::pages,
    server::AppState,
    types::{CallbackParams, RefreshTokenParams},
};

/// Redirect target registered with Spotify.
///
/// 400 when the user declined, the code is missing or the state does not
/// match; 500 when the code exchange fails.
pub async fn callback(
    Query(params): Query<CallbackParams>,
    Extension(state): Extension<AppState>,
) -> Response {
    info!(
        has_code = params.code.is_some(),
        has_error = params.error.is_some(),
        has_state = params.state.is_some(),
        "authorization callback received"
    );

    match state.auth.complete_callback(&params).await {
        Ok(tokens) => Html(pages::callback_success(&tokens)).into_response(),
        Err(e) => {
            warn!(error = %e, "authorization callback failed");
            let redirect_uri = &state.auth.credentials().redirect_uri;
            (e.status_code(), Html(pages::auth_error(&e, redirect_uri))).into_response()
        }
    }
}

/// Exchanges the `refresh_token` query parameter for a fresh access token.
pub async fn refresh_token(
    Query(params): Query<RefreshTokenParams>,
    Extension(state): Extension<AppState>,
) -> Response {
    let refresh_token = params.refresh_token.unwrap_or_default();

    // A missing or blank parameter comes back as a 400 InvalidRequest
    match state.auth.refresh(&refresh_token).await {
        Ok(tokens) => Html(pages::refreshed(&tokens)).into_response(),
        Err(e) => {
            warn!(error = %e, "refresh token exchange failed");
            (e.status_code(), Html(pages::plain_error(&e.to_string()))).into_response()
        }
    }
}

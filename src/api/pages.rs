//! HTML bodies of the `/auth` pages. Every interpolated value is escaped.

use crate::{
    Error,
    config::Credentials,
    spotify::AuthorizationRequest,
    types::TokenPair,
    utils::{escape_html, format_expiry},
};

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n<body>\n{body}\n</body>\n</html>\n",
        title = escape_html(title),
        body = body
    )
}

pub fn login(request: &AuthorizationRequest, credentials: &Credentials) -> String {
    let url = escape_html(&request.url);
    let redirect_uri = escape_html(&credentials.redirect_uri);
    let body = format!(
        r#"<h2>🔍 Spotify Authorization</h2>
<p><strong>Click this link to authorize:</strong></p>
<a href="{url}" target="_blank">{url}</a>
<p><strong>After clicking the link above:</strong></p>
<ol>
  <li>You'll be taken to Spotify's authorization page</li>
  <li>Log in and authorize the app</li>
  <li>You should be redirected back to: {redirect_uri}</li>
  <li>Copy the refresh token shown there</li>
</ol>
<p><strong>Debug Info:</strong></p>
<ul>
  <li>Client ID: {client_id}</li>
  <li>Redirect URI: {redirect_uri}</li>
  <li>State: {state}</li>
</ul>
<p><strong>If you want automatic redirect:</strong> <a href="/auth/login-auto">Click here</a></p>"#,
        url = url,
        redirect_uri = redirect_uri,
        client_id = escape_html(&credentials.client_id),
        state = escape_html(&request.state),
    );
    page("Spotify Authorization", &body)
}

pub fn callback_success(tokens: &TokenPair) -> String {
    let body = format!(
        r#"<h2>🎉 Success! Copy your refresh token below:</h2>
<textarea rows="10" cols="80">{refresh_token}</textarea>
<p>Now save this in your <code>.env</code> file as <strong>SPOTIFY_REFRESH_TOKEN</strong>.</p>
<h3>Access Token (for testing):</h3>
<textarea rows="5" cols="80">{access_token}</textarea>
<p>Scope: {scope}</p>
<p>Access token expires: {expires}</p>"#,
        refresh_token = escape_html(&tokens.refresh_token),
        access_token = escape_html(&tokens.access_token),
        scope = escape_html(&tokens.scope),
        expires = escape_html(&format_expiry(tokens.obtained_at, tokens.expires_in)),
    );
    page("Authorization complete", &body)
}

pub fn refreshed(tokens: &TokenPair) -> String {
    let body = format!(
        r#"<h2>🔄 Access token refreshed</h2>
<h3>Access Token:</h3>
<textarea rows="5" cols="80">{access_token}</textarea>
<h3>Refresh Token:</h3>
<textarea rows="5" cols="80">{refresh_token}</textarea>
<p>Access token expires: {expires}</p>"#,
        access_token = escape_html(&tokens.access_token),
        refresh_token = escape_html(&tokens.refresh_token),
        expires = escape_html(&format_expiry(tokens.obtained_at, tokens.expires_in)),
    );
    page("Token refreshed", &body)
}

/// Error page for a failed authorization step.
pub fn auth_error(err: &Error, redirect_uri: &str) -> String {
    let details = match err {
        Error::AuthorizationDenied { error, description } => format!(
            "<h2>❌ Authentication Error</h2>\n<p>Error: {}</p>\n<p>Description: {}</p>",
            escape_html(error),
            escape_html(
                description
                    .as_deref()
                    .unwrap_or("No description provided")
            ),
        ),
        Error::MissingAuthorizationCode => {
            "<h2>❌ Missing Authorization Code</h2>\n<p>No authorization code was received from Spotify.</p>"
                .to_string()
        }
        Error::StateMismatch => {
            "<h2>❌ Invalid Authorization State</h2>\n<p>This callback does not belong to a login started here, or the login has expired.</p>"
                .to_string()
        }
        Error::TokenExchange(detail) => format!(
            r#"<h2>❌ Token Exchange Failed</h2>
<p>Error: {}</p>
<p>Make sure your Spotify app settings are correct:</p>
<ul>
  <li>Client ID and Client Secret are set in .env</li>
  <li>Redirect URI matches exactly: {}</li>
</ul>"#,
            escape_html(detail),
            escape_html(redirect_uri),
        ),
        other => format!(
            "<h2>❌ Authorization Failed</h2>\n<p>Error: {}</p>",
            escape_html(&other.to_string())
        ),
    };

    page(
        "Authorization failed",
        &format!("{details}\n<a href=\"/auth/login\">Try again</a>"),
    )
}

pub fn plain_error(message: &str) -> String {
    page("Error", &format!("<p>{}</p>", escape_html(message)))
}

/// What the diagnostic page reports.
pub struct Diagnostics<'a> {
    pub current_url: &'a str,
    pub redirect_uri: &'a str,
    pub client_id_set: bool,
    pub client_secret_set: bool,
    pub refresh_token_set: bool,
}

pub fn diagnostics(d: &Diagnostics<'_>) -> String {
    let mark = |set: bool| if set { "✅ Set" } else { "❌ Missing" };
    let body = format!(
        r#"<h2>🔧 Server Test</h2>
<p>Server is running correctly!</p>
<p>Current URL: {current_url}</p>
<p>Expected callback URL: {redirect_uri}</p>
<p>Environment variables check:</p>
<ul>
  <li>SPOTIFY_CLIENT_ID: {client_id}</li>
  <li>SPOTIFY_CLIENT_SECRET: {client_secret}</li>
  <li>SPOTIFY_REFRESH_TOKEN: {refresh_token}</li>
</ul>
<p><a href="/auth/login">Start OAuth Flow (Manual)</a></p>
<p><a href="/auth/login-auto">Start OAuth Flow (Auto)</a></p>"#,
        current_url = escape_html(d.current_url),
        redirect_uri = escape_html(d.redirect_uri),
        client_id = mark(d.client_id_set),
        client_secret = mark(d.client_secret_set),
        refresh_token = mark(d.refresh_token_set),
    );
    page("Server Test", &body)
}

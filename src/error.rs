use axum::http::StatusCode;

/// Every failure the backend can surface to a caller.
///
/// Handlers catch these at the request boundary and render them either as an
/// HTML page (authorization flow) or as a JSON `{error}` body (playback routes).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or malformed credentials. Raised at startup.
    #[error("configuration: {0}")]
    Configuration(String),

    /// The user declined consent, or Spotify refused the request.
    #[error("authorization denied: {error}")]
    AuthorizationDenied {
        error: String,
        description: Option<String>,
    },

    #[error("no authorization code was received from Spotify")]
    MissingAuthorizationCode,

    /// The callback carried a state that was never issued, was already used
    /// or has expired.
    #[error("authorization state does not match an issued login attempt")]
    StateMismatch,

    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Spotify authentication failed: {0}")]
    Authentication(String),

    #[error("no active Spotify device")]
    NoActiveDevice,

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Spotify API error: {0}")]
    Upstream(String),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::AuthorizationDenied { .. }
            | Error::MissingAuthorizationCode
            | Error::StateMismatch
            | Error::NoActiveDevice
            | Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::Configuration(_)
            | Error::TokenExchange(_)
            | Error::Authentication(_)
            | Error::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

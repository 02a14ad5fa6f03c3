//! Configuration management for the Spotify remote backend.
//!
//! This module handles loading configuration values from environment variables
//! and `.env` files and turns them into an immutable [`Config`] that is handed
//! to constructors explicitly. Nothing outside `main` reads the environment.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::Error;

pub const DEFAULT_PORT: u16 = 3000;

/// Must match the redirect URI registered in the Spotify developer dashboard
/// character for character.
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:3000/auth/callback";

pub const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

pub const SPOTIFY_SCOPES: [&str; 4] = [
    "user-read-playback-state",
    "user-modify-playback-state",
    "user-read-currently-playing",
    "user-top-read",
];

/// Loads environment variables from a `.env` file.
///
/// A `.env` in the working directory wins. Otherwise the file is looked up in
/// the platform-specific local data directory under `spotremote/.env`, whose
/// parent directory is created if needed:
/// - Linux: `~/.local/share/spotremote/.env`
/// - macOS: `~/Library/Application Support/spotremote/.env`
/// - Windows: `%LOCALAPPDATA%/spotremote/.env`
///
/// A missing file is not an error; variables may come from the real
/// environment instead.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    if dotenv::dotenv().is_ok() {
        return Ok(());
    }

    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(dotenv::Error::Io(_)) => Ok(()),
        Err(e) => Err(format!("Failed to parse {}: {}", path.display(), e)),
    }
}

/// Location of the fallback `.env` file in the local data directory.
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotremote/.env");
    path
}

/// The OAuth client registration.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

/// Immutable process-wide configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    /// Long-lived token obtained through the authorization flow. Absent while
    /// the operator is still onboarding.
    pub refresh_token: Option<String>,
    pub port: u16,
    pub accounts_url: String,
    pub api_url: String,
}

impl Config {
    /// Builds the configuration from environment variables.
    ///
    /// | Variable | Required | Default |
    /// |---|---|---|
    /// | `SPOTIFY_CLIENT_ID` | yes | |
    /// | `SPOTIFY_CLIENT_SECRET` | yes | |
    /// | `SPOTIFY_REFRESH_TOKEN` | no | |
    /// | `PORT` | no | `3000` |
    /// | `SPOTIFY_REDIRECT_URI` | no | `http://127.0.0.1:3000/auth/callback` |
    /// | `SPOTIFY_ACCOUNTS_URL` | no | `https://accounts.spotify.com` |
    /// | `SPOTIFY_API_URL` | no | `https://api.spotify.com/v1` |
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when a required variable is missing or
    /// empty, or when `PORT` is not a valid port number.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Used by [`Config::from_env`] and by tests that must not touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            non_empty(key).ok_or_else(|| Error::Configuration(format!("{key} must be set")))
        };

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| Error::Configuration(format!("PORT is invalid: {e}")))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            credentials: Credentials {
                client_id: required("SPOTIFY_CLIENT_ID")?,
                client_secret: required("SPOTIFY_CLIENT_SECRET")?,
                redirect_uri: non_empty("SPOTIFY_REDIRECT_URI")
                    .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
            },
            refresh_token: non_empty("SPOTIFY_REFRESH_TOKEN"),
            port,
            accounts_url: non_empty("SPOTIFY_ACCOUNTS_URL")
                .unwrap_or_else(|| DEFAULT_ACCOUNTS_URL.to_string()),
            api_url: non_empty("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        })
    }

    pub fn authorize_url(&self) -> String {
        format!("{}/authorize", self.accounts_url.trim_end_matches('/'))
    }

    pub fn token_url(&self) -> String {
        format!("{}/api/token", self.accounts_url.trim_end_matches('/'))
    }

    pub fn server_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

//! # API Module
//!
//! HTTP handlers of the backend, built on [Axum](https://docs.rs/axum).
//!
//! ## Endpoints
//!
//! ### Authorization flow (HTML)
//!
//! - [`login`] - `GET /auth/login`, page with a clickable authorization URL
//! - [`login_auto`] - `GET /auth/login-auto`, 302 to Spotify's consent page
//! - [`callback`] - `GET /auth/callback`, exchanges the code for tokens and
//!   shows them so the operator can store the refresh token
//! - [`refresh_token`] - `GET /auth/refresh_token`, refreshes a given token
//! - [`test`] - `GET /auth/test`, configuration diagnostics
//!
//! ### Playback (JSON)
//!
//! - [`snapshot`] - `GET /spotify`, `{nowPlaying, topTracks}`
//! - [`play`] - `POST /spotify/play`, body `{uri}`
//! - [`pause`] - `POST /spotify/pause`
//!
//! ### Monitoring
//!
//! - [`root`] - `GET /`, liveness text
//! - [`health`] - `GET /health`, status and version
//!
//! Failures never escape a handler: authorization errors become an HTML page,
//! playback errors a JSON `{error}` body, each with the matching status code.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use spotremote::{config::Config, server::{AppState, router}};
//!
//! let config = Config::from_env()?;
//! let app = router(AppState::from_config(&config)?);
//! ```

mod callback;
mod health;
mod login;
pub mod pages;
mod playback;

pub use callback::{callback, refresh_token};
pub use health::{health, root};
pub use login::{login, login_auto, test};
pub use playback::{NO_ACTIVE_DEVICE_MESSAGE, NOT_CONFIGURED_MESSAGE, pause, play, snapshot};

//! Spotify Remote Backend Library
//!
//! This library mediates between a client application and the Spotify Web API.
//! It runs the OAuth 2.0 authorization-code flow once to obtain a refresh token,
//! derives a fresh access token for every request and forwards a handful of
//! playback commands (now playing, top tracks, play, pause).
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the authorization flow and the playback routes
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration loading from environment variables and `.env`
//! - `error` - Error taxonomy shared by every layer
//! - `management` - Token lifecycle, issued login states and the playback facade
//! - `server` - Router assembly and the HTTP listener
//! - `spotify` - Spotify capability trait, its reqwest client and the auth flow
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotremote::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> spotremote::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     server::start_api_server(config).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::Error;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the outer edges of the application (CLI commands, server startup)
/// where different error types meet. Library code returns [`Error`] instead.
///
/// # Example
///
/// ```
/// use spotremote::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// The macro accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// info!("Starting authorization flow...");
/// info!("Listening on port {}", port);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Playback paused");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for fatal errors at startup (missing credentials, unbindable
/// port). Request handlers never call it.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("SPOTIFY_REFRESH_TOKEN is not set, playback routes are disabled");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

//! # CLI Module
//!
//! Command-line front-end of spotremote. It either runs the HTTP backend or
//! drives the playback facade directly from a terminal, using the same
//! configuration and the same Spotify client as the server.
//!
//! ## Commands
//!
//! - [`serve`] - Run the HTTP backend
//! - [`auth`] - Run the backend and open the authorization page in a browser
//! - [`now`] - Show the track currently playing
//! - [`top`] - Show the user's top tracks as a table
//! - [`play`] - Start playing a track URI on the active device
//! - [`pause`] - Pause playback
//!
//! ## Usage Patterns
//!
//! ### Onboarding
//! ```bash
//! spotremote auth                 # authorize and copy the refresh token
//! echo SPOTIFY_REFRESH_TOKEN=... >> .env
//! ```
//!
//! ### Regular Usage
//! ```bash
//! spotremote serve                # start the backend
//! spotremote top --limit 20       # top tracks from the terminal
//! spotremote play spotify:track:4uLU6hMCjMI75M1A2tKUQC
//! ```
//!
//! Fatal problems (missing credentials, no refresh token) terminate with the
//! `error!` macro; everything else is reported and the command returns.

mod auth;
mod player;

use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config::Config,
    error,
    management::{PlaybackManager, TokenManager},
    spotify::{SpotifyApi, SpotifyClient},
};

pub use auth::auth;
pub use auth::serve;
pub use player::now;
pub use player::pause;
pub use player::play;
pub use player::top;

fn playback_manager(config: &Config) -> PlaybackManager {
    let Some(refresh_token) = config.refresh_token.clone() else {
        error!("SPOTIFY_REFRESH_TOKEN is not set. Run spotremote auth first.");
    };

    let api: Arc<dyn SpotifyApi> = Arc::new(SpotifyClient::new(config));
    match TokenManager::new(Arc::clone(&api), refresh_token) {
        Ok(tokens) => PlaybackManager::new(api, tokens),
        Err(e) => error!("{}", e),
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

mod auth;
mod playback;
mod state;

pub use auth::TokenManager;
pub use playback::MAX_TOP_TRACKS;
pub use playback::PlaybackManager;
pub use playback::SNAPSHOT_TOP_TRACKS;
pub use state::MAX_PENDING_STATES;
pub use state::STATE_TTL;
pub use state::StateManager;

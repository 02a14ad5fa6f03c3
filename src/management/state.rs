use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use tokio::sync::Mutex;
use tracing::debug;

/// How long an issued login state stays acceptable.
pub const STATE_TTL: Duration = Duration::from_secs(600);

/// Upper bound on login states awaiting their callback.
pub const MAX_PENDING_STATES: usize = 1024;

/// Keeps the login states handed out by the authorization flow until the
/// matching callback consumes them.
///
/// A state is accepted once. Entries older than the TTL are rejected and
/// swept whenever a new state is issued. Past `capacity` pending states the
/// oldest one is evicted.
#[derive(Debug)]
pub struct StateManager {
    ttl: Duration,
    capacity: usize,
    issued: Mutex<HashMap<String, Instant>>,
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new(STATE_TTL)
    }
}

impl StateManager {
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, MAX_PENDING_STATES)
    }

    pub fn with_capacity(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity: capacity.max(1),
            issued: Mutex::new(HashMap::new()),
        }
    }

    pub async fn add(&self, state: String) {
        let mut issued = self.issued.lock().await;
        let ttl = self.ttl;
        issued.retain(|_, at| at.elapsed() < ttl);

        while issued.len() >= self.capacity {
            let Some(oldest) = issued
                .iter()
                .min_by_key(|(_, at)| **at)
                .map(|(state, _)| state.clone())
            else {
                break;
            };
            debug!("evicting oldest pending login state");
            issued.remove(&oldest);
        }

        issued.insert(state, Instant::now());
    }

    /// Removes `state` and reports whether it was issued and is still fresh.
    pub async fn consume(&self, state: &str) -> bool {
        let mut issued = self.issued.lock().await;
        match issued.remove(state) {
            Some(at) if at.elapsed() < self.ttl => true,
            Some(_) => {
                debug!("login state expired");
                false
            }
            None => false,
        }
    }

    pub async fn has(&self, state: &str) -> bool {
        self.issued.lock().await.contains_key(state)
    }

    pub async fn len(&self) -> usize {
        self.issued.lock().await.len()
    }
}

//! In-memory session store keyed by an opaque cookie token.
//!
//! ARCHITECTURE
//! ============
//! A session ties the browser cookie to the Spotify user and their OAuth
//! tokens. Sessions live only in process memory and vanish on restart; users
//! simply sign in again.
//!
//! TRADE-OFFS
//! ==========
//! Expiry is enforced on lookup and by an hourly sweep, so an abandoned
//! session may occupy memory for up to an hour past its maximum age.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use client::net::types::User;
use rand::Rng;
use tokio::sync::RwLock;

use super::spotify::SpotifyTokens;

/// Sessions older than this are treated as signed out.
pub const SESSION_MAX_AGE: Duration = Duration::from_secs(60 * 60 * 24 * 30);
const PRUNE_INTERVAL: Duration = Duration::from_secs(60 * 60);

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub tokens: SpotifyTokens,
    pub created_at: Instant,
}

impl Session {
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.created_at) >= SESSION_MAX_AGE
    }
}

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session for `user`, returning its cookie token.
    pub async fn create(&self, user: User, tokens: SpotifyTokens) -> String {
        self.create_at(user, tokens, Instant::now()).await
    }

    pub(crate) async fn create_at(&self, user: User, tokens: SpotifyTokens, now: Instant) -> String {
        let token = generate_token();
        let session = Session { user, tokens, created_at: now };
        self.sessions.write().await.insert(token.clone(), session);
        token
    }

    /// Look up a live session. Expired sessions are removed and reported absent.
    pub async fn get(&self, token: &str) -> Option<Session> {
        self.get_at(token, Instant::now()).await
    }

    pub(crate) async fn get_at(&self, token: &str, now: Instant) -> Option<Session> {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                Some(session) if !session.is_expired(now) => return Some(session.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        self.sessions.write().await.remove(token);
        None
    }

    /// Replace the OAuth tokens of an existing session.
    pub async fn update_tokens(&self, token: &str, tokens: SpotifyTokens) -> bool {
        match self.sessions.write().await.get_mut(token) {
            Some(session) => {
                session.tokens = tokens;
                true
            }
            None => false,
        }
    }

    pub async fn remove(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Drop every expired session, returning how many were removed.
    pub async fn prune_expired(&self, now: Instant) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now));
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// Spawn the background task that sweeps expired sessions.
pub fn spawn_prune_task(store: SessionStore) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PRUNE_INTERVAL);
        loop {
            interval.tick().await;
            let removed = store.prune_expired(Instant::now()).await;
            if removed > 0 {
                tracing::info!(removed, "pruned expired sessions");
            }
        }
    })
}

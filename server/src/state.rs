//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the Spotify API client behind a trait object and the in-memory
//! session store.

use std::sync::Arc;

use crate::services::session::SessionStore;
use crate::services::spotify::SpotifyApi;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Copy.
#[derive(Clone)]
pub struct AppState {
    pub spotify: Arc<dyn SpotifyApi>,
    pub sessions: SessionStore,
    /// Whether auth cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
}

impl AppState {
    #[must_use]
    pub fn new(spotify: Arc<dyn SpotifyApi>, cookie_secure: bool) -> Self {
        Self { spotify, sessions: SessionStore::new(), cookie_secure }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

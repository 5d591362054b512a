//! Saved-album routes.
//!
//! ERROR HANDLING
//! ==============
//! Upstream failures are logged and collapse to a status code. A refresh
//! token that Spotify refuses ends the session, so the client is sent back to
//! sign-in rather than retrying forever.

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use client::net::types::Album;

use super::auth::AuthSession;
use crate::services::spotify::SpotifyError;
use crate::state::AppState;

/// Map a Spotify failure onto the status returned to the browser.
pub(crate) fn spotify_error_to_status(error: &SpotifyError) -> StatusCode {
    match error {
        SpotifyError::Api { status: 401, .. } => StatusCode::UNAUTHORIZED,
        SpotifyError::Api { status: 429, .. } => StatusCode::TOO_MANY_REQUESTS,
        _ => StatusCode::BAD_GATEWAY,
    }
}

/// Return a usable access token, refreshing and storing new tokens when the
/// current one has expired.
pub(crate) async fn fresh_access_token(
    state: &AppState,
    auth: &AuthSession,
    now: Instant,
) -> Result<String, StatusCode> {
    let tokens = &auth.session.tokens;
    if !tokens.is_expired(now) {
        return Ok(tokens.access_token.clone());
    }

    // A concurrent request may already have refreshed this session. Refreshes
    // that still overlap each call Spotify and the last stored tokens win;
    // both stay valid while Spotify keeps the refresh token stable.
    if let Some(current) = state.sessions.get(&auth.token).await {
        if !current.tokens.is_expired(now) {
            return Ok(current.tokens.access_token);
        }
    }

    match state.spotify.refresh(&tokens.refresh_token).await {
        Ok(refreshed) => {
            let access = refreshed.access_token.clone();
            state.sessions.update_tokens(&auth.token, refreshed).await;
            tracing::debug!(user = %auth.session.user.id, "refreshed spotify access token");
            Ok(access)
        }
        Err(SpotifyError::Api { status: 400 | 401, .. }) => {
            tracing::info!(user = %auth.session.user.id, "spotify refresh token revoked, ending session");
            state.sessions.remove(&auth.token).await;
            Err(StatusCode::UNAUTHORIZED)
        }
        Err(e) => {
            tracing::error!(error = %e, "spotify token refresh failed");
            Err(StatusCode::BAD_GATEWAY)
        }
    }
}

/// `GET /api/albums`: every saved album of the signed-in user.
pub async fn list_albums(State(state): State<AppState>, auth: AuthSession) -> Result<Json<Vec<Album>>, StatusCode> {
    let access_token = fresh_access_token(&state, &auth, Instant::now()).await?;

    let albums = state.spotify.saved_albums(&access_token).await.map_err(|e| {
        tracing::error!(error = %e, user = %auth.session.user.id, "saved albums fetch failed");
        spotify_error_to_status(&e)
    })?;

    Ok(Json(albums))
}

#[cfg(test)]
#[path = "albums_test.rs"]
mod tests;

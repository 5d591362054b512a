//! Auth routes for the Spotify OAuth flow and session management.

use axum::extract::{FromRef, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use client::net::types::User;
use serde::Deserialize;
use time::Duration;

use crate::services::session::{self, SESSION_MAX_AGE, Session};
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";
pub(crate) const OAUTH_STATE_COOKIE_NAME: &str = "oauth_state";

pub(crate) fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::seconds_f64(SESSION_MAX_AGE.as_secs_f64()))
        .build()
}

pub(crate) fn oauth_state_cookie(state: String, secure: bool) -> Cookie<'static> {
    Cookie::build((OAUTH_STATE_COOKIE_NAME, state))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::minutes(10))
        .build()
}

pub(crate) fn expired_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

/// CSRF check: the callback `state` must equal the cookie set at redirect time.
pub(crate) fn oauth_state_matches(expected: Option<&str>, received: Option<&str>) -> bool {
    match (expected, received) {
        (Some(expected), Some(received)) => !expected.is_empty() && expected == received,
        _ => false,
    }
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Signed-in session extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthSession {
    pub token: String,
    pub session: Session,
}

impl<S> axum::extract::FromRequestParts<S> for AuthSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        let app_state = AppState::from_ref(state);
        let session = app_state
            .sessions
            .get(token)
            .await
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Self { token: token.to_owned(), session })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /auth/spotify`: redirect to the Spotify authorization page.
pub async fn spotify_redirect(State(state): State<AppState>) -> Response {
    let oauth_state = session::generate_token();
    let url = match state.spotify.authorize_url(&oauth_state) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!(error = %e, "spotify authorize url failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Spotify sign-in unavailable").into_response();
        }
    };

    let jar = CookieJar::new().add(oauth_state_cookie(oauth_state, state.cookie_secure));
    (jar, Redirect::temporary(&url)).into_response()
}

#[derive(Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// `GET /auth/spotify/callback`: exchange code, create session, set cookie, redirect to `/`.
pub async fn spotify_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackQuery>,
) -> Response {
    let secure = state.cookie_secure;
    let expected_state = jar.get(OAUTH_STATE_COOKIE_NAME).map(|c| c.value().to_owned());
    let jar = jar.add(expired_cookie(OAUTH_STATE_COOKIE_NAME, secure));

    if let Some(error) = params.error.as_deref() {
        tracing::info!(%error, "spotify authorization declined");
        return (jar, Redirect::temporary("/login")).into_response();
    }

    if !oauth_state_matches(expected_state.as_deref(), params.state.as_deref()) {
        return (StatusCode::UNAUTHORIZED, jar, "invalid oauth state").into_response();
    }
    let Some(code) = params.code.as_deref() else {
        return (StatusCode::BAD_REQUEST, jar, "missing authorization code").into_response();
    };

    let tokens = match state.spotify.exchange_code(code).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "spotify code exchange failed");
            return (StatusCode::BAD_GATEWAY, "Spotify code exchange failed").into_response();
        }
    };

    let user = match state.spotify.current_user(&tokens.access_token).await {
        Ok(u) => u,
        Err(e) => {
            tracing::error!(error = %e, "spotify profile fetch failed");
            return (StatusCode::BAD_GATEWAY, "Failed to fetch Spotify profile").into_response();
        }
    };

    tracing::info!(user = %user.id, "spotify sign-in");
    let token = state.sessions.create(user, tokens).await;
    let jar = jar.add(session_cookie(token, secure));
    (jar, Redirect::temporary("/")).into_response()
}

/// `GET /api/auth/me`: return current user.
pub async fn me(auth: AuthSession) -> Json<User> {
    Json(auth.session.user)
}

/// `POST /api/auth/logout`: delete session, clear cookie.
pub async fn logout(State(state): State<AppState>, auth: AuthSession) -> impl IntoResponse {
    state.sessions.remove(&auth.token).await;
    let jar = CookieJar::new().add(expired_cookie(COOKIE_NAME, state.cookie_secure));
    (jar, StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

//! Spotify Web API client: OAuth code grant, token refresh, profile and
//! saved-album listing.
//!
//! Thin HTTP wrapper over the accounts and Web API endpoints. Response
//! parsing lives in pure functions so it is testable without a network.

#[cfg(test)]
#[path = "spotify_test.rs"]
mod spotify_test;

use std::time::{Duration, Instant};

use client::net::types::{Album, User};

use crate::config::SpotifyConfig;

/// Scopes requested at sign-in.
pub const SCOPES: &[&str] = &[
    "user-read-playback-state",
    "user-read-currently-playing",
    "user-read-email",
    "playlist-read-private",
    "playlist-modify-private",
    "user-library-read",
    "user-read-recently-played",
    "user-follow-read",
];

/// Maximum page size accepted by `GET /me/albums`.
pub const SAVED_ALBUMS_PAGE_LIMIT: u32 = 50;
/// Upper bound on followed `next` links, in case the API loops.
const MAX_SAVED_ALBUM_PAGES: usize = 200;
/// Treat access tokens as expired this long before Spotify does.
const EXPIRY_SKEW: Duration = Duration::from_secs(60);
const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum SpotifyError {
    #[error("spotify token exchange failed: {0}")]
    TokenExchange(String),
    #[error("spotify request failed: {0}")]
    Request(String),
    #[error("spotify api error: status {status}")]
    Api { status: u16, body: String },
    #[error("spotify response parse failed: {0}")]
    Parse(String),
    #[error("spotify authorize url invalid: {0}")]
    AuthorizeUrl(String),
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// OAuth tokens for one signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotifyTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: Instant,
}

impl SpotifyTokens {
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now + EXPIRY_SKEW >= self.expires_at
    }
}

/// Build the Spotify authorization URL that starts the sign-in flow.
///
/// # Errors
///
/// Returns an error if the configured accounts base URL is not a valid URL.
pub fn authorize_url(config: &SpotifyConfig, state: &str) -> Result<String, SpotifyError> {
    let scope = SCOPES.join(" ");
    let url = reqwest::Url::parse_with_params(
        &format!("{}/authorize", config.accounts_base_url),
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("scope", scope.as_str()),
            ("state", state),
            ("show_dialog", "false"),
        ],
    )
    .map_err(|e| SpotifyError::AuthorizeUrl(e.to_string()))?;
    Ok(url.into())
}

// =============================================================================
// API SEAM
// =============================================================================

/// Spotify operations used by the HTTP routes.
#[async_trait::async_trait]
pub trait SpotifyApi: Send + Sync {
    /// Start URL for the OAuth flow.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be built.
    fn authorize_url(&self, state: &str) -> Result<String, SpotifyError>;

    /// Exchange an authorization code for tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Spotify rejects the code.
    async fn exchange_code(&self, code: &str) -> Result<SpotifyTokens, SpotifyError>;

    /// Obtain a fresh access token with a refresh token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the refresh token is revoked.
    async fn refresh(&self, refresh_token: &str) -> Result<SpotifyTokens, SpotifyError>;

    /// Fetch the profile of the token's owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    async fn current_user(&self, access_token: &str) -> Result<User, SpotifyError>;

    /// Fetch every saved album, in the order Spotify lists them.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails or is malformed.
    async fn saved_albums(&self, access_token: &str) -> Result<Vec<Album>, SpotifyError>;
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct SpotifyClient {
    http: reqwest::Client,
    config: SpotifyConfig,
}

impl SpotifyClient {
    /// Build a client with request/connect timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: SpotifyConfig) -> Result<Self, SpotifyError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| SpotifyError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    async fn token_request(&self, form: &[(&str, &str)], previous_refresh: Option<&str>) -> Result<SpotifyTokens, SpotifyError> {
        let response = self
            .http
            .post(format!("{}/api/token", self.config.accounts_base_url))
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(form)
            .send()
            .await
            .map_err(|e| SpotifyError::TokenExchange(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| SpotifyError::TokenExchange(e.to_string()))?;
        if status != 200 {
            return Err(SpotifyError::Api { status, body: text });
        }
        parse_token_response(&text, previous_refresh, Instant::now())
    }

    async fn get_json(&self, url: &str, access_token: &str) -> Result<String, SpotifyError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| SpotifyError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| SpotifyError::Request(e.to_string()))?;
        if status != 200 {
            return Err(SpotifyError::Api { status, body: text });
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl SpotifyApi for SpotifyClient {
    fn authorize_url(&self, state: &str) -> Result<String, SpotifyError> {
        authorize_url(&self.config, state)
    }

    async fn exchange_code(&self, code: &str) -> Result<SpotifyTokens, SpotifyError> {
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];
        self.token_request(&form, None).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<SpotifyTokens, SpotifyError> {
        let form = [("grant_type", "refresh_token"), ("refresh_token", refresh_token)];
        self.token_request(&form, Some(refresh_token)).await
    }

    async fn current_user(&self, access_token: &str) -> Result<User, SpotifyError> {
        let text = self
            .get_json(&format!("{}/me", self.config.api_base_url), access_token)
            .await?;
        parse_current_user(&text)
    }

    async fn saved_albums(&self, access_token: &str) -> Result<Vec<Album>, SpotifyError> {
        let mut albums = Vec::new();
        let mut next = Some(saved_albums_url(&self.config.api_base_url, 0));
        let mut pages = 0;

        while let Some(url) = next.take() {
            if pages == MAX_SAVED_ALBUM_PAGES {
                tracing::warn!(pages, "saved album pagination truncated");
                break;
            }
            let text = self.get_json(&url, access_token).await?;
            let page = parse_saved_albums_page(&text)?;
            albums.extend(page.albums);
            next = page.next;
            pages += 1;
        }

        tracing::debug!(count = albums.len(), pages, "fetched saved albums");
        Ok(albums)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
    refresh_token: Option<String>,
}

#[derive(serde::Deserialize)]
struct ProfileResponse {
    id: String,
    display_name: Option<String>,
    #[serde(default)]
    images: Vec<ImageObject>,
}

#[derive(serde::Deserialize)]
struct ImageObject {
    url: String,
}

#[derive(serde::Deserialize)]
struct SavedAlbumsResponse {
    items: Vec<SavedAlbumItem>,
    next: Option<String>,
}

#[derive(serde::Deserialize)]
struct SavedAlbumItem {
    album: AlbumObject,
}

#[derive(serde::Deserialize)]
struct AlbumObject {
    id: String,
    name: String,
    #[serde(default)]
    release_date: String,
    #[serde(default)]
    artists: Vec<ArtistObject>,
}

#[derive(serde::Deserialize)]
struct ArtistObject {
    name: String,
}

/// One page of `GET /me/albums`.
#[derive(Debug)]
pub struct SavedAlbumsPage {
    pub albums: Vec<Album>,
    pub next: Option<String>,
}

// =============================================================================
// PARSING
// =============================================================================

pub(crate) fn saved_albums_url(api_base_url: &str, offset: u32) -> String {
    format!("{api_base_url}/me/albums?limit={SAVED_ALBUMS_PAGE_LIMIT}&offset={offset}")
}

/// Parse a token endpoint body. Refresh responses may omit the refresh token,
/// in which case `previous_refresh` is kept.
pub(crate) fn parse_token_response(
    text: &str,
    previous_refresh: Option<&str>,
    now: Instant,
) -> Result<SpotifyTokens, SpotifyError> {
    let body: TokenResponse = serde_json::from_str(text).map_err(|e| SpotifyError::Parse(e.to_string()))?;
    let refresh_token = body
        .refresh_token
        .or_else(|| previous_refresh.map(str::to_owned))
        .ok_or_else(|| SpotifyError::TokenExchange("response carried no refresh token".to_owned()))?;
    Ok(SpotifyTokens {
        access_token: body.access_token,
        refresh_token,
        expires_at: now + Duration::from_secs(body.expires_in),
    })
}

pub(crate) fn parse_current_user(text: &str) -> Result<User, SpotifyError> {
    let body: ProfileResponse = serde_json::from_str(text).map_err(|e| SpotifyError::Parse(e.to_string()))?;
    let name = body
        .display_name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| body.id.clone());
    Ok(User { id: body.id, name, avatar_url: body.images.into_iter().next().map(|i| i.url) })
}

pub(crate) fn parse_saved_albums_page(text: &str) -> Result<SavedAlbumsPage, SpotifyError> {
    let body: SavedAlbumsResponse = serde_json::from_str(text).map_err(|e| SpotifyError::Parse(e.to_string()))?;
    let albums = body
        .items
        .into_iter()
        .map(|item| {
            let album = item.album;
            let artist = album
                .artists
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            Album { id: album.id, name: album.name, artist, release_date: album.release_date }
        })
        .collect();
    Ok(SavedAlbumsPage { albums, next: body.next })
}

use super::*;

fn test_config() -> SpotifyConfig {
    SpotifyConfig {
        client_id: "client-1".to_owned(),
        client_secret: "secret-1".to_owned(),
        redirect_uri: "http://localhost:3000/auth/spotify/callback".to_owned(),
        accounts_base_url: crate::config::DEFAULT_ACCOUNTS_BASE_URL.to_owned(),
        api_base_url: crate::config::DEFAULT_API_BASE_URL.to_owned(),
    }
}

// =============================================================================
// authorize_url
// =============================================================================

#[test]
fn authorize_url_carries_client_redirect_scopes_and_state() {
    let url = authorize_url(&test_config(), "abc123").unwrap();
    let parsed = reqwest::Url::parse(&url).unwrap();
    assert_eq!(parsed.host_str(), Some("accounts.spotify.com"));
    assert_eq!(parsed.path(), "/authorize");

    let params: std::collections::HashMap<_, _> = parsed.query_pairs().into_owned().collect();
    assert_eq!(params["client_id"], "client-1");
    assert_eq!(params["response_type"], "code");
    assert_eq!(params["redirect_uri"], "http://localhost:3000/auth/spotify/callback");
    assert_eq!(params["state"], "abc123");
    assert_eq!(params["scope"], SCOPES.join(" "));
}

#[test]
fn authorize_url_encodes_redirect_uri() {
    let url = authorize_url(&test_config(), "s").unwrap();
    assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fspotify%2Fcallback"));
}

#[test]
fn authorize_url_rejects_invalid_base() {
    let mut config = test_config();
    config.accounts_base_url = "not a url".to_owned();
    assert!(matches!(authorize_url(&config, "s"), Err(SpotifyError::AuthorizeUrl(_))));
}

#[test]
fn scopes_include_library_read() {
    assert!(SCOPES.contains(&"user-library-read"));
}

// =============================================================================
// tokens
// =============================================================================

#[test]
fn parse_token_response_computes_expiry() {
    let now = Instant::now();
    let tokens = parse_token_response(
        r#"{"access_token":"at","token_type":"Bearer","expires_in":3600,"refresh_token":"rt","scope":"user-library-read"}"#,
        None,
        now,
    )
    .unwrap();
    assert_eq!(tokens.access_token, "at");
    assert_eq!(tokens.refresh_token, "rt");
    assert_eq!(tokens.expires_at, now + Duration::from_secs(3600));
}

#[test]
fn refresh_response_without_refresh_token_keeps_previous() {
    let tokens =
        parse_token_response(r#"{"access_token":"at2","expires_in":3600}"#, Some("rt-old"), Instant::now()).unwrap();
    assert_eq!(tokens.refresh_token, "rt-old");
}

#[test]
fn code_grant_without_refresh_token_is_rejected() {
    let err = parse_token_response(r#"{"access_token":"at","expires_in":3600}"#, None, Instant::now()).unwrap_err();
    assert!(matches!(err, SpotifyError::TokenExchange(_)));
}

#[test]
fn malformed_token_body_is_parse_error() {
    let err = parse_token_response("<html>", None, Instant::now()).unwrap_err();
    assert!(matches!(err, SpotifyError::Parse(_)));
}

#[test]
fn tokens_expire_with_skew() {
    let now = Instant::now();
    let tokens = SpotifyTokens {
        access_token: "at".to_owned(),
        refresh_token: "rt".to_owned(),
        expires_at: now + Duration::from_secs(30),
    };
    assert!(tokens.is_expired(now));

    let fresh = SpotifyTokens { expires_at: now + Duration::from_secs(3600), ..tokens };
    assert!(!fresh.is_expired(now));
}

// =============================================================================
// profile
// =============================================================================

#[test]
fn parse_current_user_uses_display_name_and_first_image() {
    let user = parse_current_user(
        r#"{"id":"wizzler","display_name":"Wizzler","images":[{"url":"https://i.scdn.co/a.jpg","height":300,"width":300}]}"#,
    )
    .unwrap();
    assert_eq!(user.id, "wizzler");
    assert_eq!(user.name, "Wizzler");
    assert_eq!(user.avatar_url.as_deref(), Some("https://i.scdn.co/a.jpg"));
}

#[test]
fn parse_current_user_falls_back_to_id() {
    let user = parse_current_user(r#"{"id":"wizzler","display_name":null}"#).unwrap();
    assert_eq!(user.name, "wizzler");
    assert_eq!(user.avatar_url, None);
}

// =============================================================================
// saved albums
// =============================================================================

const SAVED_ALBUMS_PAGE: &str = r#"{
    "href": "https://api.spotify.com/v1/me/albums?offset=0&limit=50",
    "limit": 50,
    "offset": 0,
    "total": 51,
    "next": "https://api.spotify.com/v1/me/albums?offset=50&limit=50",
    "previous": null,
    "items": [
        {
            "added_at": "2022-03-01T10:00:00Z",
            "album": {
                "id": "2noRn2Aes5aoNVsU6iWThc",
                "name": "Discovery",
                "release_date": "2001-03-12",
                "album_type": "album",
                "artists": [{"id": "4tZwfgrHOc3mvqYlEYSvVi", "name": "Daft Punk"}]
            }
        },
        {
            "added_at": "2022-03-02T10:00:00Z",
            "album": {
                "id": "7dK54iZuOxXFarGhXwEXfF",
                "name": "Watch the Throne",
                "release_date": "2011",
                "artists": [{"name": "JAY-Z"}, {"name": "Kanye West"}]
            }
        }
    ]
}"#;

#[test]
fn parse_saved_albums_page_maps_albums_in_order() {
    let page = parse_saved_albums_page(SAVED_ALBUMS_PAGE).unwrap();
    assert_eq!(page.albums.len(), 2);
    assert_eq!(page.albums[0].id, "2noRn2Aes5aoNVsU6iWThc");
    assert_eq!(page.albums[0].name, "Discovery");
    assert_eq!(page.albums[0].artist, "Daft Punk");
    assert_eq!(page.albums[0].release_date, "2001-03-12");
    assert_eq!(page.albums[1].artist, "JAY-Z, Kanye West");
    assert_eq!(page.albums[1].release_date, "2011");
}

#[test]
fn parse_saved_albums_page_reports_next_link() {
    let page = parse_saved_albums_page(SAVED_ALBUMS_PAGE).unwrap();
    assert_eq!(page.next.as_deref(), Some("https://api.spotify.com/v1/me/albums?offset=50&limit=50"));

    let last = parse_saved_albums_page(r#"{"items":[],"next":null}"#).unwrap();
    assert!(last.albums.is_empty());
    assert!(last.next.is_none());
}

#[test]
fn saved_albums_url_uses_page_limit() {
    assert_eq!(
        saved_albums_url("https://api.spotify.com/v1", 0),
        "https://api.spotify.com/v1/me/albums?limit=50&offset=0"
    );
}

use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

const REQUIRED: [(&str, &str); 3] = [
    ("SPOTIFY_CLIENT_ID", "id123"),
    ("SPOTIFY_CLIENT_SECRET", "secret456"),
    ("SPOTIFY_REDIRECT_URI", "http://localhost:3000/auth/spotify/callback"),
];

// =============================================================================
// parse_bool
// =============================================================================

#[test]
fn parse_bool_true_variants() {
    for val in ["1", "true", "yes", "on", "TRUE", "  On  "] {
        assert_eq!(parse_bool(val), Some(true), "expected true for {val:?}");
    }
}

#[test]
fn parse_bool_false_variants() {
    for val in ["0", "false", "no", "off", "False"] {
        assert_eq!(parse_bool(val), Some(false), "expected false for {val:?}");
    }
}

#[test]
fn parse_bool_invalid_returns_none() {
    assert_eq!(parse_bool("maybe"), None);
    assert_eq!(parse_bool(""), None);
}

// =============================================================================
// ServerConfig::from_lookup
// =============================================================================

#[test]
fn required_vars_with_defaults() {
    let config = ServerConfig::from_lookup(lookup_from(&REQUIRED)).unwrap();
    assert_eq!(config.port, DEFAULT_PORT);
    assert!(!config.cookie_secure);
    assert_eq!(config.spotify.client_id, "id123");
    assert_eq!(config.spotify.client_secret, "secret456");
    assert_eq!(config.spotify.accounts_base_url, DEFAULT_ACCOUNTS_BASE_URL);
    assert_eq!(config.spotify.api_base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn each_missing_spotify_var_is_named() {
    for (i, (missing, _)) in REQUIRED.iter().enumerate() {
        let pairs: Vec<_> = REQUIRED
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, pair)| *pair)
            .collect();
        let err = ServerConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert_eq!(err, ConfigError::Missing(*missing));
    }
}

#[test]
fn blank_required_var_counts_as_missing() {
    let mut pairs = REQUIRED.to_vec();
    pairs[0] = ("SPOTIFY_CLIENT_ID", "   ");
    let err = ServerConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
    assert_eq!(err, ConfigError::Missing("SPOTIFY_CLIENT_ID"));
}

#[test]
fn https_redirect_implies_secure_cookies() {
    let mut pairs = REQUIRED.to_vec();
    pairs[2] = ("SPOTIFY_REDIRECT_URI", "https://albums.example.com/auth/spotify/callback");
    let config = ServerConfig::from_lookup(lookup_from(&pairs)).unwrap();
    assert!(config.cookie_secure);
}

#[test]
fn explicit_cookie_secure_overrides_redirect_scheme() {
    let mut pairs = REQUIRED.to_vec();
    pairs.push(("COOKIE_SECURE", "yes"));
    let config = ServerConfig::from_lookup(lookup_from(&pairs)).unwrap();
    assert!(config.cookie_secure);
}

#[test]
fn invalid_cookie_secure_is_rejected() {
    let mut pairs = REQUIRED.to_vec();
    pairs.push(("COOKIE_SECURE", "sometimes"));
    let err = ServerConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { var: "COOKIE_SECURE", value: "sometimes".to_owned() });
}

#[test]
fn port_is_parsed_and_validated() {
    let mut pairs = REQUIRED.to_vec();
    pairs.push(("PORT", "8080"));
    assert_eq!(ServerConfig::from_lookup(lookup_from(&pairs)).unwrap().port, 8080);

    let mut bad = REQUIRED.to_vec();
    bad.push(("PORT", "eighty"));
    let err = ServerConfig::from_lookup(lookup_from(&bad)).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { var: "PORT", value: "eighty".to_owned() });
}

#[test]
fn base_urls_are_trimmed_of_trailing_slash() {
    let mut pairs = REQUIRED.to_vec();
    pairs.push(("SPOTIFY_API_BASE_URL", "http://127.0.0.1:9000/v1/"));
    let config = ServerConfig::from_lookup(lookup_from(&pairs)).unwrap();
    assert_eq!(config.spotify.api_base_url, "http://127.0.0.1:9000/v1");
}

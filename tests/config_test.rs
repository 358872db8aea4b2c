use std::collections::HashMap;

use mockito::{Matcher, Server};
use playlog::config::{AuthConfig, Config, DEFAULT_API_URL, DEFAULT_TABLE};
use playlog::error::EtlError;
use playlog::spotify;
use reqwest::Client;

// Helper function to create a complete key-value configuration
fn create_test_vars() -> HashMap<String, String> {
    [
        ("CLIENT_ID", "id"),
        ("CLIENT_SECRET", "secret"),
        ("REFRESH_TOKEN", "refresh"),
        ("USERNAME", "user"),
        ("PASSWORD", "pass"),
        ("HOST", "db.local"),
        ("PORT", "5432"),
        ("DATABASE", "music"),
        ("SPOTIFY_API_REDIRECT_URI", "http://localhost:8888/callback"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn config_from(vars: &HashMap<String, String>) -> Result<Config, EtlError> {
    Config::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_config_defaults() {
    let config = config_from(&create_test_vars()).unwrap();

    assert_eq!(config.credentials.client_id, "id");
    assert_eq!(config.refresh_token, "refresh");
    assert_eq!(config.endpoints.api_url, DEFAULT_API_URL);
    assert_eq!(config.timezone, chrono_tz::US::Central);
    assert_eq!(config.database.port, 5432);
    assert_eq!(config.database.table, DEFAULT_TABLE);
}

#[test]
fn test_config_missing_key() {
    let mut vars = create_test_vars();
    vars.remove("REFRESH_TOKEN");

    match config_from(&vars) {
        Err(EtlError::MissingConfig(key)) => assert_eq!(key, "REFRESH_TOKEN"),
        other => panic!("expected MissingConfig, got {:?}", other),
    }

    // Blank values count as missing
    let mut vars = create_test_vars();
    vars.insert("CLIENT_SECRET".to_string(), "  ".to_string());
    assert!(matches!(config_from(&vars), Err(EtlError::MissingConfig(_))));
}

#[test]
fn test_config_invalid_values() {
    let mut vars = create_test_vars();
    vars.insert("PORT".to_string(), "postgres".to_string());
    assert!(matches!(
        config_from(&vars),
        Err(EtlError::InvalidConfig { ref key, .. }) if key == "PORT"
    ));

    let mut vars = create_test_vars();
    vars.insert("LOCAL_TIMEZONE".to_string(), "Mars/Olympus".to_string());
    assert!(matches!(
        config_from(&vars),
        Err(EtlError::InvalidConfig { ref key, .. }) if key == "LOCAL_TIMEZONE"
    ));

    let mut vars = create_test_vars();
    vars.insert("DB_TABLE".to_string(), "plays; --".to_string());
    assert!(matches!(
        config_from(&vars),
        Err(EtlError::InvalidConfig { ref key, .. }) if key == "DB_TABLE"
    ));
}

#[test]
fn test_config_overrides() {
    let mut vars = create_test_vars();
    vars.insert("SPOTIFY_API_URL".to_string(), "http://127.0.0.1:9000/".to_string());
    vars.insert("LOCAL_TIMEZONE".to_string(), "Europe/Berlin".to_string());
    vars.insert("DB_TABLE".to_string(), "music.plays".to_string());

    let config = config_from(&vars).unwrap();

    // Trailing slash is dropped so paths can be appended
    assert_eq!(config.endpoints.api_url, "http://127.0.0.1:9000");
    assert_eq!(config.timezone, chrono_tz::Europe::Berlin);
    assert_eq!(config.database.table, "music.plays");
}

#[test]
fn test_authorization_url() {
    let vars = create_test_vars();
    let config = AuthConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();

    let url = spotify::auth::authorization_url(&config).unwrap();

    assert!(url.starts_with("https://accounts.spotify.com/authorize?"));
    assert!(url.contains("client_id=id"));
    assert!(url.contains("response_type=code"));
    assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8888%2Fcallback"));
    assert!(url.contains("scope=user-read-recently-played"));
}

#[tokio::test]
async fn test_exchange_authorization_code() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/token")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
            Matcher::UrlEncoded("code".into(), "the-code".into()),
            Matcher::UrlEncoded(
                "redirect_uri".into(),
                "http://localhost:8888/callback".into(),
            ),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token": "a", "refresh_token": "long-lived", "expires_in": 3600}"#)
        .create_async()
        .await;

    let mut vars = create_test_vars();
    vars.insert("SPOTIFY_API_TOKEN_URL".to_string(), format!("{}/api/token", server.url()));
    let config = AuthConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();

    let refresh_token = spotify::auth::exchange_authorization_code(&Client::new(), &config, "the-code")
        .await
        .unwrap();

    assert_eq!(refresh_token, "long-lived");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_exchange_authorization_code_without_refresh_token() {
    let mut server = Server::new_async().await;
    let _token = server
        .mock("POST", "/api/token")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "invalid_grant"}"#)
        .create_async()
        .await;

    let mut vars = create_test_vars();
    vars.insert("SPOTIFY_API_TOKEN_URL".to_string(), format!("{}/api/token", server.url()));
    let config = AuthConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();

    let result = spotify::auth::exchange_authorization_code(&Client::new(), &config, "used").await;
    assert!(matches!(
        result,
        Err(EtlError::MissingRefreshToken(Some(ref detail))) if detail == "invalid_grant"
    ));
}

use reqwest::{Client, Url, header::AUTHORIZATION};

use crate::{
    Res,
    config::{AuthConfig, Credentials, Endpoints},
    error::EtlError,
    types::TokenResponse,
    utils,
};

/// Scope required to read the listening history.
pub const SCOPE: &str = "user-read-recently-played";

/// Exchanges the stored refresh token for a short-lived access token.
///
/// Sends a `refresh_token` grant to the token endpoint, authenticated with a
/// `Basic` header built from the client id and secret. The response status is
/// not checked on its own: Spotify answers failed grants with a JSON body
/// carrying `error` / `error_description`, and the absence of `access_token`
/// is what decides the outcome.
///
/// # Arguments
///
/// * `client` - Shared HTTP client of the run
/// * `credentials` - Spotify application credentials
/// * `endpoints` - Spotify base URLs (only the token URL is used)
/// * `refresh_token` - Long-lived refresh token obtained by the setup flow
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(String)` - The access token
/// - `Err(EtlError::MissingAccessToken)` - The response had no access token
/// - `Err(EtlError::Request)` - Network error or a body that is not JSON
///
/// # Retry Behavior
///
/// No retry is attempted. A failed exchange aborts the run and the external
/// scheduler decides whether to re-run it.
///
/// # Example
///
/// ```
/// let client = reqwest::Client::new();
/// let token = refresh_access_token(&client, &config.credentials, &config.endpoints, &config.refresh_token).await?;
/// ```
pub async fn refresh_access_token(
    client: &Client,
    credentials: &Credentials,
    endpoints: &Endpoints,
    refresh_token: &str,
) -> Res<String> {
    let res = client
        .post(&endpoints.token_url)
        .header(
            AUTHORIZATION,
            utils::basic_auth_header(&credentials.client_id, &credentials.client_secret),
        )
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", credentials.client_id.as_str()),
        ])
        .send()
        .await?;

    let token: TokenResponse = res.json().await?;

    match token.access_token.as_deref() {
        Some(access_token) if !access_token.is_empty() => Ok(access_token.to_string()),
        _ => Err(EtlError::MissingAccessToken(token.error_detail())),
    }
}

/// Builds the URL a human visits once to authorize the application.
///
/// After granting access, Spotify redirects to the configured redirect URI
/// with a `code` query parameter. That code is handed to
/// [`exchange_authorization_code`].
pub fn authorization_url(config: &AuthConfig) -> Res<String> {
    let url = Url::parse_with_params(
        &config.endpoints.auth_url,
        &[
            ("client_id", config.credentials.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("scope", SCOPE),
        ],
    )
    .map_err(|e| EtlError::InvalidConfig {
        key: "SPOTIFY_API_AUTH_URL".to_string(),
        message: e.to_string(),
    })?;

    Ok(url.to_string())
}

/// Exchanges a one-time authorization code for the long-lived refresh token.
///
/// This is the final step of the setup flow. The returned refresh token is
/// what the recurring job reads from `REFRESH_TOKEN`.
///
/// # Errors
///
/// - `EtlError::MissingRefreshToken` if the response carries no refresh token,
///   typically because the code was already used or has expired
/// - `EtlError::Request` for network errors or a non-JSON body
pub async fn exchange_authorization_code(
    client: &Client,
    config: &AuthConfig,
    code: &str,
) -> Res<String> {
    let credentials = &config.credentials;
    let res = client
        .post(&config.endpoints.token_url)
        .header(
            AUTHORIZATION,
            utils::basic_auth_header(&credentials.client_id, &credentials.client_secret),
        )
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
        ])
        .send()
        .await?;

    let token: TokenResponse = res.json().await?;

    match token.refresh_token.as_deref() {
        Some(refresh_token) if !refresh_token.is_empty() => Ok(refresh_token.to_string()),
        _ => Err(EtlError::MissingRefreshToken(token.error_detail())),
    }
}

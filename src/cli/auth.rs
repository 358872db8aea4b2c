use reqwest::Client;

use crate::{config::AuthConfig, error, info, spotify, success, warning};

/// Prints the authorization URL and tries to open it in the default browser.
pub fn auth_url(config: &AuthConfig) {
    let url = match spotify::auth::authorization_url(config) {
        Ok(url) => url,
        Err(e) => error!("Cannot build authorization URL: {}", e),
    };

    info!("Authorize the application, then copy the `code` parameter from the redirect:");
    println!("{}", url);

    if webbrowser::open(&url).is_err() {
        warning!("Failed to open browser. Please navigate to the URL above manually.");
    }
}

/// Exchanges an authorization code and prints the resulting refresh token.
pub async fn auth_exchange(config: &AuthConfig, code: &str) {
    let client = Client::new();
    match spotify::auth::exchange_authorization_code(&client, config, code).await {
        Ok(refresh_token) => {
            success!("Store the following value as REFRESH_TOKEN:");
            println!("{}", refresh_token);
        }
        Err(e) => error!("Authorization code exchange failed: {}", e),
    }
}

use chrono::Utc;
use reqwest::Client;

use crate::{
    Res, config::Endpoints, error::EtlError, success, types::RecentlyPlayedResponse, utils,
};

/// Hours of history requested on every run.
pub const LOOKBACK_HOURS: i64 = 12;

/// Maximum page size accepted by the recently played endpoint.
pub const RECENTLY_PLAYED_LIMIT: u32 = 50;

/// Retrieves the tracks played during the last [`LOOKBACK_HOURS`].
///
/// Issues a single authenticated request to `/me/player/recently-played`
/// with `limit=50` and `after` set to the lower bound of the lookback window
/// in milliseconds since the epoch. Only one page is fetched: when more than
/// 50 tracks were played inside the window, the oldest ones are not returned.
///
/// # Arguments
///
/// * `client` - Shared HTTP client of the run
/// * `endpoints` - Spotify base URLs (only the API URL is used)
/// * `token` - Valid access token
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(RecentlyPlayedResponse)` - The raw response, `items` possibly empty
/// - `Err(EtlError::Request)` - Network error or non-success status
/// - `Err(EtlError::Parse)` - The body has no `items` list
///
/// # Example
///
/// ```
/// let raw = recently_played(&client, &config.endpoints, &token).await?;
/// ```
pub async fn recently_played(
    client: &Client,
    endpoints: &Endpoints,
    token: &str,
) -> Res<RecentlyPlayedResponse> {
    let api_url = format!("{uri}/me/player/recently-played", uri = endpoints.api_url);
    let after = utils::lookback_after_ms(Utc::now(), LOOKBACK_HOURS);

    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .query(&[
            ("limit", RECENTLY_PLAYED_LIMIT.to_string()),
            ("after", after.to_string()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let res = response.json::<RecentlyPlayedResponse>().await?;

    let count = match &res.items {
        Some(items) => items.len(),
        None => {
            return Err(EtlError::Parse {
                endpoint: api_url,
                message: "response has no `items` list".to_string(),
            });
        }
    };

    success!("Successfully extracted your last {} played tracks!", count);
    Ok(res)
}

use std::{collections::HashMap, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use crate::{Res, config::Endpoints, error::EtlError, types::ArtistResponse, warning};

/// Artist id to image URL. `None` marks a lookup that failed during this run.
pub type ArtistImageMap = HashMap<String, Option<String>>;

/// Fetches the first image URL of a single artist.
///
/// # Arguments
///
/// * `client` - Shared HTTP client of the run
/// * `endpoints` - Spotify base URLs (only the API URL is used)
/// * `token` - Valid access token
/// * `artist_id` - Spotify ID of the artist
///
/// # Errors
///
/// - `EtlError::Request` for network errors and non-success statuses
/// - `EtlError::Parse` when the artist has no `images` list or it is empty
pub async fn artist_image(
    client: &Client,
    endpoints: &Endpoints,
    token: &str,
    artist_id: &str,
) -> Res<String> {
    let api_url = format!("{uri}/artists/{id}", uri = endpoints.api_url, id = artist_id);

    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    let artist = response.json::<ArtistResponse>().await?;

    artist
        .images
        .and_then(|images| images.into_iter().next())
        .map(|image| image.url)
        .ok_or_else(|| EtlError::Parse {
            endpoint: api_url,
            message: "artist has no images".to_string(),
        })
}

/// Resolves image URLs for every given artist id.
///
/// Lookups run one after another, one request per id. A failed lookup is
/// reported as a warning and recorded as `None`, so the returned map always
/// contains every id of `artist_ids` and nothing is retried within the run.
/// Duplicate ids are looked up once.
///
/// # Progress Indication
///
/// Displays a spinner with the id currently being resolved. The spinner is
/// cleared before returning.
pub async fn resolve_artist_images(
    client: &Client,
    endpoints: &Endpoints,
    token: &str,
    artist_ids: &[String],
) -> ArtistImageMap {
    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let mut images = ArtistImageMap::with_capacity(artist_ids.len());
    for (i, artist_id) in artist_ids.iter().enumerate() {
        if images.contains_key(artist_id) {
            continue;
        }

        pb.set_message(format!(
            "Fetching artist images {}/{} ({})",
            i + 1,
            artist_ids.len(),
            artist_id
        ));

        let image = match artist_image(client, endpoints, token, artist_id).await {
            Ok(url) => Some(url),
            Err(e) => {
                pb.suspend(|| warning!("No image for artist {}: {}", artist_id, e));
                None
            }
        };
        images.insert(artist_id.clone(), image);
    }

    pb.finish_and_clear();
    images
}

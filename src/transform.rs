//! Reshapes raw play events into flat [`PlayRecord`] rows.
//!
//! Row construction ([`build_records`]) is pure and keeps the order of the
//! input. Enrichment runs afterwards: the distinct first-artist ids of the
//! batch are resolved through [`spotify::artists`] and joined back onto every
//! row by `artist_id`. [`transform`] only hands out enriched rows.

use chrono_tz::Tz;
use reqwest::Client;

use crate::{
    Res,
    config::Config,
    error::EtlError,
    info,
    spotify::{self, artists::ArtistImageMap},
    success,
    types::{PlayEvent, PlayRecord, RecentlyPlayedResponse},
    utils, warning,
};

/// Whether the event can be keyed: the track and its first artist carry a
/// catalog id. Local files report `null` ids.
pub fn is_identifiable(event: &PlayEvent) -> bool {
    let track = &event.track;
    track.id.is_some()
        && track
            .artists
            .first()
            .is_none_or(|artist| artist.id.is_some())
}

/// Flattens one play event. `artist_image` is left empty.
pub fn build_record(event: &PlayEvent, tz: &Tz) -> Res<PlayRecord> {
    let track = &event.track;
    let track_id = track
        .id
        .as_deref()
        .ok_or_else(|| EtlError::UnidentifiedTrack(track.name.clone()))?;
    let first_artist = track
        .artists
        .first()
        .ok_or_else(|| EtlError::NoArtists(track_id.to_string()))?;
    let artist_id = first_artist
        .id
        .clone()
        .ok_or_else(|| EtlError::UnidentifiedTrack(track.name.clone()))?;

    let artists = track
        .artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    Ok(PlayRecord {
        play_id: utils::build_play_id(track_id, &event.played_at),
        track_id: track_id.to_string(),
        track_name: track.name.clone(),
        track_length_seconds: utils::milliseconds_to_seconds(track.duration_ms),
        track_popularity: track.popularity,
        played_at: utils::format_local_time(&event.played_at, tz),
        context_type: event.context.as_ref().and_then(|c| c.context_type.clone()),
        album: track.album.name.clone(),
        album_cover: track.album.images.first().map(|image| image.url.clone()),
        album_type: track.album.album_type.clone(),
        album_release_date: track
            .album
            .release_date
            .as_deref()
            .and_then(utils::parse_release_date),
        artists,
        artist_id,
        artist_image: None,
    })
}

/// Flattens every play event in input order.
///
/// Plays without catalog ids (local files) are skipped with a warning; every
/// other event yields exactly one row.
pub fn build_records(items: &[PlayEvent], tz: &Tz) -> Res<Vec<PlayRecord>> {
    items
        .iter()
        .filter(|event| {
            let keep = is_identifiable(event);
            if !keep {
                warning!("Skipping local track {:?}: no catalog id", event.track.name);
            }
            keep
        })
        .map(|event| build_record(event, tz))
        .collect()
}

/// First-artist ids of the batch, deduplicated in first-seen order.
pub fn distinct_artist_ids(records: &[PlayRecord]) -> Vec<String> {
    utils::distinct(records.iter().map(|r| r.artist_id.as_str()))
}

/// Joins artist images onto the rows by `artist_id`.
pub fn attach_artist_images(records: &mut [PlayRecord], images: &ArtistImageMap) {
    for record in records.iter_mut() {
        record.artist_image = images.get(&record.artist_id).cloned().flatten();
    }
}

/// Turns the raw extraction result into enriched rows.
///
/// Returns `Ok(None)` when the response holds no items, or only local
/// files. Errors from row
/// construction abort the run; artist image failures never do.
///
/// # Arguments
///
/// * `client` - Shared HTTP client of the run
/// * `config` - Run configuration (local timezone and API endpoints)
/// * `token` - Valid access token used for the artist lookups
/// * `data` - Raw response of the extractor
pub async fn transform(
    client: &Client,
    config: &Config,
    token: &str,
    data: &RecentlyPlayedResponse,
) -> Res<Option<Vec<PlayRecord>>> {
    let items = match data.items.as_deref() {
        Some(items) if !items.is_empty() => items,
        _ => {
            info!("No data was present in the extract step.");
            return Ok(None);
        }
    };

    let mut records = build_records(items, &config.timezone)?;
    if records.is_empty() {
        info!("No catalog tracks were present in the extract step.");
        return Ok(None);
    }

    let artist_ids = distinct_artist_ids(&records);
    info!("Resolving images for {} artists", artist_ids.len());
    let images =
        spotify::artists::resolve_artist_images(client, &config.endpoints, token, &artist_ids)
            .await;
    attach_artist_images(&mut records, &images);

    success!("Successfully cleaned and transformed the data!");
    Ok(Some(records))
}

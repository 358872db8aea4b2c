use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleArtist {
    /// `null` for artists of local files.
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub name: String,
    #[serde(default)]
    pub album_type: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// `null` for local files, which have no catalog entry.
    pub id: Option<String>,
    pub name: String,
    pub duration_ms: u64,
    pub popularity: i32,
    pub album: Album,
    pub artists: Vec<SimpleArtist>,
    #[serde(default)]
    pub is_local: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayContext {
    #[serde(rename = "type")]
    pub context_type: Option<String>,
}

/// One entry of the recently played endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayEvent {
    pub track: Track,
    pub played_at: DateTime<Utc>,
    #[serde(default)]
    pub context: Option<PlayContext>,
}

/// Body of `GET /me/player/recently-played`.
///
/// `items` stays optional here so that an absent list can be told apart from
/// an empty one; the extractor rejects the former.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecentlyPlayedResponse {
    pub items: Option<Vec<PlayEvent>>,
    pub next: Option<String>,
}

/// Body of `GET /artists/{id}`, reduced to what the image lookup needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistResponse {
    pub id: Option<String>,
    pub images: Option<Vec<Image>>,
}

/// A flattened, enriched play event as stored in the destination table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayRecord {
    pub play_id: String,
    pub track_id: String,
    pub track_name: String,
    pub track_length_seconds: f64,
    pub track_popularity: i32,
    pub played_at: String,
    pub context_type: Option<String>,
    pub album: String,
    pub album_cover: Option<String>,
    pub album_type: Option<String>,
    pub album_release_date: Option<NaiveDate>,
    pub artists: String,
    pub artist_id: String,
    pub artist_image: Option<String>,
}

/// Column names of the destination table, in insert order.
pub const PLAY_RECORD_COLUMNS: [&str; 14] = [
    "play_id",
    "track_id",
    "track_name",
    "track_length_seconds",
    "track_popularity",
    "played_at",
    "context_type",
    "album",
    "album_cover",
    "album_type",
    "album_release_date",
    "artists",
    "artist_id",
    "artist_image",
];

#[derive(Tabled)]
pub struct PlayRecordTableRow {
    pub played_at: String,
    pub track: String,
    pub artists: String,
    pub album: String,
    pub length: String,
    pub image: String,
}

impl From<&PlayRecord> for PlayRecordTableRow {
    fn from(record: &PlayRecord) -> Self {
        PlayRecordTableRow {
            played_at: record.played_at.clone(),
            track: record.track_name.clone(),
            artists: record.artists.clone(),
            album: record.album.clone(),
            length: format!("{:.0}s", record.track_length_seconds),
            image: if record.artist_image.is_some() {
                "yes".to_string()
            } else {
                "-".to_string()
            },
        }
    }
}

/// Response of the token endpoint for both grant types used by the crate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl TokenResponse {
    /// Human readable error reported by the endpoint, if any.
    pub fn error_detail(&self) -> Option<String> {
        match (&self.error, &self.error_description) {
            (Some(e), Some(d)) => Some(format!("{}: {}", e, d)),
            (Some(e), None) => Some(e.clone()),
            (None, Some(d)) => Some(d.clone()),
            (None, None) => None,
        }
    }
}

//! Error types for the fatal stages of the pipeline.

use thiserror::Error;

/// Errors that abort a run.
///
/// Anything returned through this type is surfaced to the scheduler as a
/// failed run. Tolerated failures (artist image lookups, the final load) are
/// reported through their own result types and never become an `EtlError`.
#[derive(Debug, Error)]
pub enum EtlError {
    /// A required configuration key was not set.
    #[error("missing configuration value: {0}")]
    MissingConfig(String),

    /// A configuration key was set to a value that cannot be used.
    #[error("invalid configuration value for {key}: {message}")]
    InvalidConfig { key: String, message: String },

    /// The token endpoint answered without an access token.
    #[error("failed to retrieve the access token{}", detail_suffix(.0))]
    MissingAccessToken(Option<String>),

    /// The authorization code exchange answered without a refresh token.
    #[error("failed to retrieve the refresh token{}", detail_suffix(.0))]
    MissingRefreshToken(Option<String>),

    /// An error propagated from `reqwest`.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// A response body did not have the expected shape.
    #[error("unexpected response from {endpoint}: {message}")]
    Parse { endpoint: String, message: String },

    /// A play event referenced a track or first artist without a catalog id.
    #[error("track {0:?} has no catalog id")]
    UnidentifiedTrack(String),

    /// A play event referenced a track without any artist.
    #[error("track {0} has no artists")]
    NoArtists(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(d) => format!(" ({})", d),
        None => String::new(),
    }
}

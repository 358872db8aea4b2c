use std::collections::HashSet;

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

pub const PLAYED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const PLAY_ID_TIME_FORMAT: &str = "%Y-%m-%d_%H:%M:%S";

/// Earliest release date kept (year, month, day); older values are treated
/// as unparseable.
pub const MIN_RELEASE_DATE: (i32, u32, u32) = (1677, 9, 22);

/// `Basic` authorization header value for the token endpoint.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let encoded = STANDARD.encode(format!("{}:{}", client_id, client_secret));
    format!("Basic {}", encoded)
}

/// Millisecond epoch of `now - hours`, as expected by the `after` parameter.
pub fn lookback_after_ms(now: DateTime<Utc>, hours: i64) -> i64 {
    (now - Duration::hours(hours)).timestamp_millis()
}

pub fn build_play_id(track_id: &str, played_at: &DateTime<Utc>) -> String {
    format!("{}_{}", track_id, played_at.format(PLAY_ID_TIME_FORMAT))
}

pub fn format_local_time<Z: TimeZone>(played_at: &DateTime<Utc>, tz: &Z) -> String
where
    Z::Offset: std::fmt::Display,
{
    played_at
        .with_timezone(tz)
        .format(PLAYED_AT_FORMAT)
        .to_string()
}

/// Parses a Spotify release date.
///
/// Spotify reports dates with day, month or year precision (`2023-10-17`,
/// `2023-10`, `2023`). Coarser precisions resolve to the first day of the
/// period. Anything else yields `None`, as do placeholder years such as
/// `0000` and dates before [`MIN_RELEASE_DATE`].
pub fn parse_release_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d"))
        .ok()
        .or_else(|| {
            if value.len() == 4 && value.chars().all(|c| c.is_ascii_digit()) {
                value
                    .parse::<i32>()
                    .ok()
                    .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
            } else {
                None
            }
        })?;

    let (year, month, day) = MIN_RELEASE_DATE;
    let min = NaiveDate::from_ymd_opt(year, month, day)?;
    (date >= min).then_some(date)
}

pub fn milliseconds_to_seconds(ms: u64) -> f64 {
    ms as f64 / 1000.0
}

/// Keeps the first occurrence of every id, preserving order.
pub fn distinct<'a, I>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

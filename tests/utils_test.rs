use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::US::Central;
use playlog::config::is_valid_table_name;
use playlog::utils::*;

#[test]
fn test_basic_auth_header() {
    let header = basic_auth_header("my-client", "s3cret");

    // Should use the Basic scheme
    assert!(header.starts_with("Basic "));

    // Payload should decode back to id:secret
    let decoded = STANDARD.decode(header.trim_start_matches("Basic ")).unwrap();
    assert_eq!(String::from_utf8(decoded).unwrap(), "my-client:s3cret");
}

#[test]
fn test_lookback_after_ms() {
    let now = Utc.with_ymd_and_hms(2025, 10, 14, 12, 0, 0).unwrap();
    let after = lookback_after_ms(now, 12);

    // Exactly twelve hours earlier, in milliseconds
    assert_eq!(after, now.timestamp_millis() - 12 * 60 * 60 * 1000);
    assert_eq!(
        after,
        Utc.with_ymd_and_hms(2025, 10, 14, 0, 0, 0)
            .unwrap()
            .timestamp_millis()
    );
}

#[test]
fn test_build_play_id_is_deterministic() {
    let played_at = Utc.with_ymd_and_hms(2025, 10, 14, 17, 5, 9).unwrap();

    let id = build_play_id("4uLU6hMCjMI75M1A2tKUQC", &played_at);
    assert_eq!(id, "4uLU6hMCjMI75M1A2tKUQC_2025-10-14_17:05:09");

    // Same input produces the same id
    assert_eq!(id, build_play_id("4uLU6hMCjMI75M1A2tKUQC", &played_at));
}

#[test]
fn test_build_play_id_ignores_sub_second_precision() {
    let a = Utc.timestamp_millis_opt(1_760_461_509_120).unwrap();
    let b = Utc.timestamp_millis_opt(1_760_461_509_870).unwrap();

    // Same second collides, one second later does not
    assert_eq!(build_play_id("t", &a), build_play_id("t", &b));
    let c = Utc.timestamp_millis_opt(1_760_461_510_120).unwrap();
    assert_ne!(build_play_id("t", &a), build_play_id("t", &c));
}

#[test]
fn test_format_local_time() {
    // CDT is UTC-5 in October
    let summer = Utc.with_ymd_and_hms(2025, 10, 14, 17, 5, 9).unwrap();
    assert_eq!(format_local_time(&summer, &Central), "2025-10-14 12:05:09");

    // CST is UTC-6 in January
    let winter = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
    assert_eq!(format_local_time(&winter, &Central), "2025-01-01 21:04:05");
}

#[test]
fn test_parse_release_date() {
    assert_eq!(
        parse_release_date("2023-10-17"),
        NaiveDate::from_ymd_opt(2023, 10, 17)
    );

    // Month and year precision resolve to the first day
    assert_eq!(
        parse_release_date("2023-10"),
        NaiveDate::from_ymd_opt(2023, 10, 1)
    );
    assert_eq!(parse_release_date("1999"), NaiveDate::from_ymd_opt(1999, 1, 1));

    // Garbage and impossible dates become None
    assert_eq!(parse_release_date("not a date"), None);
    assert_eq!(parse_release_date("2023-02-30"), None);
    assert_eq!(parse_release_date(""), None);

    // Placeholder years and dates older than the supported range
    assert_eq!(parse_release_date("0000"), None);
    assert_eq!(parse_release_date("0000-00-00"), None);
    assert_eq!(parse_release_date("1500-01-01"), None);
    assert_eq!(parse_release_date("1677-09-21"), None);
    assert_eq!(
        parse_release_date("1677-09-22"),
        NaiveDate::from_ymd_opt(1677, 9, 22)
    );
}

#[test]
fn test_milliseconds_to_seconds() {
    assert!((milliseconds_to_seconds(215_000) - 215.0).abs() < f64::EPSILON);
    assert!((milliseconds_to_seconds(1_234) - 1.234).abs() < 1e-9);
    assert_eq!(milliseconds_to_seconds(0), 0.0);
}

#[test]
fn test_distinct_preserves_first_seen_order() {
    let ids = distinct(["b", "a", "b", "c", "a"]);
    assert_eq!(ids, vec!["b", "a", "c"]);

    let empty: Vec<&str> = Vec::new();
    assert!(distinct(empty).is_empty());
}

#[test]
fn test_is_valid_table_name() {
    assert!(is_valid_table_name("most_recently_played_songs"));
    assert!(is_valid_table_name("public.plays"));
    assert!(is_valid_table_name("_plays2"));

    assert!(!is_valid_table_name(""));
    assert!(!is_valid_table_name("2plays"));
    assert!(!is_valid_table_name("plays; DROP TABLE plays"));
    assert!(!is_valid_table_name("a.b.c"));
    assert!(!is_valid_table_name("public."));
}

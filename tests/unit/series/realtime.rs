//! Unit tests for the rolling realtime window

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rankpulse::identity::IdentityResolver;
use rankpulse::models::{Category, ComboKey, GameIdentity, HourlyFeeds, HourlyPoint, Platform, Region};
use rankpulse::series::RealtimeExtractor;

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 12, 1)
        .unwrap()
        .and_hms_opt(6, 0, 0)
        .unwrap()
}

fn create_point(at: NaiveDateTime, rank: u32, app_id: &str) -> HourlyPoint {
    HourlyPoint {
        date: at.date(),
        time: at.time(),
        rank,
        app_id: app_id.to_string(),
        title: "Alpha".to_string(),
    }
}

/// One point every 30 minutes for `hours` hours, starting at `start()`
fn create_half_hourly_points(hours: i64, app_id: &str) -> Vec<HourlyPoint> {
    (0..=hours * 2)
        .map(|i| create_point(start() + Duration::minutes(30 * i), (i % 50 + 1) as u32, app_id))
        .collect()
}

#[test]
fn test_window_limited_to_last_24_hours() {
    let points = create_half_hourly_points(30, "A1");
    let last = start() + Duration::hours(30);

    let window = RealtimeExtractor::window(&points, "A1");
    assert_eq!(window.len(), 48);
    for point in &window {
        let at = point.date.and_time(point.time);
        assert!(at > last - Duration::hours(24));
        assert!(at <= last);
    }
    let newest = window.last().unwrap();
    assert_eq!(newest.date.and_time(newest.time), last);
}

#[test]
fn test_window_is_ascending_across_midnight() {
    let mut points = create_half_hourly_points(30, "A1");
    points.reverse();
    let window = RealtimeExtractor::window(&points, "A1");
    let stamps: Vec<NaiveDateTime> = window.iter().map(|p| p.date.and_time(p.time)).collect();
    let mut sorted = stamps.clone();
    sorted.sort();
    assert_eq!(stamps, sorted);
    assert!(window.iter().any(|p| p.date == NaiveDate::from_ymd_opt(2025, 12, 2).unwrap()));
}

#[test]
fn test_off_half_hour_rows_dropped() {
    let points = vec![
        create_point(start(), 5, "A1"),
        create_point(start() + Duration::minutes(15), 4, "A1"),
        create_point(start() + Duration::minutes(30), 3, "A1"),
    ];
    let window = RealtimeExtractor::window(&points, "A1");
    let times: Vec<NaiveTime> = window.iter().map(|p| p.time).collect();
    assert_eq!(
        times,
        vec![
            NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(6, 30, 0).unwrap()
        ]
    );
}

#[test]
fn test_duplicate_marks_keep_first_row() {
    let points = vec![
        create_point(start(), 7, "A1"),
        create_point(start(), 9, "A1"),
        create_point(start(), 1, "B2"),
    ];
    let window = RealtimeExtractor::window(&points, "A1");
    assert_eq!(window.len(), 1);
    assert_eq!(window[0].rank, 7);
}

#[test]
fn test_unknown_app_id_gives_empty_window() {
    let points = create_half_hourly_points(2, "A1");
    assert!(RealtimeExtractor::window(&points, "nope").is_empty());
}

#[test]
fn test_extract_keys_only_matched_grossing_combos() {
    let identity = GameIdentity::new("Alpha")
        .with_app_id("ios", "A1")
        .with_app_id("android", "com.alpha");
    let resolver = IdentityResolver::new(&identity);

    let ios_kr = ComboKey::new(Category::Grossing, Platform::Ios, Region::Kr);
    let aos_cn = ComboKey::new(Category::Grossing, Platform::Android, Region::Cn);
    let aos_jp = ComboKey::new(Category::Grossing, Platform::Android, Region::Jp);
    let free_ios_kr = ComboKey::new(Category::Free, Platform::Ios, Region::Kr);

    let mut feeds = HourlyFeeds::new();
    feeds.insert(ios_kr, create_half_hourly_points(2, "A1"));
    feeds.insert(aos_cn, create_half_hourly_points(2, "com.alpha"));
    feeds.insert(aos_jp, create_half_hourly_points(2, "someone-else"));
    feeds.insert(free_ios_kr, create_half_hourly_points(2, "A1"));

    let result = RealtimeExtractor::extract(&feeds, &resolver);
    let keys: Vec<String> = result.keys().map(|k| k.realtime_key()).collect();
    assert_eq!(keys, vec!["ios-kr-grossing".to_string()]);
    assert_eq!(result[&ios_kr].len(), 5);
}

#[test]
fn test_realtime_point_serializes_hh_mm() {
    let points = vec![create_point(start() + Duration::minutes(30), 12, "A1")];
    let window = RealtimeExtractor::window(&points, "A1");
    assert_eq!(
        serde_json::to_value(&window[0]).unwrap(),
        serde_json::json!({ "date": "2025-12-01", "time": "06:30", "rank": 12 })
    );
}

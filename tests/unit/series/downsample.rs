//! Unit tests for best-rank downsampling

use chrono::NaiveDate;
use rankpulse::models::{ChartPoint, RankRow, SteamHistoryRow, SteamMetric};
use rankpulse::series::{daily, downsample, monthly, project, weekly};

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn create_row(date: NaiveDate, key: &'static str, rank: u32) -> RankRow<&'static str> {
    RankRow::new(date).with_rank(key, rank)
}

#[test]
fn test_daily_collapses_same_day_rows_to_best_rank() {
    let day = ymd(2025, 12, 1);
    let rows = vec![create_row(day, "kr", 12), create_row(day, "kr", 5), create_row(day, "jp", 40)];

    let points = daily(&rows);
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].ranks.get("kr"), Some(&5));
    assert_eq!(points[0].ranks.get("jp"), Some(&40));
}

#[test]
fn test_daily_keeps_most_recent_seven_dates() {
    let rows: Vec<_> = (1..=10).map(|d| create_row(ymd(2025, 12, d), "kr", d)).collect();
    let points = daily(&rows);
    let dates: Vec<NaiveDate> = points.iter().map(|p| p.date).collect();
    assert_eq!(dates, (4..=10).map(|d| ymd(2025, 12, d)).collect::<Vec<_>>());
}

#[test]
fn test_weekly_buckets_anchor_on_latest_date() {
    let rows = vec![
        create_row(ymd(2025, 10, 1), "kr", 1),
        create_row(ymd(2025, 12, 10), "kr", 20),
        create_row(ymd(2025, 12, 26), "kr", 5),
        create_row(ymd(2025, 12, 30), "kr", 12),
        create_row(ymd(2025, 12, 31), "jp", 7),
    ];

    let points = weekly(&rows);
    let dates: Vec<NaiveDate> = points.iter().map(|p| p.date).collect();
    // 2025-10-01 is older than seven weeks; empty buckets are omitted
    assert_eq!(dates, vec![ymd(2025, 12, 10), ymd(2025, 12, 31)]);
    assert_eq!(points[0].ranks.get("kr"), Some(&20));
    assert_eq!(points[1].ranks.get("kr"), Some(&5));
    assert_eq!(points[1].ranks.get("jp"), Some(&7));
}

#[test]
fn test_weekly_bucket_is_seven_days_inclusive() {
    let rows = vec![
        create_row(ymd(2025, 12, 24), "kr", 3),
        create_row(ymd(2025, 12, 25), "kr", 9),
        create_row(ymd(2025, 12, 31), "kr", 10),
    ];
    let points = weekly(&rows);
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].date, ymd(2025, 12, 24));
    assert_eq!(points[0].ranks.get("kr"), Some(&3));
    assert_eq!(points[1].ranks.get("kr"), Some(&9));
}

#[test]
fn test_monthly_uses_calendar_months() {
    let rows = vec![
        create_row(ymd(2025, 3, 1), "kr", 1),
        create_row(ymd(2025, 11, 3), "kr", 8),
        create_row(ymd(2025, 11, 20), "kr", 3),
        create_row(ymd(2025, 12, 1), "kr", 15),
        create_row(ymd(2025, 12, 14), "kr", 11),
    ];

    let points = monthly(&rows);
    let dates: Vec<NaiveDate> = points.iter().map(|p| p.date).collect();
    assert_eq!(dates, vec![ymd(2025, 11, 30), ymd(2025, 12, 31)]);
    assert_eq!(points[0].ranks.get("kr"), Some(&3));
    assert_eq!(points[1].ranks.get("kr"), Some(&11));
}

#[test]
fn test_monthly_handles_leap_february() {
    let rows = vec![create_row(ymd(2024, 2, 10), "kr", 4), create_row(ymd(2024, 3, 2), "kr", 6)];
    let points = monthly(&rows);
    assert_eq!(points[0].date, ymd(2024, 2, 29));
    assert_eq!(points[1].date, ymd(2024, 3, 31));
}

#[test]
fn test_monthly_spans_year_boundary() {
    let rows = vec![create_row(ymd(2025, 7, 31), "kr", 2), create_row(ymd(2026, 1, 5), "kr", 9)];
    let points = monthly(&rows);
    let dates: Vec<NaiveDate> = points.iter().map(|p| p.date).collect();
    assert_eq!(dates, vec![ymd(2025, 7, 31), ymd(2026, 1, 31)]);
}

#[test]
fn test_empty_history_gives_empty_charts() {
    let rows: Vec<RankRow<&'static str>> = Vec::new();
    let charts = downsample(&rows);
    assert!(charts.daily.is_empty());
    assert!(charts.weekly.is_empty());
    assert!(charts.monthly.is_empty());
}

#[test]
fn test_never_averages() {
    let rows = vec![
        create_row(ymd(2025, 12, 29), "kr", 5),
        create_row(ymd(2025, 12, 30), "kr", 12),
    ];
    let charts = downsample(&rows);
    assert_eq!(charts.weekly[0].ranks.get("kr"), Some(&5));
    assert_eq!(charts.monthly[0].ranks.get("kr"), Some(&5));
}

#[test]
fn test_project_steam_metrics() {
    let mut first = SteamHistoryRow::new(ymd(2025, 12, 1));
    first.ccu_rank = Some(4);
    first.sales_rank = Some(10);
    let mut second = SteamHistoryRow::new(ymd(2025, 12, 2));
    second.ccu_rank = Some(2);

    let charts = downsample(&[first, second]);
    let ccu = project(&charts, SteamMetric::Ccu);
    let sales = project(&charts, SteamMetric::Sales);

    assert_eq!(
        ccu.daily,
        vec![
            ChartPoint { date: ymd(2025, 12, 1), rank: 4 },
            ChartPoint { date: ymd(2025, 12, 2), rank: 2 }
        ]
    );
    assert_eq!(sales.daily, vec![ChartPoint { date: ymd(2025, 12, 1), rank: 10 }]);
    assert_eq!(ccu.monthly, vec![ChartPoint { date: ymd(2025, 12, 31), rank: 2 }]);
}

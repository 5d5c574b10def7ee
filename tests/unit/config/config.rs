//! Unit tests for configuration defaults and parsing

use chrono::NaiveDate;
use rankpulse::config::{parse_reference_time, DataLayout, PipelineConfig};
use rankpulse::identity::AliasConflictPolicy;
use std::path::PathBuf;

#[test]
fn test_layout_under_data_dir() {
    let layout = DataLayout::under("/srv/data");
    assert_eq!(layout.catalog_path, PathBuf::from("/srv/data/games.json"));
    assert_eq!(layout.history_dir, PathBuf::from("/srv/data/history"));
    assert_eq!(layout.reports_dir, PathBuf::from("/srv/data/reports"));
    assert_eq!(layout.weekly_reports_dir, PathBuf::from("/srv/data/reports/weekly"));
    assert_eq!(layout.hourly_dir, PathBuf::from("/srv/data/snapshots/rankings"));
}

#[test]
fn test_catalog_override() {
    let layout = DataLayout::under("data").with_catalog_path("/etc/games.json");
    assert_eq!(layout.catalog_path, PathBuf::from("/etc/games.json"));
    assert_eq!(layout.history_dir, PathBuf::from("data/history"));
}

#[test]
fn test_pipeline_defaults() {
    let config = PipelineConfig::default();
    assert_eq!(config.alias_policy, AliasConflictPolicy::KeepFirst);
    assert!(config.concurrency > 0);
    assert!(config.reference_time.is_none());
}

#[test]
fn test_parse_reference_time() {
    let expected = NaiveDate::from_ymd_opt(2025, 12, 10)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    assert_eq!(parse_reference_time("2025-12-10T09:30").unwrap(), expected);
    assert_eq!(parse_reference_time("2025-12-10T09:30:00").unwrap(), expected);
    assert!(parse_reference_time("2025-12-10").is_err());
}

//! Filesystem-backed snapshot store.
//!
//! Layout (see [`DataLayout`]):
//! - `history/*YYYY-MM-DD*.json` daily snapshots
//! - `reports/*YYYY-MM-DD*.json` daily reports, `reports/weekly/*.json` weekly reports
//! - `snapshots/rankings/<date>_<ios|aos>_<region>_<category>.csv` realtime points

use crate::config::DataLayout;
use crate::error::{CatalogError, SnapshotError};
use crate::identity::{AliasConflictPolicy, Catalog};
use crate::models::combo::{ComboKey, Platform, Region};
use crate::models::report::{ReportDate, ReportDocument, ReportKind, ReportRecord};
use crate::models::snapshot::{DailySnapshot, HourlyFeeds, HourlyPoint, SnapshotDocument};
use crate::series::realtime::REALTIME_CATEGORY;
use crate::services::csv::parse_hourly_row;
use crate::services::store::SnapshotStore;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub struct FsSnapshotStore {
    layout: DataLayout,
}

impl FsSnapshotStore {
    pub fn new(layout: DataLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }
}

/// First `YYYY-MM-DD` found in a file name
pub fn date_from_file_name(name: &str) -> Option<NaiveDate> {
    let bytes = name.as_bytes();
    (0..bytes.len().saturating_sub(9)).find_map(|start| {
        let candidate = name.get(start..start + 10)?;
        NaiveDate::parse_from_str(candidate, "%Y-%m-%d").ok()
    })
}

/// `.json` files in a directory sorted by name; missing directory yields nothing
fn json_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "Skipping unreadable directory {}", dir.display());
            return Vec::new();
        }
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn read_text(path: &Path) -> Result<String, SnapshotError> {
    std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_json<T: serde::de::DeserializeOwned>(path: &Path, text: &str) -> Result<T, SnapshotError> {
    serde_json::from_str(text.trim_start_matches('\u{FEFF}')).map_err(|source| SnapshotError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse one daily snapshot; its date comes from the file name
pub fn parse_snapshot_file(path: &Path) -> Result<DailySnapshot, SnapshotError> {
    let date = date_from_file_name(&file_name(path))
        .ok_or_else(|| SnapshotError::MissingDate(path.to_path_buf()))?;
    let document: SnapshotDocument = parse_json(path, &read_text(path)?)?;
    Ok(DailySnapshot::new(date, document))
}

/// Parse one report. Daily reports are dated by file name (falling back to
/// `ai.date`); weekly reports by their `ai.date` range.
pub fn parse_report_file(path: &Path, kind: ReportKind) -> Result<ReportRecord, SnapshotError> {
    let document: ReportDocument = parse_json(path, &read_text(path)?)?;
    let ai = document
        .ai
        .ok_or_else(|| SnapshotError::EmptyMentionSource(path.to_path_buf()))?;

    let name = file_name(path);
    let from_ai = ai.date.as_deref().and_then(ReportDate::parse);
    let date = match kind {
        ReportKind::Daily => date_from_file_name(&name).map(ReportDate::Day).or(from_ai),
        ReportKind::Weekly => from_ai,
    }
    .ok_or_else(|| SnapshotError::MissingDate(path.to_path_buf()))?;

    Ok(ReportRecord {
        date,
        kind,
        source: name,
        ai,
    })
}

/// Parse one realtime CSV. The header and malformed rows are skipped.
pub fn parse_hourly_file(path: &Path, date: NaiveDate) -> Result<Vec<HourlyPoint>, SnapshotError> {
    let text = read_text(path)?;
    let mut points = Vec::new();
    for (index, line) in text.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        match parse_hourly_row(line) {
            Ok(row) => points.push(HourlyPoint {
                date,
                time: row.time,
                rank: row.rank,
                app_id: row.app_id,
                title: row.title,
            }),
            Err(reason) => {
                let err = SnapshotError::CsvRow {
                    path: path.to_path_buf(),
                    line: index + 1,
                    reason,
                };
                debug!(error = %err, "Skipping CSV row");
            }
        }
    }
    Ok(points)
}

impl SnapshotStore for FsSnapshotStore {
    fn load_catalog(&self, policy: AliasConflictPolicy) -> Result<Catalog, CatalogError> {
        Catalog::load(&self.layout.catalog_path, policy)
    }

    fn load_daily_snapshots(&self) -> Vec<DailySnapshot> {
        let mut snapshots: Vec<DailySnapshot> = json_files(&self.layout.history_dir)
            .into_iter()
            .filter(|path| !file_name(path).contains("mentions"))
            .filter_map(|path| match parse_snapshot_file(&path) {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    warn!(error = %e, "Skipping daily snapshot {}", path.display());
                    None
                }
            })
            .collect();
        snapshots.sort_by_key(|s| s.date);
        snapshots
    }

    fn load_reports(&self) -> Vec<ReportRecord> {
        let daily = json_files(&self.layout.reports_dir)
            .into_iter()
            .filter(|path| !file_name(path).contains("weekly"))
            .map(|path| (path, ReportKind::Daily));
        let weekly = json_files(&self.layout.weekly_reports_dir)
            .into_iter()
            .map(|path| (path, ReportKind::Weekly));

        daily
            .chain(weekly)
            .filter_map(|(path, kind)| match parse_report_file(&path, kind) {
                Ok(report) => Some(report),
                Err(e) => {
                    warn!(error = %e, "Skipping report {}", path.display());
                    None
                }
            })
            .collect()
    }

    fn load_hourly(&self, now: NaiveDateTime) -> HourlyFeeds {
        let today = now.date();
        let days = [today - Duration::days(1), today];
        let mut feeds = HourlyFeeds::new();

        for platform in Platform::ALL {
            for region in Region::ALL {
                let combo = ComboKey::new(REALTIME_CATEGORY, platform, region);
                let mut points = Vec::new();
                for day in days {
                    let path = self.layout.hourly_dir.join(format!(
                        "{}_{}_{}_{}.csv",
                        day.format("%Y-%m-%d"),
                        platform.short(),
                        region.as_str(),
                        combo.category.as_str()
                    ));
                    if !path.exists() {
                        continue;
                    }
                    match parse_hourly_file(&path, day) {
                        Ok(mut rows) => points.append(&mut rows),
                        Err(e) => warn!(error = %e, "Skipping realtime file {}", path.display()),
                    }
                }
                if !points.is_empty() {
                    feeds.insert(combo, points);
                }
            }
        }
        feeds
    }
}

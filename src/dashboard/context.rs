//! Read-only run context shared by every component

use crate::identity::Catalog;
use crate::models::report::ReportRecord;
use crate::models::snapshot::{DailySnapshot, HourlyFeeds};
use chrono::NaiveDateTime;

/// Everything one pipeline run reads, loaded up front.
///
/// Built once per run and passed by reference to each game's assembly; nothing
/// in here is mutated afterwards, so games can be assembled in any order or in
/// parallel. `now` is the reference time for the realtime file selection and
/// mention windows, so identical inputs give identical output.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    pub catalog: Catalog,
    pub snapshots: Vec<DailySnapshot>,
    pub reports: Vec<ReportRecord>,
    pub hourly: HourlyFeeds,
    pub now: NaiveDateTime,
}

impl DashboardContext {
    pub fn new(catalog: Catalog, now: NaiveDateTime) -> Self {
        Self {
            catalog,
            snapshots: Vec::new(),
            reports: Vec::new(),
            hourly: HourlyFeeds::new(),
            now,
        }
    }

    /// Snapshots are kept in ascending date order
    pub fn with_snapshots(mut self, mut snapshots: Vec<DailySnapshot>) -> Self {
        snapshots.sort_by_key(|s| s.date);
        self.snapshots = snapshots;
        self
    }

    pub fn with_reports(mut self, reports: Vec<ReportRecord>) -> Self {
        self.reports = reports;
        self
    }

    pub fn with_hourly(mut self, hourly: HourlyFeeds) -> Self {
        self.hourly = hourly;
        self
    }

    pub fn latest_snapshot(&self) -> Option<&DailySnapshot> {
        self.snapshots.last()
    }
}

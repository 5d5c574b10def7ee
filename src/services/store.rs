//! Snapshot store interface: where a run's persisted inputs come from.

use crate::dashboard::DashboardContext;
use crate::error::CatalogError;
use crate::identity::{AliasConflictPolicy, Catalog};
use crate::models::report::ReportRecord;
use crate::models::snapshot::{DailySnapshot, HourlyFeeds};
use chrono::NaiveDateTime;
use tracing::info;

/// Read-only access to crawler and report output.
///
/// Loaders are best-effort: unreadable or malformed files are logged and
/// skipped, so only the catalog load can fail.
pub trait SnapshotStore {
    fn load_catalog(&self, policy: AliasConflictPolicy) -> Result<Catalog, CatalogError>;

    /// Daily snapshots in ascending date order
    fn load_daily_snapshots(&self) -> Vec<DailySnapshot>;

    /// Daily and weekly reports that carry an `ai` section
    fn load_reports(&self) -> Vec<ReportRecord>;

    /// Realtime points from yesterday's and today's files relative to `now`
    fn load_hourly(&self, now: NaiveDateTime) -> HourlyFeeds;
}

/// Load everything a run needs into one read-only context
pub fn build_context(
    store: &dyn SnapshotStore,
    policy: AliasConflictPolicy,
    now: NaiveDateTime,
) -> Result<DashboardContext, CatalogError> {
    let catalog = store.load_catalog(policy)?;
    let snapshots = store.load_daily_snapshots();
    let reports = store.load_reports();
    let hourly = store.load_hourly(now);

    info!(
        games = catalog.len(),
        snapshots = snapshots.len(),
        reports = reports.len(),
        realtime_feeds = hourly.len(),
        "Loaded {} games, {} snapshots, {} reports, {} realtime feeds",
        catalog.len(),
        snapshots.len(),
        reports.len(),
        hourly.len()
    );

    Ok(DashboardContext::new(catalog, now)
        .with_snapshots(snapshots)
        .with_reports(reports)
        .with_hourly(hourly))
}

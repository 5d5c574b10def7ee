//! Rolling 24h realtime rank window from half-hourly CSV snapshots.

use crate::identity::IdentityResolver;
use crate::models::combo::{Category, ComboKey};
use crate::models::dashboard::RealtimePoint;
use crate::models::snapshot::{HourlyFeeds, HourlyPoint};
use chrono::Duration;
use std::collections::{BTreeMap, HashSet};

/// Only the revenue chart is collected half-hourly
pub const REALTIME_CATEGORY: Category = Category::Grossing;

/// Window length measured back from the latest point. The start is
/// exclusive, so a window holds at most 48 half-hour marks.
pub const WINDOW_HOURS: i64 = 24;

pub struct RealtimeExtractor;

impl RealtimeExtractor {
    /// Realtime windows for every grossing combo the identity resolves in.
    /// Combos where the game never appears are absent.
    pub fn extract(
        feeds: &HourlyFeeds,
        resolver: &IdentityResolver<'_>,
    ) -> BTreeMap<ComboKey, Vec<RealtimePoint>> {
        let mut result = BTreeMap::new();
        for (combo, points) in feeds {
            if combo.category != REALTIME_CATEGORY {
                continue;
            }
            let Some(app_id) = resolver.resolve_app_id(combo.platform, combo.region) else {
                continue;
            };
            let window = Self::window(points, app_id);
            if !window.is_empty() {
                result.insert(*combo, window);
            }
        }
        result
    }

    /// Half-hour marks for one app id, de-duplicated by `(date, time)`,
    /// ascending, restricted to points strictly newer than `latest - 24h`.
    pub fn window(points: &[HourlyPoint], app_id: &str) -> Vec<RealtimePoint> {
        let mut seen = HashSet::new();
        let mut matched: Vec<&HourlyPoint> = points
            .iter()
            .filter(|p| p.on_half_hour() && p.app_id == app_id)
            .filter(|p| seen.insert((p.date, p.time)))
            .collect();
        matched.sort_by_key(|p| p.timestamp());

        // Anchored on the latest point, so the window always holds at least it
        let Some(last) = matched.last() else {
            return Vec::new();
        };
        let cutoff = last.timestamp() - Duration::hours(WINDOW_HOURS);

        matched
            .into_iter()
            .filter(|p| p.timestamp() > cutoff)
            .map(|p| RealtimePoint {
                date: p.date,
                time: p.time,
                rank: p.rank,
            })
            .collect()
    }
}

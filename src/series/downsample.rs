//! Best-rank downsampling of rank history into daily, weekly and monthly points.
//!
//! Every bucket takes the minimum (best) rank per key. Buckets without data
//! are omitted so a gap in a chart always means "no data", never rank 0.

use crate::models::dashboard::{ChartPoint, PeriodCharts, RankRow, SteamHistoryRow, SteamMetric};
use chrono::{Datelike, Duration, Months, NaiveDate};
use std::collections::BTreeMap;

pub const DAILY_POINTS: usize = 7;
pub const WEEKLY_BUCKETS: i64 = 7;
pub const MONTHLY_BUCKETS: u32 = 7;

/// A dated row of ranks that can be downsampled
pub trait RankedRow {
    type Key: Ord + Copy;

    fn date(&self) -> NaiveDate;

    fn rank_values(&self) -> Vec<(Self::Key, u32)>;
}

impl<K: Ord + Copy> RankedRow for RankRow<K> {
    type Key = K;

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn rank_values(&self) -> Vec<(K, u32)> {
        self.ranks.iter().map(|(k, v)| (*k, *v)).collect()
    }
}

impl RankedRow for SteamHistoryRow {
    type Key = SteamMetric;

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn rank_values(&self) -> Vec<(SteamMetric, u32)> {
        let mut values = Vec::with_capacity(2);
        if let Some(rank) = self.ccu_rank {
            values.push((SteamMetric::Ccu, rank));
        }
        if let Some(rank) = self.sales_rank {
            values.push((SteamMetric::Sales, rank));
        }
        values
    }
}

type DailyBest<K> = BTreeMap<NaiveDate, BTreeMap<K, u32>>;

fn merge_min<K: Ord + Copy>(into: &mut BTreeMap<K, u32>, key: K, rank: u32) {
    into.entry(key)
        .and_modify(|best| *best = (*best).min(rank))
        .or_insert(rank);
}

/// Group rows by calendar date, keeping the best rank per key
fn best_per_date<R: RankedRow>(rows: &[R]) -> DailyBest<R::Key> {
    let mut by_date: DailyBest<R::Key> = BTreeMap::new();
    for row in rows {
        for (key, rank) in row.rank_values() {
            merge_min(by_date.entry(row.date()).or_default(), key, rank);
        }
    }
    by_date
}

/// Best rank per key across `[start, end]`, keyed by `end`
fn bucket<K: Ord + Copy>(days: &DailyBest<K>, start: NaiveDate, end: NaiveDate) -> Option<RankRow<K>> {
    let mut point = RankRow::new(end);
    for ranks in days.range(start..=end).map(|(_, ranks)| ranks) {
        for (key, rank) in ranks {
            merge_min(&mut point.ranks, *key, *rank);
        }
    }
    (!point.ranks.is_empty()).then_some(point)
}

/// Most recent dates, one point per date (AM/PM duplicates collapsed)
pub fn daily<R: RankedRow>(rows: &[R]) -> Vec<RankRow<R::Key>> {
    let days = best_per_date(rows);
    let skip = days.len().saturating_sub(DAILY_POINTS);
    days.into_iter()
        .skip(skip)
        .map(|(date, ranks)| RankRow { date, ranks })
        .collect()
}

/// Seven 7-day buckets ending at the latest date, keyed by bucket end
pub fn weekly<R: RankedRow>(rows: &[R]) -> Vec<RankRow<R::Key>> {
    let days = best_per_date(rows);
    let Some(&latest) = days.keys().next_back() else {
        return Vec::new();
    };
    (0..WEEKLY_BUCKETS)
        .rev()
        .filter_map(|w| {
            let end = latest - Duration::days(w * 7);
            let start = end - Duration::days(6);
            bucket(&days, start, end)
        })
        .collect()
}

/// Seven calendar months ending at the latest date's month, keyed by month end
pub fn monthly<R: RankedRow>(rows: &[R]) -> Vec<RankRow<R::Key>> {
    let days = best_per_date(rows);
    let Some(&latest) = days.keys().next_back() else {
        return Vec::new();
    };
    let Some(current_month) = NaiveDate::from_ymd_opt(latest.year(), latest.month(), 1) else {
        return Vec::new();
    };
    (0..MONTHLY_BUCKETS)
        .rev()
        .filter_map(|m| {
            let start = current_month.checked_sub_months(Months::new(m))?;
            let end = start.checked_add_months(Months::new(1))?.pred_opt()?;
            bucket(&days, start, end)
        })
        .collect()
}

/// All three views at once
pub fn downsample<R: RankedRow>(rows: &[R]) -> PeriodCharts<RankRow<R::Key>> {
    PeriodCharts {
        daily: daily(rows),
        weekly: weekly(rows),
        monthly: monthly(rows),
    }
}

/// Project a multi-key chart onto one key, dropping points without it
pub fn project<K: Ord + Copy>(charts: &PeriodCharts<RankRow<K>>, key: K) -> PeriodCharts<ChartPoint> {
    let pick = |points: &[RankRow<K>]| -> Vec<ChartPoint> {
        points
            .iter()
            .filter_map(|p| p.ranks.get(&key).map(|&rank| ChartPoint { date: p.date, rank }))
            .collect()
    };
    PeriodCharts {
        daily: pick(&charts.daily),
        weekly: pick(&charts.weekly),
        monthly: pick(&charts.monthly),
    }
}

//! Per-game output records consumed by the page renderer.

use crate::models::combo::ComboKey;
use crate::models::identity::GameIdentity;
use crate::models::report::Mention;
use chrono::{NaiveDate, NaiveTime};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Ranks observed on one date, keyed by `K`.
///
/// Rows are sparse: a key is present only when the game was found in that list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankRow<K: Ord> {
    pub date: NaiveDate,
    pub ranks: BTreeMap<K, u32>,
}

impl<K: Ord> RankRow<K> {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            ranks: BTreeMap::new(),
        }
    }

    pub fn with_rank(mut self, key: K, rank: u32) -> Self {
        self.ranks.insert(key, rank);
        self
    }
}

/// Mobile rank history row, serialized as `{"date": ..., "grossing-ios-kr": 3, ...}`
pub type RankHistoryRow = RankRow<ComboKey>;

impl Serialize for RankRow<ComboKey> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.ranks.len() + 1))?;
        map.serialize_entry("date", &self.date)?;
        for (key, rank) in &self.ranks {
            map.serialize_entry(&key.history_key(), rank)?;
        }
        map.end()
    }
}

/// Steam standing on one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SteamHistoryRow {
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ccu_rank: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ccu: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_rank: Option<u32>,
}

impl SteamHistoryRow {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            ccu_rank: None,
            ccu: None,
            sales_rank: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ccu_rank.is_none() && self.ccu.is_none() && self.sales_rank.is_none()
    }
}

/// Steam chart a rank was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SteamMetric {
    Ccu,
    Sales,
}

/// Half-hourly realtime rank
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RealtimePoint {
    pub date: NaiveDate,
    #[serde(serialize_with = "serialize_hhmm")]
    pub time: NaiveTime,
    pub rank: u32,
}

fn serialize_hhmm<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format("%H:%M"))
}

/// Rank in the latest daily snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrentRank {
    pub rank: u32,
    pub change: i64,
}

/// Steam standing in the latest daily snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SteamStanding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_players: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_rank: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,
}

/// News headline that names the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsLink {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Community post that names the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommunityLink {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoLink {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

/// Single-series chart point (Steam charts)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub rank: u32,
}

/// Daily / weekly / monthly views of one series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodCharts<T> {
    pub daily: Vec<T>,
    pub weekly: Vec<T>,
    pub monthly: Vec<T>,
}

impl<T> Default for PeriodCharts<T> {
    fn default() -> Self {
        Self {
            daily: Vec::new(),
            weekly: Vec::new(),
            monthly: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SteamRankCharts {
    pub ccu: PeriodCharts<ChartPoint>,
    pub sales: PeriodCharts<ChartPoint>,
}

/// Mentions whose date falls in the trailing week / month
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MentionWindows {
    pub weekly: usize,
    pub monthly: usize,
}

/// Everything the renderer needs for one game page. Always rebuilt from scratch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDashboardData {
    #[serde(flatten)]
    pub identity: GameIdentity,
    pub slug: String,
    pub icon: Option<String>,
    #[serde(serialize_with = "serialize_ranking_map")]
    pub rankings: BTreeMap<ComboKey, CurrentRank>,
    pub steam: Option<SteamStanding>,
    pub news: Vec<NewsLink>,
    pub community: Vec<CommunityLink>,
    pub youtube: Vec<VideoLink>,
    pub rank_history: Vec<RankHistoryRow>,
    pub rank_charts: PeriodCharts<RankHistoryRow>,
    #[serde(serialize_with = "serialize_realtime_map")]
    pub realtime_ranks: BTreeMap<ComboKey, Vec<RealtimePoint>>,
    pub steam_history: Vec<SteamHistoryRow>,
    pub steam_charts: SteamRankCharts,
    pub mentions: Vec<Mention>,
    pub mention_windows: MentionWindows,
}

impl GameDashboardData {
    /// Whether any section has something to render
    pub fn has_data(&self) -> bool {
        !self.rankings.is_empty()
            || self.steam.is_some()
            || !self.news.is_empty()
            || !self.community.is_empty()
            || !self.youtube.is_empty()
            || !self.rank_history.is_empty()
            || !self.realtime_ranks.is_empty()
            || !self.steam_history.is_empty()
            || !self.mentions.is_empty()
    }
}

fn serialize_ranking_map<S: Serializer>(
    map: &BTreeMap<ComboKey, CurrentRank>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut out = serializer.serialize_map(Some(map.len()))?;
    for (key, value) in map {
        out.serialize_entry(&key.ranking_key(), value)?;
    }
    out.end()
}

fn serialize_realtime_map<S: Serializer>(
    map: &BTreeMap<ComboKey, Vec<RealtimePoint>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut out = serializer.serialize_map(Some(map.len()))?;
    for (key, value) in map {
        out.serialize_entry(&key.realtime_key(), value)?;
    }
    out.end()
}

/// Search index row written next to the game pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndexEntry {
    pub name: String,
    pub slug: String,
    pub aliases: Vec<String>,
    pub platforms: Vec<String>,
    pub developer: String,
    pub has_rankings: bool,
    pub has_steam: bool,
}

impl SearchIndexEntry {
    pub fn from_dashboard(data: &GameDashboardData) -> Self {
        Self {
            name: data.identity.name.clone(),
            slug: data.slug.clone(),
            aliases: data.identity.aliases.clone(),
            platforms: data.identity.platforms.clone(),
            developer: data.identity.developer.clone().unwrap_or_default(),
            has_rankings: !data.rankings.is_empty(),
            has_steam: data.steam.is_some(),
        }
    }
}

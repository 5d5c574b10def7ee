//! Persisted ranking snapshots: daily JSON documents and hourly CSV points.

use crate::models::combo::ComboKey;
use crate::models::de;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Deserialize;
use std::collections::BTreeMap;

/// One row of a store ranking list
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankEntry {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub developer: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub app_id: Option<String>,
    #[serde(default, alias = "rank", deserialize_with = "de::opt_u32")]
    pub position: Option<u32>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub change: Option<i64>,
}

/// One row of a Steam chart (most played or top sellers)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SteamEntry {
    #[serde(default, alias = "appId", deserialize_with = "de::opt_string")]
    pub appid: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_u32")]
    pub rank: Option<u32>,
    #[serde(default, alias = "currentPlayers", deserialize_with = "de::opt_i64")]
    pub ccu: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub discount: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub img: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SteamCharts {
    #[serde(default, deserialize_with = "de::vec_or_null")]
    pub most_played: Vec<SteamEntry>,
    #[serde(default, deserialize_with = "de::vec_or_null")]
    pub top_sellers: Vec<SteamEntry>,
}

/// Headline from one news source
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsItem {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub date: Option<String>,
}

/// Popular post from one community board
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommunityPost {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub comments: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub views: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoItem {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub channel: Option<String>,
}

/// News, community and video feeds captured alongside the rankings.
///
/// News and community items are grouped by source, in document order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotFeeds {
    #[serde(default, deserialize_with = "de::source_lists")]
    pub news: Vec<(String, Vec<NewsItem>)>,
    #[serde(default, deserialize_with = "de::source_lists")]
    pub community: Vec<(String, Vec<CommunityPost>)>,
    #[serde(default, deserialize_with = "de::lenient_vec")]
    pub youtube: Vec<VideoItem>,
}

type RankingTree = BTreeMap<String, BTreeMap<String, BTreeMap<String, Vec<RankEntry>>>>;

/// Raw snapshot document as written by the crawlers
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotDocument {
    #[serde(default)]
    pub rankings: Option<RankingTree>,
    #[serde(default)]
    pub steam: Option<SteamCharts>,
    #[serde(flatten)]
    pub feeds: SnapshotFeeds,
}

/// Rankings captured on one calendar date. Never mutated after load.
#[derive(Debug, Clone)]
pub struct DailySnapshot {
    pub date: NaiveDate,
    rankings: RankingTree,
    pub steam: SteamCharts,
    pub feeds: SnapshotFeeds,
}

impl DailySnapshot {
    pub fn new(date: NaiveDate, document: SnapshotDocument) -> Self {
        Self {
            date,
            rankings: document.rankings.unwrap_or_default(),
            steam: document.steam.unwrap_or_default(),
            feeds: document.feeds,
        }
    }

    /// Snapshot with no rankings; used to build fixtures
    pub fn empty(date: NaiveDate) -> Self {
        Self::new(date, SnapshotDocument::default())
    }

    /// Ranking list for a combo, empty when the crawler captured nothing
    pub fn rank_list(&self, combo: &ComboKey) -> &[RankEntry] {
        self.rankings
            .get(combo.category.as_str())
            .and_then(|regions| regions.get(combo.region.as_str()))
            .and_then(|platforms| platforms.get(combo.platform.as_str()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn set_rank_list(&mut self, combo: &ComboKey, entries: Vec<RankEntry>) {
        self.rankings
            .entry(combo.category.as_str().to_string())
            .or_default()
            .entry(combo.region.as_str().to_string())
            .or_default()
            .insert(combo.platform.as_str().to_string(), entries);
    }
}

/// One half-hourly observation from a realtime CSV
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlyPoint {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub rank: u32,
    pub app_id: String,
    pub title: String,
}

impl HourlyPoint {
    pub fn timestamp(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// True for `:00` and `:30` marks
    pub fn on_half_hour(&self) -> bool {
        self.time.minute() % 30 == 0
    }
}

/// Hourly points per combo, already concatenated across yesterday and today
pub type HourlyFeeds = BTreeMap<ComboKey, Vec<HourlyPoint>>;

//! Generated insight reports and the mentions extracted from them.

use crate::models::de;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date of a report: a single day, or a weekly `"start ~ end"` range.
///
/// Parsed once at ingestion; everything downstream compares
/// [`ReportDate::comparable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportDate {
    Day(NaiveDate),
    Week { start: NaiveDate, end: NaiveDate },
}

impl ReportDate {
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        match value.split_once('~') {
            Some((start, end)) => {
                let start = NaiveDate::parse_from_str(start.trim(), DATE_FORMAT).ok()?;
                let end = NaiveDate::parse_from_str(end.trim(), DATE_FORMAT).ok()?;
                Some(ReportDate::Week { start, end })
            }
            None => NaiveDate::parse_from_str(value, DATE_FORMAT)
                .ok()
                .map(ReportDate::Day),
        }
    }

    /// Date used for ordering and window filters (end date for weeks)
    pub fn comparable(&self) -> NaiveDate {
        match *self {
            ReportDate::Day(date) => date,
            ReportDate::Week { end, .. } => end,
        }
    }
}

impl fmt::Display for ReportDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportDate::Day(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            ReportDate::Week { start, end } => write!(
                f,
                "{} ~ {}",
                start.format(DATE_FORMAT),
                end.format(DATE_FORMAT)
            ),
        }
    }
}

impl Serialize for ReportDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Daily,
    Weekly,
}

/// Free-text section item (issues, metrics, community, streaming, global...)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextItem {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub tag: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub desc: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingItem {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub tag: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub desc: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "de::opt_u32")]
    pub rank: Option<u32>,
    #[serde(default, deserialize_with = "de::opt_u32")]
    pub prev_rank: Option<u32>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub change: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StockItem {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub desc: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub comment: Option<String>,
}

/// Daily reports list stocks; weekly reports split them into movers
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StocksSection {
    List(Vec<StockItem>),
    Movers {
        #[serde(default, deserialize_with = "de::vec_or_null")]
        up: Vec<StockItem>,
        #[serde(default, deserialize_with = "de::vec_or_null")]
        down: Vec<StockItem>,
    },
}

impl StocksSection {
    pub fn items(&self) -> Vec<&StockItem> {
        match self {
            StocksSection::List(items) => items.iter().collect(),
            StocksSection::Movers { up, down } => up.iter().chain(down.iter()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MvpItem {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub desc: Option<String>,
    #[serde(default, deserialize_with = "de::vec_or_null")]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseItem {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub desc: Option<String>,
}

/// The `ai` data section of a report
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSections {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "de::vec_or_null")]
    pub issues: Vec<TextItem>,
    #[serde(default, deserialize_with = "de::vec_or_null")]
    pub industry_issues: Vec<TextItem>,
    #[serde(default, deserialize_with = "de::vec_or_null")]
    pub metrics: Vec<TextItem>,
    #[serde(default, deserialize_with = "de::vec_or_null")]
    pub rankings: Vec<RankingItem>,
    #[serde(default, deserialize_with = "de::vec_or_null")]
    pub community: Vec<TextItem>,
    #[serde(default, deserialize_with = "de::vec_or_null")]
    pub streaming: Vec<TextItem>,
    #[serde(default)]
    pub stocks: Option<StocksSection>,
    #[serde(default)]
    pub mvp: Option<MvpItem>,
    #[serde(default, deserialize_with = "de::vec_or_null")]
    pub releases: Vec<ReleaseItem>,
    #[serde(default, deserialize_with = "de::vec_or_null")]
    pub global: Vec<TextItem>,
}

/// Report file as written by the insight generator
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportDocument {
    #[serde(default)]
    pub ai: Option<AiSections>,
}

/// A report accepted at ingestion: it had an `ai` section and a usable date
#[derive(Debug, Clone)]
pub struct ReportRecord {
    pub date: ReportDate,
    pub kind: ReportKind,
    pub source: String,
    pub ai: AiSections,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MentionType {
    Ranking,
    Community,
    Issue,
    Metric,
    Streaming,
    Industry,
    Mvp,
    Stock,
    Release,
    Global,
}

impl MentionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MentionType::Ranking => "ranking",
            MentionType::Community => "community",
            MentionType::Issue => "issue",
            MentionType::Metric => "metric",
            MentionType::Streaming => "streaming",
            MentionType::Industry => "industry",
            MentionType::Mvp => "mvp",
            MentionType::Stock => "stock",
            MentionType::Release => "release",
            MentionType::Global => "global",
        }
    }

    /// Tag shown when the section item carries none
    pub fn default_tag(&self) -> Option<&'static str> {
        match self {
            MentionType::Issue => Some("이슈"),
            MentionType::Metric => Some("지표"),
            MentionType::Streaming => Some("스트리밍"),
            MentionType::Industry => Some("업계"),
            MentionType::Stock => Some("주가"),
            MentionType::Mvp => Some("MVP"),
            MentionType::Release => Some("신규 출시"),
            MentionType::Global => Some("글로벌"),
            MentionType::Ranking | MentionType::Community => None,
        }
    }
}

/// A typed reference to one game found in a report section
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mention {
    pub date: ReportDate,
    #[serde(rename = "type")]
    pub mention_type: MentionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_rank: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
}

impl Mention {
    pub fn new(date: ReportDate, mention_type: MentionType) -> Self {
        Self {
            date,
            mention_type,
            tag: None,
            title: None,
            desc: None,
            rank: None,
            prev_rank: None,
            change: None,
            platform: None,
            highlights: Vec::new(),
        }
    }

    /// Dedup key: `<type>-<first 30 chars of title>`
    pub fn dedup_key(&self) -> String {
        let prefix: String = self
            .title
            .as_deref()
            .unwrap_or_default()
            .chars()
            .take(30)
            .collect();
        format!("{}-{}", self.mention_type.as_str(), prefix)
    }
}

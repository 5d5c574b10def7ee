//! Shared data models spanning the engine layers.

pub mod combo;
pub mod dashboard;
pub mod de;
pub mod identity;
pub mod report;
pub mod snapshot;

pub use combo::{Category, ComboKey, Platform, Region};
pub use dashboard::{
    ChartPoint, CommunityLink, CurrentRank, GameDashboardData, MentionWindows, NewsLink,
    PeriodCharts, RankHistoryRow, RankRow, RealtimePoint, SearchIndexEntry, SteamHistoryRow,
    SteamMetric, SteamRankCharts, SteamStanding, VideoLink,
};
pub use identity::{CatalogEntry, GameIdentity};
pub use report::{
    AiSections, Mention, MentionType, ReportDate, ReportDocument, ReportKind, ReportRecord,
};
pub use snapshot::{
    CommunityPost, DailySnapshot, HourlyFeeds, HourlyPoint, NewsItem, RankEntry, SnapshotDocument,
    SnapshotFeeds, SteamEntry, VideoItem,
};

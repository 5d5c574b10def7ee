//! Rank time series: daily history, realtime windows and chart downsampling.

pub mod downsample;
pub mod history;
pub mod realtime;

pub use downsample::{daily, downsample, monthly, project, weekly, RankedRow};
pub use history::{CurrentFeeds, CurrentStanding, HistoryBuilder};
pub use realtime::RealtimeExtractor;

//! Report mention extraction and aggregation.

pub mod aggregator;
pub mod matcher;
pub mod window;

pub use aggregator::{dedup, sort_newest_first, MentionAggregator};
pub use matcher::match_report;
pub use window::{mention_windows, mentions_within};

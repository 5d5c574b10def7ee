//! Trailing-period filters over mentions.

use crate::models::dashboard::MentionWindows;
use crate::models::report::Mention;
use chrono::{Duration, NaiveDate};

pub const WEEK_DAYS: i64 = 7;
pub const MONTH_DAYS: i64 = 30;

/// Mentions dated on or after `today - days`. Weekly mentions use their end date.
pub fn mentions_within(mentions: &[Mention], today: NaiveDate, days: i64) -> Vec<&Mention> {
    let since = today - Duration::days(days);
    mentions
        .iter()
        .filter(|m| m.date.comparable() >= since)
        .collect()
}

pub fn mention_windows(mentions: &[Mention], today: NaiveDate) -> MentionWindows {
    MentionWindows {
        weekly: mentions_within(mentions, today, WEEK_DAYS).len(),
        monthly: mentions_within(mentions, today, MONTH_DAYS).len(),
    }
}

//! Mention collection across reports with deduplication and ordering.

use crate::identity::IdentityResolver;
use crate::mentions::matcher::match_report;
use crate::models::report::{Mention, MentionType, ReportRecord};
use std::collections::HashMap;
use tracing::debug;

pub struct MentionAggregator;

impl MentionAggregator {
    /// Mentions of one game across daily and weekly reports, deduplicated
    /// and newest first
    pub fn collect(reports: &[ReportRecord], resolver: &IdentityResolver<'_>) -> Vec<Mention> {
        let raw: Vec<Mention> = reports
            .iter()
            .flat_map(|report| match_report(report, resolver))
            .collect();
        let raw_count = raw.len();

        let mut mentions = dedup(raw);
        sort_newest_first(&mut mentions);

        debug!(
            game = %resolver.identity().name,
            matched = raw_count,
            kept = mentions.len(),
            "Collected {} mentions ({} after dedup) for {}",
            raw_count,
            mentions.len(),
            resolver.identity().name
        );
        mentions
    }
}

/// Whether `candidate` should replace `existing` under the same dedup key.
/// Ties keep the first-seen entry.
fn supersedes(candidate: &Mention, existing: &Mention) -> bool {
    if candidate.mention_type == MentionType::Ranking {
        candidate.change.unwrap_or(0).abs() > existing.change.unwrap_or(0).abs()
    } else {
        candidate.date.comparable() > existing.date.comparable()
    }
}

/// Collapse mentions sharing `<type>-<title prefix>`.
///
/// Rankings keep the largest absolute change; everything else keeps the
/// latest date (week ranges compare on their end date). Output keeps the
/// first-seen order of keys.
pub fn dedup(mentions: Vec<Mention>) -> Vec<Mention> {
    let mut kept: Vec<Mention> = Vec::with_capacity(mentions.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for mention in mentions {
        let key = mention.dedup_key();
        match index.get(&key) {
            Some(&slot) => {
                if supersedes(&mention, &kept[slot]) {
                    kept[slot] = mention;
                }
            }
            None => {
                index.insert(key, kept.len());
                kept.push(mention);
            }
        }
    }
    kept
}

/// Stable sort, newest comparable date first
pub fn sort_newest_first(mentions: &mut [Mention]) {
    mentions.sort_by(|a, b| b.date.comparable().cmp(&a.date.comparable()));
}

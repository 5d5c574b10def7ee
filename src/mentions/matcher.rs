//! Per-section matching rules turning report items into mentions.
//!
//! - `ranking`, `community`, `mvp`, `release`: exact normalized name match
//! - `issue`, `metric`, `streaming`, `industry`, `global`, `stock`: name
//!   contained in the item's text

use crate::identity::IdentityResolver;
use crate::models::report::{Mention, MentionType, ReportRecord, TextItem};

fn text_mention(report: &ReportRecord, mention_type: MentionType, item: &TextItem) -> Mention {
    let mut mention = Mention::new(report.date, mention_type);
    mention.tag = item
        .tag
        .clone()
        .or_else(|| mention_type.default_tag().map(str::to_string));
    mention.title = item.title.clone();
    mention.desc = item.desc.clone();
    mention
}

fn substring_section(
    report: &ReportRecord,
    resolver: &IdentityResolver<'_>,
    mention_type: MentionType,
    items: &[TextItem],
    out: &mut Vec<Mention>,
) {
    for item in items {
        if resolver.mentioned_in([item.title.as_deref(), item.desc.as_deref()]) {
            out.push(text_mention(report, mention_type, item));
        }
    }
}

/// All mentions of one game in one report, in section order
pub fn match_report(report: &ReportRecord, resolver: &IdentityResolver<'_>) -> Vec<Mention> {
    let ai = &report.ai;
    let mut out = Vec::new();

    for item in &ai.rankings {
        if item.title.as_deref().is_some_and(|t| resolver.matches_name(t)) {
            let mut mention = Mention::new(report.date, MentionType::Ranking);
            mention.tag = item.tag.clone();
            mention.title = item.title.clone();
            mention.desc = item.desc.clone();
            mention.platform = item.platform.clone();
            mention.rank = item.rank;
            mention.prev_rank = item.prev_rank;
            mention.change = item.change;
            out.push(mention);
        }
    }

    for item in &ai.community {
        if item.tag.as_deref().is_some_and(|t| resolver.matches_name(t)) {
            out.push(text_mention(report, MentionType::Community, item));
        }
    }

    substring_section(report, resolver, MentionType::Issue, &ai.issues, &mut out);
    substring_section(report, resolver, MentionType::Metric, &ai.metrics, &mut out);
    substring_section(report, resolver, MentionType::Streaming, &ai.streaming, &mut out);
    substring_section(report, resolver, MentionType::Industry, &ai.industry_issues, &mut out);

    if let Some(stocks) = &ai.stocks {
        for item in stocks.items() {
            let text = [
                item.name.as_deref(),
                item.title.as_deref(),
                item.comment.as_deref(),
                item.desc.as_deref(),
            ];
            if resolver.mentioned_in(text) {
                let mut mention = Mention::new(report.date, MentionType::Stock);
                mention.tag = MentionType::Stock.default_tag().map(str::to_string);
                mention.title = item.name.clone().or_else(|| item.title.clone());
                mention.desc = item.comment.clone().or_else(|| item.desc.clone());
                out.push(mention);
            }
        }
    }

    if let Some(mvp) = &ai.mvp {
        if mvp.name.as_deref().is_some_and(|n| resolver.matches_name(n)) {
            let mut mention = Mention::new(report.date, MentionType::Mvp);
            mention.tag = MentionType::Mvp.default_tag().map(str::to_string);
            mention.title = mvp.name.clone();
            mention.desc = mvp.desc.clone();
            mention.highlights = mvp.highlights.clone();
            out.push(mention);
        }
    }

    for item in &ai.releases {
        let name = item.name.as_deref().or(item.title.as_deref());
        if name.is_some_and(|n| resolver.matches_name(n)) {
            let mut mention = Mention::new(report.date, MentionType::Release);
            mention.tag = MentionType::Release.default_tag().map(str::to_string);
            mention.title = name.map(str::to_string);
            mention.desc = item.desc.clone();
            out.push(mention);
        }
    }

    substring_section(report, resolver, MentionType::Global, &ai.global, &mut out);

    out
}

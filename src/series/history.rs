//! Per-game rank history reconstructed from daily snapshots.

use crate::identity::IdentityResolver;
use crate::models::combo::ComboKey;
use crate::models::dashboard::{
    CommunityLink, CurrentRank, NewsLink, RankHistoryRow, SteamHistoryRow, SteamStanding, VideoLink,
};
use crate::models::snapshot::{DailySnapshot, RankEntry, SteamEntry};
use std::collections::BTreeMap;

/// Standing of a game in the most recent snapshot
#[derive(Debug, Clone, Default)]
pub struct CurrentStanding {
    pub rankings: BTreeMap<ComboKey, CurrentRank>,
    pub icon: Option<String>,
    pub steam: Option<SteamStanding>,
}

/// Feed items from the most recent snapshot whose title names the game
#[derive(Debug, Clone, Default)]
pub struct CurrentFeeds {
    pub news: Vec<NewsLink>,
    pub community: Vec<CommunityLink>,
    pub youtube: Vec<VideoLink>,
}

pub struct HistoryBuilder;

impl HistoryBuilder {
    /// One sparse row per snapshot date where the game appeared in any list.
    ///
    /// Each combo resolves its own app id; combos without one are skipped.
    pub fn build_rank_history(
        snapshots: &[DailySnapshot],
        resolver: &IdentityResolver<'_>,
    ) -> Vec<RankHistoryRow> {
        let combos: Vec<(ComboKey, &str)> = ComboKey::all()
            .into_iter()
            .filter_map(|combo| {
                resolver
                    .resolve_app_id(combo.platform, combo.region)
                    .map(|id| (combo, id))
            })
            .collect();
        if combos.is_empty() {
            return Vec::new();
        }

        let mut rows = Vec::new();
        for snapshot in sorted(snapshots) {
            let mut row = RankHistoryRow::new(snapshot.date);
            for (combo, app_id) in &combos {
                if let Some((index, _)) = find_by_app_id(snapshot.rank_list(combo), app_id) {
                    row.ranks.insert(*combo, index as u32 + 1);
                }
            }
            if !row.ranks.is_empty() {
                rows.push(row);
            }
        }
        rows
    }

    /// Steam chart positions per date, matched by Steam app id or, when the
    /// identity has none, by exact name.
    pub fn build_steam_history(
        snapshots: &[DailySnapshot],
        resolver: &IdentityResolver<'_>,
    ) -> Vec<SteamHistoryRow> {
        let mut rows = Vec::new();
        for snapshot in sorted(snapshots) {
            let mut row = SteamHistoryRow::new(snapshot.date);
            if let Some((index, entry)) = find_steam(&snapshot.steam.most_played, resolver) {
                row.ccu_rank = Some(entry.rank.unwrap_or(index as u32 + 1));
                row.ccu = entry.ccu;
            }
            if let Some((index, entry)) = find_steam(&snapshot.steam.top_sellers, resolver) {
                row.sales_rank = Some(entry.rank.unwrap_or(index as u32 + 1));
            }
            if !row.is_empty() {
                rows.push(row);
            }
        }
        rows
    }

    /// Current ranks, icon and Steam standing from the latest snapshot
    pub fn current_standing(
        latest: &DailySnapshot,
        resolver: &IdentityResolver<'_>,
    ) -> CurrentStanding {
        let mut standing = CurrentStanding::default();

        for combo in ComboKey::all() {
            let Some(app_id) = resolver.resolve_app_id(combo.platform, combo.region) else {
                continue;
            };
            if let Some((index, entry)) = find_by_app_id(latest.rank_list(&combo), app_id) {
                standing.rankings.insert(
                    combo,
                    CurrentRank {
                        rank: index as u32 + 1,
                        change: entry.change.unwrap_or(0),
                    },
                );
                if standing.icon.is_none() {
                    standing.icon = entry.icon.clone();
                }
            }
        }

        let mut steam: Option<SteamStanding> = None;
        if let Some((index, entry)) = find_steam(&latest.steam.most_played, resolver) {
            steam = Some(SteamStanding {
                current_players: entry.ccu,
                rank: Some(entry.rank.unwrap_or(index as u32 + 1)),
                img: entry.img.clone(),
                ..SteamStanding::default()
            });
        }
        if let Some((index, entry)) = find_steam(&latest.steam.top_sellers, resolver) {
            let current = steam.get_or_insert_with(|| SteamStanding {
                img: entry.img.clone(),
                ..SteamStanding::default()
            });
            current.sales_rank = Some(entry.rank.unwrap_or(index as u32 + 1));
            current.price = entry.price.clone();
            current.discount = entry.discount.clone();
        }
        if standing.icon.is_none() {
            standing.icon = steam.as_ref().and_then(|s| s.img.clone());
        }
        standing.steam = steam;

        standing
    }

    /// News, community and video items whose title contains any of the game's names
    pub fn current_feeds(latest: &DailySnapshot, resolver: &IdentityResolver<'_>) -> CurrentFeeds {
        let feeds = &latest.feeds;
        let mut current = CurrentFeeds::default();

        for (source, items) in &feeds.news {
            for item in items {
                if let Some(title) = titled(item.title.as_deref(), resolver) {
                    current.news.push(NewsLink {
                        title,
                        link: item.link.clone(),
                        thumbnail: item.thumbnail.clone(),
                        source: source.clone(),
                        date: item.date.clone(),
                    });
                }
            }
        }

        for (source, items) in &feeds.community {
            for item in items {
                if let Some(title) = titled(item.title.as_deref(), resolver) {
                    current.community.push(CommunityLink {
                        title,
                        link: item.link.clone(),
                        source: source.clone(),
                        comments: item.comments,
                        views: item.views,
                    });
                }
            }
        }

        for item in &feeds.youtube {
            if let Some(title) = titled(item.title.as_deref(), resolver) {
                current.youtube.push(VideoLink {
                    title,
                    link: item.link.clone(),
                    thumbnail: item.thumbnail.clone(),
                    channel: item.channel.clone(),
                });
            }
        }

        current
    }
}

fn titled(title: Option<&str>, resolver: &IdentityResolver<'_>) -> Option<String> {
    title
        .filter(|t| resolver.mentioned_in([Some(*t)]))
        .map(str::to_string)
}

fn sorted(snapshots: &[DailySnapshot]) -> Vec<&DailySnapshot> {
    let mut ordered: Vec<&DailySnapshot> = snapshots.iter().collect();
    ordered.sort_by_key(|s| s.date);
    ordered
}

fn find_by_app_id<'e>(entries: &'e [RankEntry], app_id: &str) -> Option<(usize, &'e RankEntry)> {
    entries
        .iter()
        .enumerate()
        .find(|(_, entry)| entry.app_id.as_deref() == Some(app_id))
}

fn find_steam<'e>(
    entries: &'e [SteamEntry],
    resolver: &IdentityResolver<'_>,
) -> Option<(usize, &'e SteamEntry)> {
    match resolver.resolve_steam_app_id() {
        Some(steam_id) => entries
            .iter()
            .enumerate()
            .find(|(_, entry)| entry.appid.as_deref() == Some(steam_id)),
        None => entries.iter().enumerate().find(|(_, entry)| {
            entry
                .name
                .as_deref()
                .is_some_and(|name| resolver.matches_name(name))
        }),
    }
}

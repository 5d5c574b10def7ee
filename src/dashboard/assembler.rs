//! Per-game dashboard composition

use crate::dashboard::context::DashboardContext;
use crate::dashboard::slug::create_slug;
use crate::error::DashboardError;
use crate::identity::IdentityResolver;
use crate::mentions::{mention_windows, MentionAggregator};
use crate::models::dashboard::{GameDashboardData, SteamMetric, SteamRankCharts};
use crate::models::identity::GameIdentity;
use crate::series::{
    downsample, project, CurrentFeeds, CurrentStanding, HistoryBuilder, RealtimeExtractor,
};
use tracing::{debug, warn};

pub struct DashboardAssembler;

impl DashboardAssembler {
    /// Build the full dashboard record for one identity.
    ///
    /// Empty sub-results are fine; only a malformed identity is an error.
    pub fn assemble(
        identity: &GameIdentity,
        ctx: &DashboardContext,
    ) -> Result<GameDashboardData, DashboardError> {
        if identity.name.trim().is_empty() {
            return Err(DashboardError::MalformedIdentity(
                "identity has no canonical name".to_string(),
            ));
        }
        let resolver = IdentityResolver::new(identity);

        let rank_history = HistoryBuilder::build_rank_history(&ctx.snapshots, &resolver);
        let steam_history = HistoryBuilder::build_steam_history(&ctx.snapshots, &resolver);
        let (standing, feeds) = match ctx.latest_snapshot() {
            Some(latest) => (
                HistoryBuilder::current_standing(latest, &resolver),
                HistoryBuilder::current_feeds(latest, &resolver),
            ),
            None => (CurrentStanding::default(), CurrentFeeds::default()),
        };
        let realtime_ranks = RealtimeExtractor::extract(&ctx.hourly, &resolver);
        let mentions = MentionAggregator::collect(&ctx.reports, &resolver);

        let rank_charts = downsample(&rank_history);
        let steam_downsampled = downsample(&steam_history);
        let steam_charts = SteamRankCharts {
            ccu: project(&steam_downsampled, SteamMetric::Ccu),
            sales: project(&steam_downsampled, SteamMetric::Sales),
        };
        let windows = mention_windows(&mentions, ctx.now.date());

        debug!(
            game = %identity.name,
            history_rows = rank_history.len(),
            steam_rows = steam_history.len(),
            realtime_combos = realtime_ranks.len(),
            mentions = mentions.len(),
            news = feeds.news.len(),
            "Assembled dashboard for {}",
            identity.name
        );

        Ok(GameDashboardData {
            slug: create_slug(&identity.name, &identity.app_ids),
            icon: standing.icon.or_else(|| identity.icon.clone()),
            identity: identity.clone(),
            rankings: standing.rankings,
            steam: standing.steam,
            news: feeds.news,
            community: feeds.community,
            youtube: feeds.youtube,
            rank_history,
            rank_charts,
            realtime_ranks,
            steam_history,
            steam_charts,
            mentions,
            mention_windows: windows,
        })
    }

    /// Assemble every catalog game in catalog order, skipping failures
    pub fn assemble_all(ctx: &DashboardContext) -> Vec<GameDashboardData> {
        ctx.catalog
            .iter()
            .filter_map(|identity| match Self::assemble(identity, ctx) {
                Ok(data) => Some(data),
                Err(e) => {
                    warn!(game = %identity.name, error = %e, "Skipping game '{}'", identity.name);
                    None
                }
            })
            .collect()
    }
}

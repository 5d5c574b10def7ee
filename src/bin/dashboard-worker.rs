//! Dashboard Worker
//!
//! Rebuilds every game dashboard page from the persisted crawler and report
//! output in one pass, then exits.

use dotenvy::dotenv;
use rankpulse::config::{get_environment, PipelineConfig};
use rankpulse::core::runtime::{DashboardRuntime, RuntimeConfig};
use rankpulse::logging;
use rankpulse::services::{build_context, FsSnapshotStore};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    let env = get_environment();
    logging::init_logging(&env);
    info!("Starting Dashboard Worker");
    info!(environment = %env, "Environment");

    let config = PipelineConfig::from_env()?;
    let now = config
        .reference_time
        .unwrap_or_else(|| chrono::Local::now().naive_local());
    info!(
        history = %config.layout.history_dir.display(),
        catalog = %config.layout.catalog_path.display(),
        reference_time = %now,
        "Reference time: {}", now
    );

    let store = FsSnapshotStore::new(config.layout.clone());
    let ctx = build_context(&store, config.alias_policy, now)?;
    if !ctx.catalog.conflicts().is_empty() {
        warn!(
            conflicts = ctx.catalog.conflicts().len(),
            "Catalog has {} ambiguous aliases",
            ctx.catalog.conflicts().len()
        );
    }

    let runtime = DashboardRuntime::new(
        RuntimeConfig {
            concurrency: config.concurrency,
            output_dir: config.output_dir.clone(),
        },
        ctx,
    );
    let summary = runtime.run().await?;

    info!(
        games = summary.games,
        written = summary.written,
        "Worker finished: {} of {} games written",
        summary.written,
        summary.games
    );
    Ok(())
}

//! Batch runtime: assembles every game on the blocking pool and writes the pages

use crate::dashboard::{DashboardAssembler, DashboardContext};
use crate::error::{DashboardError, Error, Result};
use crate::models::dashboard::{GameDashboardData, SearchIndexEntry};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

pub const SEARCH_INDEX_FILE: &str = "search-index.json";

/// Canonical name with that game's assembly result
pub type GameOutcome = (String, std::result::Result<GameDashboardData, DashboardError>);

/// Configuration for the dashboard runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub concurrency: usize,
    pub output_dir: PathBuf,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            output_dir: PathBuf::from("output/games"),
        }
    }
}

/// Counts reported at the end of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub games: usize,
    pub written: usize,
    pub empty: usize,
    pub failed: usize,
}

pub struct DashboardRuntime {
    config: RuntimeConfig,
    ctx: Arc<DashboardContext>,
}

impl DashboardRuntime {
    pub fn new(config: RuntimeConfig, ctx: DashboardContext) -> Self {
        Self {
            config,
            ctx: Arc::new(ctx),
        }
    }

    /// Set custom concurrency (at least 1)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.config.concurrency = concurrency;
        self
    }

    pub fn context(&self) -> &DashboardContext {
        &self.ctx
    }

    /// Assemble every game, returning per-game results in catalog order
    pub async fn assemble(&self) -> Result<Vec<GameOutcome>> {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let mut tasks = JoinSet::new();

        for (index, identity) in self.ctx.catalog.iter().enumerate() {
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| Error::Task(e.to_string()))?;
            let ctx = self.ctx.clone();
            let identity = identity.clone();
            tasks.spawn_blocking(move || {
                let result = DashboardAssembler::assemble(&identity, &ctx);
                drop(permit);
                (index, identity.name, result)
            });
        }

        let mut results = Vec::with_capacity(self.ctx.catalog.len());
        while let Some(joined) = tasks.join_next().await {
            results.push(joined.map_err(|e| Error::Task(e.to_string()))?);
        }
        // Completion order depends on scheduling
        results.sort_by_key(|(index, _, _)| *index);

        Ok(results
            .into_iter()
            .map(|(_, name, result)| (name, result))
            .collect())
    }

    /// Assemble and write `<slug>.json` for every game with data, plus the search index.
    ///
    /// Pages left in `output_dir` by an earlier run are removed first.
    pub async fn run(&self) -> Result<RunSummary> {
        info!(
            games = self.ctx.catalog.len(),
            concurrency = self.config.concurrency,
            output_dir = %self.config.output_dir.display(),
            "DashboardRuntime: assembling {} games",
            self.ctx.catalog.len()
        );

        let results = self.assemble().await?;
        let output_dir = &self.config.output_dir;
        create_dir(output_dir)?;
        let removed = clear_pages(output_dir)?;
        if removed > 0 {
            debug!(removed, "Removed {} pages from the previous run", removed);
        }

        let mut summary = RunSummary {
            games: results.len(),
            ..RunSummary::default()
        };
        let mut slugs = HashSet::new();
        let mut index = Vec::new();

        for (name, result) in results {
            let data = match result {
                Ok(data) => data,
                Err(e) => {
                    warn!(game = %name, error = %e, "Failed to assemble '{}'", name);
                    summary.failed += 1;
                    continue;
                }
            };
            if !data.has_data() {
                summary.empty += 1;
                continue;
            }
            if !slugs.insert(data.slug.clone()) {
                warn!(game = %name, slug = %data.slug, "Slug '{}' already written, skipping '{}'", data.slug, name);
                summary.failed += 1;
                continue;
            }

            write_json(&output_dir.join(format!("{}.json", data.slug)), &data)?;
            index.push(SearchIndexEntry::from_dashboard(&data));
            summary.written += 1;
        }

        write_json(&output_dir.join(SEARCH_INDEX_FILE), &index)?;

        info!(
            written = summary.written,
            empty = summary.empty,
            failed = summary.failed,
            "DashboardRuntime: wrote {} pages ({} without data, {} failed)",
            summary.written,
            summary.empty,
            summary.failed
        );
        Ok(summary)
    }
}

fn create_dir(dir: &Path) -> std::result::Result<(), DashboardError> {
    std::fs::create_dir_all(dir).map_err(|source| DashboardError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

/// Delete every `*.json` file directly under `dir`, returning how many went
fn clear_pages(dir: &Path) -> std::result::Result<usize, DashboardError> {
    let io_error = |source| DashboardError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut removed = 0;
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            std::fs::remove_file(&path).map_err(|source| DashboardError::Io {
                path: path.clone(),
                source,
            })?;
            removed += 1;
        }
    }
    Ok(removed)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> std::result::Result<(), DashboardError> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    std::fs::write(path, text).map_err(|source| DashboardError::Io {
        path: path.to_path_buf(),
        source,
    })
}

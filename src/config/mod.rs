//! Run configuration: environment name, data layout and worker settings

use crate::error::{Error, Result};
use crate::identity::AliasConflictPolicy;
use chrono::NaiveDateTime;
use std::env;
use std::path::{Path, PathBuf};

/// Deployment environment (`APP_ENV`), defaults to `sandbox`
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

/// Where crawler and report output lives on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    pub catalog_path: PathBuf,
    pub history_dir: PathBuf,
    pub reports_dir: PathBuf,
    pub weekly_reports_dir: PathBuf,
    pub hourly_dir: PathBuf,
}

impl DataLayout {
    /// Standard layout under one data directory
    pub fn under(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        let reports_dir = data_dir.join("reports");
        Self {
            catalog_path: data_dir.join("games.json"),
            history_dir: data_dir.join("history"),
            weekly_reports_dir: reports_dir.join("weekly"),
            reports_dir,
            hourly_dir: data_dir.join("snapshots").join("rankings"),
        }
    }

    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = path.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub layout: DataLayout,
    pub output_dir: PathBuf,
    pub alias_policy: AliasConflictPolicy,
    pub concurrency: usize,
    /// Fixed "now" for reproducible runs; the wall clock is used when unset
    pub reference_time: Option<NaiveDateTime>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            layout: DataLayout::under("data"),
            output_dir: PathBuf::from("output/games"),
            alias_policy: AliasConflictPolicy::default(),
            concurrency: 4,
            reference_time: None,
        }
    }
}

impl PipelineConfig {
    /// Read overrides from the environment
    ///
    /// - `DATA_DIR`, `CATALOG_PATH`, `OUTPUT_DIR`
    /// - `ALIAS_POLICY` (`first` | `reject`)
    /// - `WORKER_CONCURRENCY` (> 0)
    /// - `REFERENCE_TIME` (`YYYY-MM-DDTHH:MM`)
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(dir) = env::var("DATA_DIR") {
            config.layout = DataLayout::under(dir);
        }
        if let Ok(path) = env::var("CATALOG_PATH") {
            config.layout = config.layout.with_catalog_path(path);
        }
        if let Ok(dir) = env::var("OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Ok(policy) = env::var("ALIAS_POLICY") {
            config.alias_policy = AliasConflictPolicy::parse(&policy)
                .ok_or_else(|| Error::Config(format!("unknown ALIAS_POLICY '{}'", policy)))?;
        }
        if let Ok(value) = env::var("WORKER_CONCURRENCY") {
            config.concurrency = value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| Error::Config(format!("WORKER_CONCURRENCY must be > 0, got '{}'", value)))?;
        }
        if let Ok(value) = env::var("REFERENCE_TIME") {
            config.reference_time = Some(parse_reference_time(&value)?);
        }

        Ok(config)
    }
}

/// Parse `YYYY-MM-DDTHH:MM` (seconds optional)
pub fn parse_reference_time(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| Error::Config(format!("REFERENCE_TIME must be YYYY-MM-DDTHH:MM, got '{}'", value)))
}

//! Error types for catalog loading, snapshot ingestion and dashboard assembly

use std::path::PathBuf;
use thiserror::Error;

/// Crate-level result type
pub type Result<T> = std::result::Result<T, Error>;

/// A persisted input file that could not be used. Callers log and skip it.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed CSV row {line} in {path}: {reason}")]
    CsvRow {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("no usable date for {0}")]
    MissingDate(PathBuf),

    #[error("report {0} has no ai section")]
    EmptyMentionSource(PathBuf),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("alias '{alias}' of '{second}' is already registered by '{first}'")]
    AmbiguousAlias {
        alias: String,
        first: String,
        second: String,
    },

    #[error("catalog entry with empty name")]
    EmptyName,
}

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("malformed identity: {0}")]
    MalformedIdentity(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize dashboard: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level error for a pipeline run
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Dashboard(#[from] DashboardError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("worker task failed: {0}")]
    Task(String),
}

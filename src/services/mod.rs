//! Ingestion of persisted crawler and report output.

pub mod csv;
pub mod fs_store;
pub mod store;

pub use fs_store::FsSnapshotStore;
pub use store::{build_context, SnapshotStore};

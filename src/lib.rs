//! Game identity resolution and ranking time series for per-game dashboard pages.

pub mod config;
pub mod core;
pub mod dashboard;
pub mod error;
pub mod identity;
pub mod logging;
pub mod mentions;
pub mod models;
pub mod series;
pub mod services;

pub use error::{Error, Result};

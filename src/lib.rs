pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::http::HttpFetcher;
pub use config::SearchConfig;
pub use crate::core::{
    harvest::{HarvestEngine, RunSummary},
    render::{OutputFormat, Renderer},
};
pub use utils::error::{HarvestError, Result};

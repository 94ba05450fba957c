pub mod config;
pub mod error;

// GitHub search integration
pub mod github;

// Multi-strategy trending discovery
pub mod trending;

// Record sinks
pub mod output;

pub mod cli;

// Utilities
pub mod utils;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
pub use trending::{TrendFetcher, TrendReason, TrendRecord};

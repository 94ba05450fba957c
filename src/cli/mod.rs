// Command-line viewer for trending repositories

pub mod commands;

use crate::github::query::Timeframe;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "devradar")]
#[command(about = "DevRadar - trending GitHub repositories at a glance", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show top trending repositories (new, recently active, then popular)
    Trending {
        /// Repository language to search
        #[arg(short, long, env = "DEVRADAR_LANGUAGE")]
        language: Option<String>,

        /// Maximum number of repositories
        #[arg(short = 'n', long, env = "DEVRADAR_LIMIT")]
        limit: Option<usize>,

        /// Write records to this JSON file instead of printing them
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show repositories created within a time window, most starred first
    Timeframe {
        /// Window to look back over
        #[arg(value_enum)]
        timeframe: Timeframe,

        /// Repository language to search
        #[arg(short, long, env = "DEVRADAR_LANGUAGE")]
        language: Option<String>,

        /// Maximum number of repositories
        #[arg(short = 'n', long, env = "DEVRADAR_LIMIT")]
        limit: Option<usize>,

        /// Write records to this JSON file instead of printing them
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fetch trending repositories on an interval until interrupted
    Watch {
        /// Repository language to search
        #[arg(short, long, env = "DEVRADAR_LANGUAGE")]
        language: Option<String>,

        /// Maximum number of repositories
        #[arg(short = 'n', long, env = "DEVRADAR_LIMIT")]
        limit: Option<usize>,

        /// Seconds between fetches
        #[arg(short, long, env = "DEVRADAR_WATCH_INTERVAL")]
        interval: Option<u64>,

        /// JSON file rewritten after every fetch
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

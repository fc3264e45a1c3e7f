//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Headless driver for the portfolio page controllers
#[derive(Parser, Debug)]
#[command(name = "portfolio-ui")]
#[command(version, about = "Drive the portfolio page controllers against a page fixture", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load a page fixture, replay an event script and print the final page
    Run {
        /// Page fixture (TOML)
        #[arg(long, short)]
        page: PathBuf,

        /// Event script (TOML)
        #[arg(long, short)]
        script: Option<PathBuf>,

        /// Keep running timers until this many milliseconds
        /// (default: the last script step)
        #[arg(long, value_name = "MS")]
        until: Option<u64>,

        /// Pace the run on the wall clock instead of virtual time
        #[arg(long)]
        realtime: bool,

        /// Base URL for relative form actions
        #[arg(long)]
        base_url: Option<String>,

        /// Config file path
        #[arg(long, short)]
        config: Option<PathBuf>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Config file path
        #[arg(long, short)]
        config: Option<PathBuf>,
    },
    /// Create default config file
    Init,
}

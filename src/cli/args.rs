//! CLI argument definitions using clap

use clap::{Parser, Subcommand};

/// Structural design patterns: composite org chart and caching download proxy
#[derive(Parser, Debug)]
#[command(name = "patternlab")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the sample org chart and aggregate revenue
    Composite {
        /// Seed for reproducible revenue figures
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Download keys repeatedly through the caching proxy
    Proxy {
        /// Keys to download
        #[arg(default_value = "a.jpg")]
        keys: Vec<String>,
        /// Requests per key
        #[arg(short, long, default_value_t = 5)]
        repeat: usize,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config path
    Path,
}

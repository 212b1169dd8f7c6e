//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// engage-lens: assign social accounts to engagement clusters using a fitted k-means model
#[derive(Parser, Debug)]
#[command(name = "engage-lens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze one account's stored posts and assign engagement clusters
    Analyze(AnalyzeArgs),

    /// Show the engagement cluster taxonomy
    Taxonomy(TaxonomyArgs),

    /// Configuration management
    Config(ConfigArgs),

    /// Validate configuration and show status
    Doctor(DoctorArgs),
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Account (screen name) to analyze
    pub account: String,

    /// Feature aggregation mode (per_post or aggregated)
    #[arg(long)]
    pub mode: Option<String>,

    /// Read posts from a JSON file instead of the configured source
    #[arg(long, conflicts_with = "db")]
    pub posts_file: Option<PathBuf>,

    /// Read posts from a SQLite database instead of the configured source
    #[arg(long, conflicts_with = "posts_file")]
    pub db: Option<PathBuf>,

    /// Override the model name under the models directory
    #[arg(long)]
    pub model_name: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct TaxonomyArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Init {
        /// Path to write config file
        #[arg(long, default_value = "./config.toml")]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

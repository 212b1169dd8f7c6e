//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub source: SourceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,

    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// Feature aggregation mode: per_post or aggregated
    #[serde(default = "default_mode")]
    pub mode: String,
}

/// Where stored posts are read from. The selection is an explicit
/// configuration value consumed by the adapter constructors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Post source kind: json, sqlite, or stub
    #[serde(default = "default_source_kind")]
    pub kind: String,

    #[serde(default = "default_posts_file")]
    pub posts_file: PathBuf,

    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_models_dir() -> PathBuf {
    PathBuf::from("./models")
}

fn default_model_name() -> String {
    "engagement_kmeans".to_string()
}

fn default_mode() -> String {
    "per_post".to_string()
}

fn default_source_kind() -> String {
    "json".to_string()
}

fn default_posts_file() -> PathBuf {
    PathBuf::from("./data/posts.json")
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./data/engage.db")
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            models_dir: default_models_dir(),
            model_name: default_model_name(),
            mode: default_mode(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: default_source_kind(),
            posts_file: default_posts_file(),
            db_path: default_db_path(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./config.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            // User specified a path that doesn't exist
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Add environment variable overrides
        builder = builder.add_source(
            config::Environment::with_prefix("ENGAGE_LENS")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# engage-lens configuration

[general]
log_level = "info"
models_dir = "./models"
# Artifacts are read from <models_dir>/<model_name>/{scaler.json, kmeans.json}
model_name = "engagement_kmeans"
# per_post: one feature row per post; aggregated: one row over summed counters
mode = "per_post"

[source]
kind = "json"  # json, sqlite, stub
posts_file = "./data/posts.json"
db_path = "./data/engage.db"
"#
        .to_string()
    }
}

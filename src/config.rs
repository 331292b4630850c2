//! Startup configuration.
//!
//! Resolution order, later wins:
//! 1. built-in defaults,
//! 2. a JSON file named by the `TWEETSCOPE_CONFIG` environment variable,
//! 3. the first command-line argument, taken as the data file path.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "TWEETSCOPE_CONFIG";

/// Rows per table page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Source column names for the fields the dashboard reads.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub category: String,
    pub text: String,
    pub sentiment: String,
    pub subjectivity: String,
    pub dim1: String,
    pub dim2: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            category: "Month".into(),
            text: "RawTweet".into(),
            sentiment: "Sentiment".into(),
            subjectivity: "Subjectivity".into(),
            dim1: "Dimension 1".into(),
            dim2: "Dimension 2".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Dataset opened at startup.
    pub data_path: PathBuf,
    pub page_size: usize,
    pub columns: ColumnNames,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("ProcessedTweets.csv"),
            page_size: DEFAULT_PAGE_SIZE,
            columns: ColumnNames::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse a JSON config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut config: DashboardConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.page_size = config.page_size.max(1);
        Ok(config)
    }

    /// Resolve the configuration from an optional config file and the
    /// command-line arguments (program name already stripped).
    pub fn resolve<I>(config_file: Option<&Path>, mut args: I) -> Result<Self>
    where
        I: Iterator<Item = String>,
    {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(data_path) = args.next() {
            config.data_path = PathBuf::from(data_path);
        }
        Ok(config)
    }

    /// Read `TWEETSCOPE_CONFIG` and the process arguments. A broken config
    /// file is logged and the defaults are used instead.
    pub fn from_env() -> Self {
        let config_file = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let args = || std::env::args().skip(1);
        match Self::resolve(config_file.as_deref(), args()) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring config file: {e:#}");
                Self::resolve(None, args()).unwrap_or_default()
            }
        }
    }
}

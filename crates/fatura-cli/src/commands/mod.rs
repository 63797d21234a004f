//! Subcommands and the helpers they share.

pub mod add;
pub mod batch;
pub mod config;
pub mod extract;
pub mod request;

use std::path::{Path, PathBuf};

use fatura_core::models::PageLayout;
use fatura_core::{load_layout, FaturaConfig};
use tracing::debug;

/// Output format for printed results.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fatura")
        .join("config.json")
}

pub fn default_batch_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fatura")
        .join("batch.json")
}

/// Load the explicit config file, else the default one if present, else defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<FaturaConfig> {
    if let Some(path) = path {
        return Ok(FaturaConfig::from_file(path)?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("using config {}", default_path.display());
        Ok(FaturaConfig::from_file(&default_path)?)
    } else {
        Ok(FaturaConfig::default())
    }
}

pub fn read_layout(path: Option<&Path>) -> anyhow::Result<Option<Vec<PageLayout>>> {
    match path {
        Some(path) => Ok(Some(load_layout(path)?)),
        None => Ok(None),
    }
}

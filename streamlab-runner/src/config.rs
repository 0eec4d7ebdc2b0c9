//! Serializable run configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Unique identifier for an analysis run (content-addressable hash).
pub type RunId = String;

/// Everything needed to reproduce one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    /// Source dataset path.
    pub input: PathBuf,

    /// Destination for the exported yearly summary table.
    pub export_path: PathBuf,

    /// Directory the two charts are written into.
    pub charts_dir: PathBuf,

    /// Years before this are excluded from the yearly summary and charts.
    pub stats_min_year: i64,

    /// Rows printed in the top-tracks report.
    pub top_tracks: usize,

    /// Groups printed in the yearly summary report.
    pub stats_print_limit: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("spotify-2023.csv"),
            export_path: PathBuf::from("yearly_stream_stats.csv"),
            charts_dir: PathBuf::from("charts"),
            stats_min_year: 2010,
            top_tracks: 10,
            stats_print_limit: 15,
        }
    }
}

impl RunConfig {
    /// Load a configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        toml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Computes a deterministic hash ID for this configuration.
    ///
    /// Two runs with identical configs share the same `RunId`.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("RunConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("failed to parse config: {0}")]
    Parse(String),
}

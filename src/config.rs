//! Configuration file for batch runs.
//!
//! Every field is optional in the JSON file; command-line flags override it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::ExportType;
use crate::tiled::TILED_VERSION;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings shared by every input file of a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutotilerConfig {
    /// Transparent pixels around every output tile.
    pub padding: u32,
    /// Skip the layouts with terrain 2 in the foreground.
    pub missing_terrain_two: bool,
    /// Layouts to produce; empty means all.
    pub exports: Vec<ExportType>,
    /// Write a Tiled descriptor next to every produced sheet.
    pub tiled: bool,
    pub terrain1_name: String,
    pub terrain2_name: String,
    pub tiled_version: String,
    /// Directory for intermediate rasters, if any.
    pub debug_dir: Option<PathBuf>,
}

impl Default for AutotilerConfig {
    fn default() -> Self {
        Self {
            padding: 0,
            missing_terrain_two: false,
            exports: Vec::new(),
            tiled: false,
            terrain1_name: "terrain1".to_string(),
            terrain2_name: "terrain2".to_string(),
            tiled_version: TILED_VERSION.to_string(),
            debug_dir: None,
        }
    }
}

impl AutotilerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

//! Error types for sheet unpacking and the file pipeline.

use thiserror::Error;

use crate::config::ConfigError;
use crate::tiled::TemplateError;

/// Errors raised by the unpacking core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnpackError {
    /// Sheet geometry, segmentation or padding cannot produce a usable sheet.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A six-pack layout was requested for a sheet that is not split into 6 tiles.
    #[error("invalid pack type: expected 6 tiles, sheet is split {x_tiles}x{y_tiles}")]
    InvalidPackType { x_tiles: u32, y_tiles: u32 },
}

/// Errors raised while processing one input file end to end.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Unpack(#[from] UnpackError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

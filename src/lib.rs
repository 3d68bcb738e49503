//! Autotile sheet unpacking library
//!
//! Expands a packed 2×3 "six-pack" terrain sheet into 16, 28 and 48 tile
//! autotile layouts by recombining tile quadrants and rotating composed tiles.

pub mod anchors;
pub mod canvas;
pub mod compose;
pub mod config;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod rotate;
pub mod sink;
pub mod tables;
pub mod tiled;
pub mod unpacker;

pub use error::{PipelineError, UnpackError};
pub use layout::{ExportType, Layout};
pub use unpacker::{Options, Unpacker};

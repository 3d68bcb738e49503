//! Tiled (`.tsx`) tileset descriptors for produced sheets.
//!
//! The descriptor only carries sheet metadata: tile geometry, the image it
//! points at and a corner wang set naming the two terrains.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tiled release the descriptor format follows.
pub const TILED_VERSION: &str = "1.10.2";

/// Version prefix the template is valid for.
const SUPPORTED_VERSION_PREFIX: &str = "1.10";

/// A field of [`TiledTemplate`] that failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemplateField {
    TilesetName,
    TileWidth,
    TileHeight,
    TileCount,
    Columns,
    Terrain1Name,
    Terrain2Name,
    ImageSource,
    ImageWidth,
    ImageHeight,
    TiledVersion,
}

impl fmt::Display for TemplateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TilesetName => write!(f, "invalid tileset name"),
            Self::TileWidth => write!(f, "invalid tile width"),
            Self::TileHeight => write!(f, "invalid tile height"),
            Self::TileCount => write!(f, "invalid tile count"),
            Self::Columns => write!(f, "invalid columns"),
            Self::Terrain1Name => write!(f, "invalid terrain1 name"),
            Self::Terrain2Name => write!(f, "invalid terrain2 name"),
            Self::ImageSource => write!(f, "invalid image source"),
            Self::ImageWidth => write!(f, "invalid image width"),
            Self::ImageHeight => write!(f, "invalid image height"),
            Self::TiledVersion => write!(f, "invalid tiled version, expected {}.x", SUPPORTED_VERSION_PREFIX),
        }
    }
}

/// Every invalid field of a template, reported together.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid template: {}", join_fields(.fields))]
pub struct TemplateError {
    pub fields: Vec<TemplateField>,
}

fn join_fields(fields: &[TemplateField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Metadata for one tileset descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TiledTemplate {
    pub tiled_version: String,
    pub tileset_name: String,
    pub tile_width: u32,
    pub tile_height: u32,
    pub tile_count: u32,
    pub columns: u32,
    /// Image path relative to the descriptor.
    pub image_source: String,
    pub image_width: u32,
    pub image_height: u32,
    pub terrain1_name: String,
    pub terrain2_name: String,
    /// Border around the sheet, in pixels.
    pub margin: u32,
    /// Gap between neighbouring tiles, in pixels.
    pub spacing: u32,
}

impl TiledTemplate {
    /// Validate every field and collect all failures.
    pub fn validate(&self) -> Result<(), TemplateError> {
        let mut fields = Vec::new();

        if self.tileset_name.is_empty() {
            fields.push(TemplateField::TilesetName);
        }
        if self.tile_width == 0 {
            fields.push(TemplateField::TileWidth);
        }
        if self.tile_height == 0 {
            fields.push(TemplateField::TileHeight);
        }
        if self.tile_count == 0 {
            fields.push(TemplateField::TileCount);
        }
        if self.columns == 0 {
            fields.push(TemplateField::Columns);
        }
        if self.terrain1_name.is_empty() {
            fields.push(TemplateField::Terrain1Name);
        }
        if self.terrain2_name.is_empty() {
            fields.push(TemplateField::Terrain2Name);
        }
        if self.image_source.is_empty() {
            fields.push(TemplateField::ImageSource);
        }
        if self.image_width == 0 {
            fields.push(TemplateField::ImageWidth);
        }
        if self.image_height == 0 {
            fields.push(TemplateField::ImageHeight);
        }
        if !self.tiled_version.starts_with(SUPPORTED_VERSION_PREFIX) {
            fields.push(TemplateField::TiledVersion);
        }

        if fields.is_empty() {
            Ok(())
        } else {
            Err(TemplateError { fields })
        }
    }

    /// Render the `.tsx` document. Validates first.
    pub fn render(&self) -> Result<String, TemplateError> {
        self.validate()?;
        Ok(self.to_string())
    }

    /// Write `<tileset_name>.tsx` into `dir` and return its path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, crate::error::PipelineError> {
        let document = self.render()?;
        let path = dir.join(format!("{}.tsx", self.tileset_name));
        std::fs::write(&path, document)?;
        Ok(path)
    }
}

impl fmt::Display for TiledTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            f,
            r#"<tileset version="1.10" tiledversion="{}" name="{}" tilewidth="{}" tileheight="{}" spacing="{}" margin="{}" tilecount="{}" columns="{}">"#,
            escape(&self.tiled_version),
            escape(&self.tileset_name),
            self.tile_width,
            self.tile_height,
            self.spacing,
            self.margin,
            self.tile_count,
            self.columns,
        )?;
        writeln!(
            f,
            r#" <image source="{}" width="{}" height="{}"/>"#,
            escape(&self.image_source),
            self.image_width,
            self.image_height,
        )?;
        writeln!(f, " <wangsets>")?;
        writeln!(
            f,
            r#"  <wangset name="{}" type="corner" tile="-1">"#,
            escape(&self.tileset_name)
        )?;
        writeln!(
            f,
            r##"   <wangcolor name="{}" color="#ff0000" tile="-1" probability="1"/>"##,
            escape(&self.terrain1_name)
        )?;
        writeln!(
            f,
            r##"   <wangcolor name="{}" color="#00ff00" tile="-1" probability="1"/>"##,
            escape(&self.terrain2_name)
        )?;
        writeln!(f, "  </wangset>")?;
        writeln!(f, " </wangsets>")?;
        writeln!(f, "</tileset>")
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

//! Output layouts produced from a six-pack sheet.

use serde::{Deserialize, Serialize};

/// Export type as requested on the command line or in the config file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum ExportType {
    #[serde(rename = "16")]
    #[value(name = "16")]
    Sixteen,
    #[serde(rename = "28")]
    #[value(name = "28")]
    TwentyEight,
    #[serde(rename = "48")]
    #[value(name = "48")]
    FortyEight,
    #[serde(rename = "all")]
    #[value(name = "all")]
    All,
}

/// One concrete output sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layout {
    Sixteen1,
    Sixteen2,
    TwentyEight,
    FortyEight1,
    FortyEight2,
}

impl Layout {
    pub fn all() -> &'static [Self] {
        &[
            Self::Sixteen1,
            Self::Sixteen2,
            Self::TwentyEight,
            Self::FortyEight1,
            Self::FortyEight2,
        ]
    }

    /// File name prefix for this layout.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Sixteen1 => "16x1_terrain1",
            Self::Sixteen2 => "16x1_terrain2",
            Self::TwentyEight => "14x2",
            Self::FortyEight1 => "12x4_terrain1",
            Self::FortyEight2 => "12x4_terrain2",
        }
    }

    /// Grid size as `(columns, rows)`.
    pub fn grid(&self) -> (u32, u32) {
        match self {
            Self::Sixteen1 | Self::Sixteen2 => (16, 1),
            Self::TwentyEight => (14, 2),
            Self::FortyEight1 | Self::FortyEight2 => (12, 4),
        }
    }

    pub fn tile_count(&self) -> u32 {
        let (columns, rows) = self.grid();
        columns * rows
    }

    /// Whether the layout puts terrain 2 in the foreground.
    pub fn requires_terrain_two(&self) -> bool {
        matches!(self, Self::Sixteen2 | Self::FortyEight2)
    }

    /// Expand export types into layouts, in request order without duplicates.
    /// An empty list or any `all` selects everything.
    pub fn from_exports(exports: &[ExportType], missing_terrain_two: bool) -> Vec<Self> {
        let expanded: Vec<Self> = if exports.is_empty() || exports.contains(&ExportType::All) {
            Self::all().to_vec()
        } else {
            exports
                .iter()
                .flat_map(|export| match export {
                    ExportType::Sixteen => vec![Self::Sixteen1, Self::Sixteen2],
                    ExportType::TwentyEight => vec![Self::TwentyEight],
                    ExportType::FortyEight => vec![Self::FortyEight1, Self::FortyEight2],
                    ExportType::All => Vec::new(),
                })
                .collect()
        };

        let mut layouts = Vec::with_capacity(expanded.len());
        for layout in expanded {
            if missing_terrain_two && layout.requires_terrain_two() {
                continue;
            }
            if !layouts.contains(&layout) {
                layouts.push(layout);
            }
        }
        layouts
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

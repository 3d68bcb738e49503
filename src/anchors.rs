//! Anchor grid: pixel origins of every sub-tile in a packed source sheet.
//!
//! A sheet split into `x_tiles × y_tiles` tiles, with every tile cut into
//! `segments × segments` pieces, has `(x_tiles·segments) × (y_tiles·segments)`
//! sub-tiles. The grid maps sub-tile coordinates to the top-left pixel of
//! that piece in the sheet.

use crate::error::UnpackError;

/// Precomputed sub-tile origins, indexed `[x][y]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnchorGrid {
    tile_width: u32,
    tile_height: u32,
    segments: u32,
    points: Vec<Vec<(u32, u32)>>,
}

impl AnchorGrid {
    /// Build the grid for a sheet with the given tile size and tile counts.
    pub fn build(
        tile_width: u32,
        tile_height: u32,
        x_tiles: u32,
        y_tiles: u32,
        segments: u32,
    ) -> Result<Self, UnpackError> {
        if segments == 0 {
            return Err(UnpackError::Configuration(
                "segmentation factor must be positive".to_string(),
            ));
        }
        if x_tiles == 0 || y_tiles == 0 {
            return Err(UnpackError::Configuration(format!(
                "tile counts must be positive, got {}x{}",
                x_tiles, y_tiles
            )));
        }
        if tile_width == 0 || tile_height == 0 {
            return Err(UnpackError::Configuration(format!(
                "tile dimensions must be positive, got {}x{}",
                tile_width, tile_height
            )));
        }

        let columns = x_tiles * segments;
        let rows = y_tiles * segments;
        let points = (0..columns)
            .map(|x| {
                (0..rows)
                    .map(|y| point(tile_width, tile_height, x, y, segments))
                    .collect()
            })
            .collect();

        Ok(Self {
            tile_width,
            tile_height,
            segments,
            points,
        })
    }

    /// Number of sub-tile columns (x axis).
    pub fn columns(&self) -> usize {
        self.points.len()
    }

    /// Number of sub-tile rows (y axis).
    pub fn rows(&self) -> usize {
        self.points.first().map_or(0, Vec::len)
    }

    pub fn segments(&self) -> u32 {
        self.segments
    }

    /// Size in pixels of one sub-tile piece.
    pub fn piece_size(&self) -> (u32, u32) {
        (
            self.tile_width / self.segments,
            self.tile_height / self.segments,
        )
    }

    /// Origin of sub-tile `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<(u32, u32)> {
        self.points.get(x)?.get(y).copied()
    }

    /// Origin computed directly from the sheet geometry, without bounds checks.
    pub fn point(&self, x: u32, y: u32) -> (u32, u32) {
        point(self.tile_width, self.tile_height, x, y, self.segments)
    }
}

fn point(tile_width: u32, tile_height: u32, x: u32, y: u32, segments: u32) -> (u32, u32) {
    (x * tile_width / segments, y * tile_height / segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_pack_grid_dimensions() {
        let grid = AnchorGrid::build(64, 64, 2, 3, 2).unwrap();
        assert_eq!(grid.columns(), 4);
        assert_eq!(grid.rows(), 6);
        assert_eq!(grid.get(1, 2), Some((32, 64)));
        assert_eq!(grid.get(3, 5), Some((96, 160)));
        assert_eq!(grid.get(4, 0), None);
        assert_eq!(grid.get(0, 6), None);
    }

    #[test]
    fn test_rectangular_tiles() {
        let grid = AnchorGrid::build(16, 24, 2, 3, 2).unwrap();
        assert_eq!(grid.piece_size(), (8, 12));
        assert_eq!(grid.get(3, 1), Some((24, 12)));
        assert_eq!(grid.point(3, 1), (24, 12));
    }

    #[test]
    fn test_rejects_non_positive_inputs() {
        assert!(matches!(
            AnchorGrid::build(64, 64, 2, 3, 0),
            Err(UnpackError::Configuration(_))
        ));
        assert!(matches!(
            AnchorGrid::build(64, 64, 0, 3, 2),
            Err(UnpackError::Configuration(_))
        ));
        assert!(matches!(
            AnchorGrid::build(64, 64, 2, 0, 2),
            Err(UnpackError::Configuration(_))
        ));
        assert!(matches!(
            AnchorGrid::build(0, 64, 2, 3, 2),
            Err(UnpackError::Configuration(_))
        ));
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = AnchorGrid::build(48, 48, 2, 3, 2).unwrap();
        let b = AnchorGrid::build(48, 48, 2, 3, 2).unwrap();
        assert_eq!(a, b);
    }
}

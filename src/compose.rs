//! Quadrant composition: building output tiles out of source sub-tiles.

use image::RgbaImage;

use crate::anchors::AnchorGrid;
use crate::canvas::{blit, cell_origin};
use crate::tables::CornerState;

/// Assembles output tiles from quadrant patches of a source sheet.
///
/// The composer trusts its tables: a sub-tile outside the anchor grid is an
/// internal fault and panics instead of producing a corrupted tile.
pub struct QuadComposer<'a> {
    source: &'a RgbaImage,
    anchors: &'a AnchorGrid,
    tile_width: u32,
    tile_height: u32,
    padding: u32,
}

impl<'a> QuadComposer<'a> {
    pub fn new(
        source: &'a RgbaImage,
        anchors: &'a AnchorGrid,
        tile_width: u32,
        tile_height: u32,
        padding: u32,
    ) -> Self {
        Self {
            source,
            anchors,
            tile_width,
            tile_height,
            padding,
        }
    }

    /// Compose `state` into tile `idx` of a padded sheet `out_cols` tiles wide.
    pub fn compose(&self, canvas: &mut RgbaImage, state: &CornerState, idx: u32, out_cols: u32) {
        let row = idx / out_cols;
        let col = idx % out_cols;
        let origin = cell_origin(col, row, self.tile_width, self.tile_height, self.padding);
        self.compose_at(canvas, state, origin);
    }

    /// Compose `state` into a fresh, unpadded tile.
    pub fn compose_tile(&self, state: &CornerState) -> RgbaImage {
        let mut tile = RgbaImage::new(self.tile_width, self.tile_height);
        self.compose_at(&mut tile, state, (0, 0));
        tile
    }

    fn compose_at(&self, canvas: &mut RgbaImage, state: &CornerState, origin: (u32, u32)) {
        let Some(quads) = state.quadrants() else {
            return;
        };
        let segments = self.anchors.segments();
        let (piece_width, piece_height) = self.anchors.piece_size();

        for (i, &(x, y)) in quads.iter().enumerate() {
            let Some(anchor) = self.anchors.get(x as usize, y as usize) else {
                panic!(
                    "sub-tile ({}, {}) outside {}x{} anchor grid",
                    x,
                    y,
                    self.anchors.columns(),
                    self.anchors.rows()
                );
            };
            let i = i as u32;
            let shift_x = (i % segments) * piece_width;
            let shift_y = (i / segments) * piece_height;
            blit(
                canvas,
                (origin.0 + shift_x, origin.1 + shift_y),
                self.source,
                anchor,
                (piece_width, piece_height),
            );
        }
    }
}

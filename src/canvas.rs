//! Tile-addressed writes over an output raster.

use image::RgbaImage;

use crate::error::UnpackError;
use crate::rotate::rotate_left90;

/// Largest sheet a canvas will allocate, in pixels (4 GiB of RGBA).
pub const MAX_SHEET_PIXELS: u64 = 1 << 30;

/// Pixel origin of cell `(col, row)` in a padded sheet.
///
/// Every tile is surrounded by `padding` pixels on all sides, so gutters
/// between neighbours are `2·padding` wide and the sheet border is `padding`.
pub fn cell_origin(col: u32, row: u32, tile_width: u32, tile_height: u32, padding: u32) -> (u32, u32) {
    (
        col * tile_width + padding + 2 * padding * col,
        row * tile_height + padding + 2 * padding * row,
    )
}

/// Copy a `size` rectangle from `src` at `src_origin` to `dst` at `dst_origin`.
///
/// The rectangle is clipped against both rasters; pixels are replaced, not blended.
pub fn blit(
    dst: &mut RgbaImage,
    dst_origin: (u32, u32),
    src: &RgbaImage,
    src_origin: (u32, u32),
    size: (u32, u32),
) {
    let width = size
        .0
        .min(dst.width().saturating_sub(dst_origin.0))
        .min(src.width().saturating_sub(src_origin.0)) as usize;
    let height = size
        .1
        .min(dst.height().saturating_sub(dst_origin.1))
        .min(src.height().saturating_sub(src_origin.1)) as usize;
    if width == 0 || height == 0 {
        return;
    }

    let src_stride = src.width() as usize * 4;
    let dst_stride = dst.width() as usize * 4;
    let span = width * 4;
    let src_px = src.as_raw();
    let dst_px: &mut [u8] = dst;

    for line in 0..height {
        let s = (src_origin.1 as usize + line) * src_stride + src_origin.0 as usize * 4;
        let d = (dst_origin.1 as usize + line) * dst_stride + dst_origin.0 as usize * 4;
        dst_px[d..d + span].copy_from_slice(&src_px[s..s + span]);
    }
}

/// Padded sheet dimensions, or `None` if they overflow or pass the pixel limit.
pub fn sheet_size(
    columns: u32,
    rows: u32,
    tile_width: u32,
    tile_height: u32,
    padding: u32,
) -> Option<(u32, u32)> {
    let gutter = padding.checked_mul(2)?;
    let width = tile_width.checked_add(gutter)?.checked_mul(columns)?;
    let height = tile_height.checked_add(gutter)?.checked_mul(rows)?;
    (u64::from(width) * u64::from(height) <= MAX_SHEET_PIXELS).then_some((width, height))
}

/// An output sheet of `columns × rows` equally sized tiles with optional padding.
pub struct TileCanvas {
    canvas: RgbaImage,
    tile_width: u32,
    tile_height: u32,
    padding: u32,
}

impl TileCanvas {
    /// Allocate a transparent sheet. Fails when the padded size does not fit
    /// in `u32` or exceeds [`MAX_SHEET_PIXELS`].
    pub fn new(
        columns: u32,
        rows: u32,
        tile_width: u32,
        tile_height: u32,
        padding: u32,
    ) -> Result<Self, UnpackError> {
        let (width, height) = sheet_size(columns, rows, tile_width, tile_height, padding)
            .ok_or_else(|| {
                UnpackError::Configuration(format!(
                    "{}x{} sheet of {}x{} px tiles with {} px padding is too large",
                    columns, rows, tile_width, tile_height, padding
                ))
            })?;
        Ok(Self {
            canvas: RgbaImage::new(width, height),
            tile_width,
            tile_height,
            padding,
        })
    }

    pub fn cell_origin(&self, col: u32, row: u32) -> (u32, u32) {
        cell_origin(col, row, self.tile_width, self.tile_height, self.padding)
    }

    /// Write a pre-composed tile into cell `(col, row)`.
    pub fn set_tile(&mut self, col: u32, row: u32, tile: &RgbaImage) {
        let origin = self.cell_origin(col, row);
        blit(
            &mut self.canvas,
            origin,
            tile,
            (0, 0),
            (self.tile_width, self.tile_height),
        );
    }

    /// Copy of the tile in cell `(col, row)`, without padding.
    pub fn get_tile(&self, col: u32, row: u32) -> RgbaImage {
        let mut tile = RgbaImage::new(self.tile_width, self.tile_height);
        blit(
            &mut tile,
            (0, 0),
            &self.canvas,
            self.cell_origin(col, row),
            (self.tile_width, self.tile_height),
        );
        tile
    }

    /// Rotate `tile` left, write it into `(col, row)` and hand the rotation back
    /// so the next quarter turn can start from it.
    pub fn set_tile_with_rotation_left(&mut self, col: u32, row: u32, tile: &RgbaImage) -> RgbaImage {
        let rotated = rotate_left90(tile);
        self.set_tile(col, row, &rotated);
        rotated
    }

    pub fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.canvas
    }

    pub fn into_inner(self) -> RgbaImage {
        self.canvas
    }
}

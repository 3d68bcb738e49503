//! Quarter-turn rotation of RGBA rasters.
//!
//! Each destination row of a left rotation is one source column read top to
//! bottom. Rows are independent, so they are filled in parallel on the rayon
//! pool (one worker per available processor); the call returns once every row
//! has been written.

use image::RgbaImage;
use rayon::prelude::*;

/// Bytes per RGBA8 pixel.
const CHANNELS: usize = 4;

/// Rotate 90 degrees counter-clockwise into a new raster.
///
/// For a `w×h` input the output is `h×w`, with
/// `output(x, y) = input(w - 1 - y, x)`. On square tiles this is
/// `output[y][x] = input[x][h - 1 - y]` in row-major terms, and four
/// applications reproduce the input exactly.
pub fn rotate_left90(src: &RgbaImage) -> RgbaImage {
    let (width, height) = src.dimensions();
    let mut dst = RgbaImage::new(height, width);
    let row_len = height as usize * CHANNELS;
    if row_len == 0 || width == 0 {
        return dst;
    }

    let pixels: &mut [u8] = &mut dst;
    pixels
        .par_chunks_exact_mut(row_len)
        .enumerate()
        .for_each(|(dst_y, row)| {
            let src_x = width - 1 - dst_y as u32;
            scan(src, row, src_x, 0, src_x + 1, height);
        });

    dst
}

/// Copy the source rectangle `[x1, x2) × [y1, y2)` into `dst`, rows packed
/// back to back.
///
/// Single-pixel-wide columns take a per-channel path; wider spans copy whole
/// row ranges. Both produce the same bytes.
fn scan(src: &RgbaImage, dst: &mut [u8], x1: u32, y1: u32, x2: u32, y2: u32) {
    let src_stride = src.width() as usize * CHANNELS;
    let size = (x2 - x1) as usize * CHANNELS;
    let src_px = src.as_raw();
    let mut src_offset = y1 as usize * src_stride + x1 as usize * CHANNELS;
    let mut dst_offset = 0;

    if size == CHANNELS {
        for _ in y1..y2 {
            let s = &src_px[src_offset..src_offset + CHANNELS];
            let d = &mut dst[dst_offset..dst_offset + CHANNELS];
            d[0] = s[0];
            d[1] = s[1];
            d[2] = s[2];
            d[3] = s[3];
            src_offset += src_stride;
            dst_offset += size;
        }
    } else {
        for _ in y1..y2 {
            dst[dst_offset..dst_offset + size]
                .copy_from_slice(&src_px[src_offset..src_offset + size]);
            src_offset += src_stride;
            dst_offset += size;
        }
    }
}

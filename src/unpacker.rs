//! Layout expanders: turn a packed six-tile sheet into full autotile sheets.
//!
//! Every expander checks the pack type before allocating its output, composes
//! tiles from the static corner-state tables and, for the 48 layout, fills the
//! remaining cells with left rotations of each composed base tile.

use image::RgbaImage;

use crate::anchors::AnchorGrid;
use crate::canvas::TileCanvas;
use crate::compose::QuadComposer;
use crate::error::UnpackError;
use crate::layout::Layout;
use crate::sink::RasterSink;
use crate::tables::{self, CornerState, Placement};

/// Tiles in a six-pack sheet.
pub const SIX_PACK_TILES: u32 = 6;

/// Tiles are cut into halves along each axis.
pub const QUADRANT_SEGMENTS: u32 = 2;

/// Per-run unpacking options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// Transparent pixels around every output tile.
    pub padding: u32,
    /// The sheet has no usable terrain 2 foreground; skip terrain 2 layouts.
    pub missing_terrain_two: bool,
}

/// Expands one decoded source sheet into output layouts.
pub struct Unpacker<'a> {
    source: &'a RgbaImage,
    anchors: AnchorGrid,
    tile_width: u32,
    tile_height: u32,
    x_tiles: u32,
    y_tiles: u32,
    options: Options,
    sink: Option<&'a dyn RasterSink>,
}

impl<'a> Unpacker<'a> {
    /// Split `source` into `x_tiles × y_tiles` tiles and build its anchor grid.
    pub fn new(
        source: &'a RgbaImage,
        x_tiles: u32,
        y_tiles: u32,
        options: Options,
    ) -> Result<Self, UnpackError> {
        if x_tiles == 0 || y_tiles == 0 {
            return Err(UnpackError::Configuration(format!(
                "tile counts must be positive, got {}x{}",
                x_tiles, y_tiles
            )));
        }
        let tile_width = source.width() / x_tiles;
        let tile_height = source.height() / y_tiles;
        let anchors = AnchorGrid::build(tile_width, tile_height, x_tiles, y_tiles, QUADRANT_SEGMENTS)?;

        log::debug!(
            "Unpacker: {}x{} sheet, {}x{} tiles of {}x{} px",
            source.width(),
            source.height(),
            x_tiles,
            y_tiles,
            tile_width,
            tile_height
        );

        Ok(Self {
            source,
            anchors,
            tile_width,
            tile_height,
            x_tiles,
            y_tiles,
            options,
            sink: None,
        })
    }

    /// Route composed intermediate tiles to `sink`.
    pub fn with_sink(mut self, sink: &'a dyn RasterSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn tile_size(&self) -> (u32, u32) {
        (self.tile_width, self.tile_height)
    }

    /// Produce the sheet for `layout`.
    pub fn unpack(&self, layout: Layout) -> Result<RgbaImage, UnpackError> {
        match layout {
            Layout::Sixteen1 => self.from_6_to_16_terrain1(),
            Layout::Sixteen2 => self.from_6_to_16_terrain2(),
            Layout::TwentyEight => self.from_6_to_28(),
            Layout::FortyEight1 => self.from_6_to_48_terrain1(),
            Layout::FortyEight2 => self.from_6_to_48_terrain2(),
        }
    }

    /// 16×1 sheet with terrain 1 in the foreground.
    pub fn from_6_to_16_terrain1(&self) -> Result<RgbaImage, UnpackError> {
        self.check_six_pack()?;
        self.compose_sheet(&tables::TERRAIN1_16, 16, 1)
    }

    /// 16×1 sheet with terrain 2 in the foreground.
    pub fn from_6_to_16_terrain2(&self) -> Result<RgbaImage, UnpackError> {
        self.check_six_pack()?;
        self.compose_sheet(&tables::TERRAIN2_16, 16, 1)
    }

    /// 14×2 dual terrain sheet: the whole corner-state table in order.
    pub fn from_6_to_28(&self) -> Result<RgbaImage, UnpackError> {
        self.check_six_pack()?;
        self.compose_sheet(&tables::CORNER_STATES, 14, 2)
    }

    /// 12×4 sheet with terrain 1 in the foreground.
    pub fn from_6_to_48_terrain1(&self) -> Result<RgbaImage, UnpackError> {
        self.from_6_to_48(&tables::TERRAIN1_48, "48_terrain1")
    }

    /// 12×4 sheet with terrain 2 in the foreground.
    pub fn from_6_to_48_terrain2(&self) -> Result<RgbaImage, UnpackError> {
        self.from_6_to_48(&tables::TERRAIN2_48, "48_terrain2")
    }

    fn from_6_to_48(&self, plan: &[Placement], label: &str) -> Result<RgbaImage, UnpackError> {
        self.check_six_pack()?;
        if self.tile_width != self.tile_height {
            return Err(UnpackError::Configuration(format!(
                "48 tile layouts rotate tiles and need square tiles, got {}x{}",
                self.tile_width, self.tile_height
            )));
        }

        let composer = self.composer();
        let mut canvas = TileCanvas::new(
            12,
            4,
            self.tile_width,
            self.tile_height,
            self.options.padding,
        )?;

        for (n, placement) in plan.iter().enumerate() {
            let base = composer.compose_tile(&placement.base.corner_state());
            if let Some(sink) = self.sink {
                sink.accept(&format!("{}_base_{}", label, n), &base);
            }

            let (col, row) = placement.cell;
            canvas.set_tile(col, row, &base);

            let mut tile = base;
            for &(col, row) in placement.rotations {
                tile = canvas.set_tile_with_rotation_left(col, row, &tile);
            }
        }

        log::debug!("Composed {} ({} base tiles)", label, plan.len());
        Ok(canvas.into_inner())
    }

    fn compose_sheet(
        &self,
        states: &[CornerState],
        columns: u32,
        rows: u32,
    ) -> Result<RgbaImage, UnpackError> {
        let composer = self.composer();
        let mut canvas = TileCanvas::new(
            columns,
            rows,
            self.tile_width,
            self.tile_height,
            self.options.padding,
        )?;
        for (idx, state) in states.iter().enumerate() {
            composer.compose(canvas.image_mut(), state, idx as u32, columns);
        }
        log::debug!("Composed {}x{} sheet from {} corner states", columns, rows, states.len());
        Ok(canvas.into_inner())
    }

    fn composer(&self) -> QuadComposer<'_> {
        QuadComposer::new(
            self.source,
            &self.anchors,
            self.tile_width,
            self.tile_height,
            self.options.padding,
        )
    }

    fn check_six_pack(&self) -> Result<(), UnpackError> {
        if self.x_tiles * self.y_tiles != SIX_PACK_TILES {
            return Err(UnpackError::InvalidPackType {
                x_tiles: self.x_tiles,
                y_tiles: self.y_tiles,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::blit;
    use crate::rotate::rotate_left90;
    use crate::sink::MemorySink;
    use crate::tables::CORNER_STATES;
    use image::Rgba;

    const TILE: u32 = 8;

    /// 2x3 sheet of 8x8 tiles; each pixel stores its own sheet coordinate.
    fn coordinate_sheet() -> RgbaImage {
        RgbaImage::from_fn(2 * TILE, 3 * TILE, |x, y| Rgba([x as u8, y as u8, 128, 255]))
    }

    fn tile_at(sheet: &RgbaImage, col: u32, row: u32, padding: u32) -> RgbaImage {
        let stride = TILE + 2 * padding;
        let mut tile = RgbaImage::new(TILE, TILE);
        blit(
            &mut tile,
            (0, 0),
            sheet,
            (col * stride + padding, row * stride + padding),
            (TILE, TILE),
        );
        tile
    }

    fn single(sheet: &RgbaImage, state: &CornerState) -> RgbaImage {
        let anchors = AnchorGrid::build(TILE, TILE, 2, 3, 2).unwrap();
        QuadComposer::new(sheet, &anchors, TILE, TILE, 0).compose_tile(state)
    }

    #[test]
    fn test_28_layout() {
        let sheet = coordinate_sheet();
        let unpacker = Unpacker::new(&sheet, 2, 3, Options::default()).unwrap();
        let out = unpacker.from_6_to_28().unwrap();
        assert_eq!(out.dimensions(), (14 * TILE, 2 * TILE));

        for (idx, state) in CORNER_STATES.iter().enumerate() {
            let idx = idx as u32;
            assert_eq!(tile_at(&out, idx % 14, idx / 14, 0), single(&sheet, state));
        }
    }

    #[test]
    fn test_16_terrain1_tail_is_swapped() {
        let sheet = coordinate_sheet();
        let unpacker = Unpacker::new(&sheet, 2, 3, Options::default()).unwrap();
        let out = unpacker.from_6_to_16_terrain1().unwrap();
        assert_eq!(out.dimensions(), (16 * TILE, TILE));
        assert_eq!(tile_at(&out, 0, 0, 0), single(&sheet, &CORNER_STATES[0]));
        assert_eq!(tile_at(&out, 13, 0, 0), single(&sheet, &CORNER_STATES[13]));
        assert_eq!(tile_at(&out, 14, 0, 0), single(&sheet, &CORNER_STATES[15]));
        assert_eq!(tile_at(&out, 15, 0, 0), single(&sheet, &CORNER_STATES[14]));
    }

    #[test]
    fn test_16_terrain2_tail_is_swapped() {
        let sheet = coordinate_sheet();
        let unpacker = Unpacker::new(&sheet, 2, 3, Options::default()).unwrap();
        let out = unpacker.from_6_to_16_terrain2().unwrap();
        assert_eq!(out.dimensions(), (16 * TILE, TILE));
        assert_eq!(tile_at(&out, 0, 0, 0), single(&sheet, &CORNER_STATES[14]));
        assert_eq!(tile_at(&out, 13, 0, 0), single(&sheet, &CORNER_STATES[27]));
        assert_eq!(tile_at(&out, 14, 0, 0), single(&sheet, &CORNER_STATES[1]));
        assert_eq!(tile_at(&out, 15, 0, 0), single(&sheet, &CORNER_STATES[0]));
    }

    #[test]
    fn test_48_layouts_place_bases_and_rotations() {
        let sheet = coordinate_sheet();
        let unpacker = Unpacker::new(&sheet, 2, 3, Options::default()).unwrap();

        for (out, plan) in [
            (unpacker.from_6_to_48_terrain1().unwrap(), &tables::TERRAIN1_48),
            (unpacker.from_6_to_48_terrain2().unwrap(), &tables::TERRAIN2_48),
        ] {
            assert_eq!(out.dimensions(), (12 * TILE, 4 * TILE));
            for placement in plan.iter() {
                let mut expected = single(&sheet, &placement.base.corner_state());
                let (col, row) = placement.cell;
                assert_eq!(tile_at(&out, col, row, 0), expected);
                for &(col, row) in placement.rotations {
                    expected = rotate_left90(&expected);
                    assert_eq!(tile_at(&out, col, row, 0), expected);
                }
            }
        }
    }

    #[test]
    fn test_48_requires_six_pack() {
        let sheet = RgbaImage::new(2 * TILE, 2 * TILE);
        let unpacker = Unpacker::new(&sheet, 2, 2, Options::default()).unwrap();
        assert_eq!(
            unpacker.from_6_to_48_terrain1(),
            Err(UnpackError::InvalidPackType { x_tiles: 2, y_tiles: 2 })
        );
        assert!(matches!(
            unpacker.from_6_to_48_terrain2(),
            Err(UnpackError::InvalidPackType { .. })
        ));
        assert!(matches!(
            unpacker.from_6_to_28(),
            Err(UnpackError::InvalidPackType { .. })
        ));
        assert!(matches!(
            unpacker.from_6_to_16_terrain1(),
            Err(UnpackError::InvalidPackType { .. })
        ));
    }

    #[test]
    fn test_48_requires_square_tiles() {
        let sheet = RgbaImage::new(2 * TILE, 3 * TILE * 2);
        let unpacker = Unpacker::new(&sheet, 2, 3, Options::default()).unwrap();
        assert!(matches!(
            unpacker.from_6_to_48_terrain1(),
            Err(UnpackError::Configuration(_))
        ));
        // composition alone works on rectangular tiles
        assert_eq!(
            unpacker.from_6_to_28().unwrap().dimensions(),
            (14 * TILE, 2 * 2 * TILE)
        );
    }

    #[test]
    fn test_zero_tile_counts_rejected() {
        let sheet = coordinate_sheet();
        assert!(matches!(
            Unpacker::new(&sheet, 0, 3, Options::default()),
            Err(UnpackError::Configuration(_))
        ));
    }

    #[test]
    fn test_padding_changes_geometry_not_content() {
        let sheet = coordinate_sheet();
        let plain = Unpacker::new(&sheet, 2, 3, Options::default()).unwrap();
        let options = Options {
            padding: 2,
            missing_terrain_two: false,
        };
        let padded = Unpacker::new(&sheet, 2, 3, options).unwrap();

        for layout in Layout::all() {
            let a = plain.unpack(*layout).unwrap();
            let b = padded.unpack(*layout).unwrap();
            let (columns, rows) = layout.grid();
            assert_eq!(b.dimensions(), (columns * (TILE + 4), rows * (TILE + 4)));
            for row in 0..rows {
                for col in 0..columns {
                    assert_eq!(tile_at(&a, col, row, 0), tile_at(&b, col, row, 2));
                }
            }
            assert_eq!(b.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
            assert_eq!(b.get_pixel(TILE + 2, 2), &Rgba([0, 0, 0, 0]));
        }
    }

    #[test]
    fn test_oversized_padding_is_a_configuration_error() {
        let sheet = coordinate_sheet();
        for padding in [1 << 30, 100_000] {
            let options = Options {
                padding,
                missing_terrain_two: false,
            };
            let unpacker = Unpacker::new(&sheet, 2, 3, options).unwrap();
            for layout in Layout::all() {
                assert!(
                    matches!(unpacker.unpack(*layout), Err(UnpackError::Configuration(_))),
                    "{} with padding {}",
                    layout,
                    padding
                );
            }
        }
    }

    #[test]
    fn test_expanders_are_deterministic() {
        let sheet = coordinate_sheet();
        let unpacker = Unpacker::new(&sheet, 2, 3, Options::default()).unwrap();
        for layout in Layout::all() {
            assert_eq!(unpacker.unpack(*layout), unpacker.unpack(*layout));
        }
    }

    #[test]
    fn test_sink_receives_every_base_tile() {
        let sheet = coordinate_sheet();
        let sink = MemorySink::new();
        let unpacker = Unpacker::new(&sheet, 2, 3, Options::default())
            .unwrap()
            .with_sink(&sink);
        unpacker.from_6_to_48_terrain2().unwrap();

        let labels = sink.labels();
        assert_eq!(labels.len(), 16);
        assert_eq!(labels[0], "48_terrain2_base_0");
        assert_eq!(labels[15], "48_terrain2_base_15");
        assert_eq!(
            sink.get("48_terrain2_base_0"),
            Some(single(&sheet, &tables::TERRAIN2_48[0].base.corner_state()))
        );
    }

    #[test]
    fn test_source_is_not_mutated() {
        let sheet = coordinate_sheet();
        let before = sheet.clone();
        let unpacker = Unpacker::new(&sheet, 2, 3, Options::default()).unwrap();
        for layout in Layout::all() {
            unpacker.unpack(*layout).unwrap();
        }
        assert_eq!(sheet, before);
    }
}

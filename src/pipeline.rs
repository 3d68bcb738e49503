//! Per-file driver: decode a packed sheet, expand it into the requested
//! layouts and write each sheet (and optionally its Tiled descriptor).

use std::path::{Path, PathBuf};
use std::str::FromStr;

use image::RgbaImage;

use crate::error::PipelineError;
use crate::layout::Layout;
use crate::sink::{PngDirSink, RasterSink};
use crate::tiled::TiledTemplate;
use crate::unpacker::{Options, Unpacker};

/// Packed sheets are 2 tiles wide and 3 tall.
pub const SHEET_X_TILES: u32 = 2;
pub const SHEET_Y_TILES: u32 = 3;

/// Terrain names and format version for descriptor export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DescriptorSettings {
    pub terrain1_name: String,
    pub terrain2_name: String,
    pub tiled_version: String,
}

/// Input option marking a sheet without a terrain 2 foreground.
pub const MISSING_TERRAIN_TWO: &str = "missing-terrain-two";

/// One packed input sheet and its per-file options.
///
/// Parsed from `path[,missing-terrain-two]`; a trailing segment that is not a
/// known option stays part of the path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputSpec {
    pub path: PathBuf,
    pub missing_terrain_two: bool,
}

impl FromStr for InputSpec {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut path = value;
        let mut missing_terrain_two = false;
        while let Some((head, option)) = path.rsplit_once(',') {
            if option != MISSING_TERRAIN_TWO {
                break;
            }
            missing_terrain_two = true;
            path = head;
        }
        if path.is_empty() {
            return Err(format!("no input path in {:?}", value));
        }
        Ok(Self {
            path: PathBuf::from(path),
            missing_terrain_two,
        })
    }
}

/// Everything a run needs besides the file names.
#[derive(Clone, Debug, Default)]
pub struct RunSettings {
    pub options: Options,
    pub layouts: Vec<Layout>,
    pub descriptor: Option<DescriptorSettings>,
    pub debug_dir: Option<PathBuf>,
}

impl RunSettings {
    /// Run options with the per-file flags of `input` applied.
    pub fn options_for(&self, input: &InputSpec) -> Options {
        Options {
            missing_terrain_two: self.options.missing_terrain_two || input.missing_terrain_two,
            ..self.options
        }
    }

    /// Requested layouts a sheet with `options` can produce.
    pub fn layouts_for(&self, options: &Options) -> Vec<Layout> {
        self.layouts
            .iter()
            .copied()
            .filter(|layout| !(options.missing_terrain_two && layout.requires_terrain_two()))
            .collect()
    }
}

/// Output file for input number `index` when none was given.
pub fn default_output(index: usize) -> PathBuf {
    PathBuf::from(format!("{}.local.png", index))
}

/// `<dir>/<tag>_<base-name>` for the requested output path.
pub fn layout_output_path(output: &Path, layout: Layout) -> PathBuf {
    let base = output
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file = format!("{}_{}", layout.tag(), base);
    match output.parent() {
        Some(dir) => dir.join(file),
        None => PathBuf::from(file),
    }
}

/// Build the descriptor for a produced sheet.
pub fn descriptor_for(
    sheet_path: &Path,
    sheet: &RgbaImage,
    layout: Layout,
    tile_size: (u32, u32),
    padding: u32,
    settings: &DescriptorSettings,
) -> TiledTemplate {
    let (columns, _) = layout.grid();
    TiledTemplate {
        tiled_version: settings.tiled_version.clone(),
        tileset_name: sheet_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default(),
        tile_width: tile_size.0,
        tile_height: tile_size.1,
        tile_count: layout.tile_count(),
        columns,
        image_source: sheet_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        image_width: sheet.width(),
        image_height: sheet.height(),
        terrain1_name: settings.terrain1_name.clone(),
        terrain2_name: settings.terrain2_name.clone(),
        margin: padding,
        spacing: 2 * padding,
    }
}

/// Expand an already decoded sheet and write every requested layout.
/// Returns the paths written, sheets and descriptors alike.
pub fn export_sheet(
    source: &RgbaImage,
    output: &Path,
    options: Options,
    settings: &RunSettings,
) -> Result<Vec<PathBuf>, PipelineError> {
    let debug_sink = settings.debug_dir.as_ref().map(PngDirSink::new);
    let mut unpacker = Unpacker::new(source, SHEET_X_TILES, SHEET_Y_TILES, options)?;
    if let Some(sink) = debug_sink.as_ref() {
        unpacker = unpacker.with_sink(sink as &dyn RasterSink);
    }

    let mut written = Vec::new();
    for layout in settings.layouts_for(&options) {
        let sheet = unpacker.unpack(layout)?;
        let path = layout_output_path(output, layout);
        sheet.save(&path)?;
        log::info!(
            "Wrote {} ({}x{}) to {}",
            layout,
            sheet.width(),
            sheet.height(),
            path.display()
        );
        written.push(path.clone());

        if let Some(descriptor) = &settings.descriptor {
            let template = descriptor_for(
                &path,
                &sheet,
                layout,
                unpacker.tile_size(),
                options.padding,
                descriptor,
            );
            let dir = match path.parent() {
                Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
                _ => PathBuf::from("."),
            };
            let tsx = template.write_to(&dir)?;
            log::info!("Wrote descriptor {}", tsx.display());
            written.push(tsx);
        }
    }
    Ok(written)
}

/// Decode `input` and export it to `output`.
pub fn process_file(
    input: &InputSpec,
    output: &Path,
    settings: &RunSettings,
) -> Result<Vec<PathBuf>, PipelineError> {
    log::info!("Unpacking {}", input.path.display());
    let source = image::open(&input.path)?.into_rgba8();
    log::debug!("Decoded {}x{} sheet", source.width(), source.height());
    export_sheet(&source, output, settings.options_for(input), settings)
}

/// Process every `(input, output)` pair in order. A failing file is logged and
/// skipped; the number of failures is returned.
pub fn run(jobs: &[(InputSpec, PathBuf)], settings: &RunSettings) -> usize {
    let mut failures = 0;
    for (input, output) in jobs {
        if let Err(e) = process_file(input, output, settings) {
            log::error!("Failed to unpack {}: {}", input.path.display(), e);
            failures += 1;
        }
    }
    failures
}

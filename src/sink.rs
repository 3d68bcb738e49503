//! Optional destination for intermediate rasters, used when debugging tables.

use std::path::PathBuf;
use std::sync::Mutex;

use image::RgbaImage;

/// Receives intermediate rasters by label. Failures must not abort unpacking.
pub trait RasterSink {
    fn accept(&self, label: &str, raster: &RgbaImage);
}

/// Writes every raster as `debug_<label>_<timestamp>.png` into a directory.
pub struct PngDirSink {
    dir: PathBuf,
}

impl PngDirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl RasterSink for PngDirSink {
    fn accept(&self, label: &str, raster: &RgbaImage) {
        let stamp = chrono::Local::now().format("%Y%m%d%H%M%S%.f");
        let path = self.dir.join(format!("debug_{}_{}.png", label, stamp));
        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            log::warn!("Cannot create debug dir {}: {}", self.dir.display(), e);
            return;
        }
        match raster.save(&path) {
            Ok(()) => log::debug!("Saved debug raster {}", path.display()),
            Err(e) => log::warn!("Failed to save debug raster {}: {}", path.display(), e),
        }
    }
}

/// Keeps rasters in memory; handy for inspecting what an expander produced.
#[derive(Default)]
pub struct MemorySink {
    rasters: Mutex<Vec<(String, RgbaImage)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labels(&self) -> Vec<String> {
        self.lock().iter().map(|(label, _)| label.clone()).collect()
    }

    /// The most recent raster stored under `label`.
    pub fn get(&self, label: &str) -> Option<RgbaImage> {
        self.lock()
            .iter()
            .rev()
            .find(|(stored, _)| stored == label)
            .map(|(_, raster)| raster.clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(String, RgbaImage)>> {
        self.rasters.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RasterSink for MemorySink {
    fn accept(&self, label: &str, raster: &RgbaImage) {
        self.lock().push((label.to_string(), raster.clone()));
    }
}

//! Pyramid manifest.
//!
//! A small JSON document written next to the tiles so consumers can learn
//! the pyramid's shape without walking the directory tree.
//!
//! # Example Output
//!
//! ```json
//! {
//!   "source": { "path": "map.png", "width": 2048, "height": 2048 },
//!   "tile_size": 256,
//!   "format": "png",
//!   "filter": "lanczos3",
//!   "min_zoom": 0,
//!   "max_zoom": 3,
//!   "url_template": "{z}/{x}/{y}.png",
//!   "tile_count": 85,
//!   "levels": [
//!     { "zoom": 0, "image_size": 256, "tiles_per_side": 1, "tile_count": 1 }
//!   ]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{OutputError, TileError};
use crate::grid::pyramid_tile_count;
use crate::tile::{LevelSummary, ResizeFilter, TileFormat};

/// File name used when writing the manifest into a tile directory.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Description of the source image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub width: u32,
    pub height: u32,
}

/// Shape of a cut tile pyramid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PyramidManifest {
    pub source: SourceInfo,
    pub tile_size: u32,
    pub format: TileFormat,
    pub filter: ResizeFilter,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub url_template: String,
    pub tile_count: u64,
    pub levels: Vec<LevelSummary>,
}

impl PyramidManifest {
    /// Build a manifest for levels `0..=max_zoom`.
    pub fn new(
        source: SourceInfo,
        tile_size: u32,
        max_zoom: u8,
        format: TileFormat,
        filter: ResizeFilter,
    ) -> Result<Self, TileError> {
        let levels = (0..=max_zoom)
            .map(|zoom| LevelSummary::for_zoom(zoom, tile_size))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            source,
            tile_size,
            format,
            filter,
            min_zoom: 0,
            max_zoom,
            url_template: format!("{{z}}/{{x}}/{{y}}.{}", format.extension()),
            tile_count: pyramid_tile_count(max_zoom)?,
            levels,
        })
    }

    pub fn to_json(&self) -> Result<String, OutputError> {
        serde_json::to_string_pretty(self).map_err(|e| OutputError::Manifest(e.to_string()))
    }

    /// Write the manifest as `manifest.json` inside `dir`.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, OutputError> {
        let path = dir.join(MANIFEST_FILE_NAME);
        let json = self.to_json()?;
        fs::write(&path, json).map_err(|e| OutputError::io(&path, e))?;
        Ok(path)
    }
}

//! Directory tile sink.
//!
//! Writes tiles using the XYZ directory layout understood by Leaflet,
//! OpenLayers and most static tile hosts:
//!
//! ```text
//! <root>/
//! ├── 0/
//! │   └── 0/
//! │       └── 0.png
//! ├── 1/
//! │   ├── 0/
//! │   │   ├── 0.png
//! │   │   └── 1.png
//! │   └── 1/
//! │       ├── 0.png
//! │       └── 1.png
//! └── manifest.json
//! ```

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use image::RgbaImage;
use tracing::{debug, info};

use crate::error::OutputError;
use crate::grid::TileId;
use crate::tile::TileEncoder;

use super::sink::TileSink;

/// Sink that writes encoded tiles to `{root}/{z}/{x}/{y}.{ext}`.
#[derive(Debug)]
pub struct DirectorySink {
    root: PathBuf,
    encoder: TileEncoder,
    overwrite: bool,
    tiles_written: u64,
    bytes_written: u64,
}

impl DirectorySink {
    /// Create a sink rooted at `root`. The directory is created if missing.
    pub fn new(root: impl Into<PathBuf>, encoder: TileEncoder) -> Result<Self, OutputError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| OutputError::io(&root, e))?;

        Ok(Self {
            root,
            encoder,
            overwrite: false,
            tiles_written: 0,
            bytes_written: 0,
        })
    }

    /// Allow replacing tiles left by a previous run.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a tile is written to.
    pub fn tile_path(&self, id: TileId) -> PathBuf {
        self.root
            .join(id.zoom.to_string())
            .join(id.coord.x.to_string())
            .join(format!("{}.{}", id.coord.y, self.encoder.format().extension()))
    }

    pub fn tiles_written(&self) -> u64 {
        self.tiles_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

impl TileSink for DirectorySink {
    fn write_tile(&mut self, id: TileId, tile: &RgbaImage) -> Result<(), OutputError> {
        let path = self.tile_path(id);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| OutputError::io(parent, e))?;
        }

        let bytes = self.encoder.encode(tile)?;
        if self.overwrite {
            fs::write(&path, &bytes).map_err(|e| OutputError::io(&path, e))?;
        } else {
            // create_new fails atomically if the tile appeared since the last run
            let mut file = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .map_err(|e| match e.kind() {
                    ErrorKind::AlreadyExists => OutputError::TileExists(path.display().to_string()),
                    _ => OutputError::io(&path, e),
                })?;
            file.write_all(&bytes).map_err(|e| OutputError::io(&path, e))?;
        }

        self.tiles_written += 1;
        self.bytes_written += bytes.len() as u64;
        debug!(tile = %id, bytes = bytes.len(), "Wrote tile");

        Ok(())
    }

    fn finish(&mut self) -> Result<(), OutputError> {
        info!(
            root = %self.root.display(),
            tiles = self.tiles_written,
            bytes = self.bytes_written,
            "Finished writing tiles"
        );
        Ok(())
    }
}

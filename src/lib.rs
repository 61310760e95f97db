//! # Travertine
//!
//! Cuts a square source image into a web map style tile pyramid.
//!
//! For every zoom level `z` the source is resized to `tile_size * 2^z`
//! pixels on each side and sliced into a `2^z` by `2^z` grid of
//! `tile_size` square tiles, the scheme used by Google Maps and XYZ tile
//! servers.
//!
//! ## Architecture
//!
//! - [`grid`] - Pure tile grid arithmetic (sizes, counts, coordinates)
//! - [`tile`] - Resize-then-slice cutting and tile encoding
//! - [`output`] - Tile sinks and the pyramid manifest
//! - [`pipeline`] - End-to-end runs used by the CLI
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust
//! use image::{DynamicImage, Rgba, RgbaImage};
//! use travertine::{MemorySink, TileCutter, TileEncoder, TileId};
//!
//! let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(512, 512, Rgba([0, 90, 200, 255])));
//!
//! let cutter = TileCutter::default();
//! let mut sink = MemorySink::new(TileEncoder::default());
//! let summary = cutter.cut_pyramid_into(&source, 1, &mut sink).unwrap();
//!
//! assert_eq!(summary.tiles_written, 5);
//! assert!(sink.get(&TileId::new(1, 1, 1)).is_some());
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod output;
pub mod pipeline;
pub mod tile;

// Re-export commonly used types
pub use config::{Cli, Command, CutConfig, InfoConfig};
pub use error::{OutputError, TileError};
pub use grid::{
    max_cuttable_zoom, native_max_zoom, pyramid_tile_count, tile_coordinates, tile_count,
    tile_origin, tiles_per_side, zoom_image_size, TileCoord, TileCoordinates, TileId,
    DEFAULT_TILE_SIZE, MAX_LEVEL_SIDE, MAX_ZOOM_LEVEL,
};
pub use output::{DirectorySink, MemorySink, PyramidManifest, SourceInfo, TileSink};
pub use pipeline::{cut_to_directory, describe, resolve_max_zoom, CutReport};
pub use tile::{
    cut_tile, load_source, resize_to_zoom_level, CutOptions, LevelSummary, PyramidSummary,
    ResizeFilter, Tile, TileCutter, TileEncoder, TileFormat, TilePyramid, ZoomLevelTiles,
};

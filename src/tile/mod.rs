//! Tile cutting.
//!
//! This module turns a decoded source image into tiles.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              Source image               │
//! └────────────────────┬────────────────────┘
//!                      │  load_source()
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │               TileCutter                │
//! │  ┌──────────────┐  ┌─────────────────┐  │
//! │  │  resize to   │  │   cut_tile()    │  │
//! │  │  zoom level  │─▶│  per (x, y)     │  │
//! │  └──────────────┘  └─────────────────┘  │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │     TilePyramid  /  TileSink + encoder  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`TileCutter`]: resize-then-slice for one level or a whole pyramid
//! - [`resize_to_zoom_level`] / [`cut_tile`]: the two image operations
//! - [`TileEncoder`]: PNG or JPEG encoding of cut tiles
//! - [`load_source`]: decodes the source image from disk

mod cutter;
mod encoder;
mod source;

pub use cutter::{
    cut_tile, resize_to_zoom_level, CutOptions, LevelSummary, PyramidSummary, ResizeFilter, Tile,
    TileCutter, TilePyramid, ZoomLevelTiles,
};
pub use encoder::{
    clamp_quality, is_valid_quality, TileEncoder, TileFormat, DEFAULT_JPEG_QUALITY,
    MAX_JPEG_QUALITY, MIN_JPEG_QUALITY,
};
pub use source::{is_square, load_source};

//! Tile grid arithmetic.
//!
//! Everything in this module is pure integer math over zoom levels and tile
//! sizes. No image data is touched here; see [`crate::tile`] for the
//! resize and slicing steps that consume these numbers.
//!
//! # Example
//!
//! ```
//! use travertine::grid::{tile_coordinates, tile_count, zoom_image_size, DEFAULT_TILE_SIZE};
//!
//! // Zoom 2 is a 4x4 grid of 256px tiles over a 1024px image
//! assert_eq!(zoom_image_size(2, DEFAULT_TILE_SIZE).unwrap(), 1024);
//! assert_eq!(tile_count(2).unwrap(), 16);
//!
//! let first = tile_coordinates(2).unwrap().next().unwrap();
//! assert_eq!((first.x, first.y), (0, 0));
//! ```

mod coords;
mod math;

pub use coords::{TileCoord, TileCoordinates, TileId};
pub use math::{
    max_cuttable_zoom, max_zoom_for_tile_size, native_max_zoom, pyramid_tile_count,
    tile_coordinates, tile_count, tile_origin, tiles_per_side, zoom_image_size, DEFAULT_TILE_SIZE,
    MAX_LEVEL_SIDE, MAX_ZOOM_LEVEL,
};

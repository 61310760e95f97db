//! Closed-form tile grid arithmetic.
//!
//! Zoom levels follow the web map convention:
//! - zoom 0 is a single tile covering the whole image
//! - each level doubles the side length, so level `z` is `2^z` tiles wide
//!   and holds `4^z` tiles
//!
//! The resized image at level `z` is therefore `tile_size * 2^z` pixels on
//! each side.

use crate::error::TileError;

use super::coords::{TileCoord, TileCoordinates};

/// Tile size used by Google Maps and most XYZ tile servers.
pub const DEFAULT_TILE_SIZE: u32 = 256;

/// Largest side length, in pixels, a zoom level may be resized to.
///
/// A resized level is held in memory as a whole (and as `f32` samples
/// during resampling), so cutting stops well short of the `u32` limit.
pub const MAX_LEVEL_SIDE: u32 = 1 << 15;

/// Highest zoom level the grid arithmetic accepts.
///
/// At this level a default-sized pyramid is 268,435,456 pixels wide, which
/// is already far past anything `image` can hold in memory.
pub const MAX_ZOOM_LEVEL: u8 = 20;

/// Number of tiles along each side of the grid at `zoom` (`2^zoom`).
pub fn tiles_per_side(zoom: u8) -> Result<u32, TileError> {
    check_zoom(zoom)?;
    Ok(1u32 << zoom)
}

/// Number of tiles in the grid at `zoom` (`4^zoom`).
pub fn tile_count(zoom: u8) -> Result<u64, TileError> {
    let side = u64::from(tiles_per_side(zoom)?);
    Ok(side * side)
}

/// Total number of tiles over levels `0..=max_zoom`.
pub fn pyramid_tile_count(max_zoom: u8) -> Result<u64, TileError> {
    check_zoom(max_zoom)?;
    // Geometric series: sum of 4^z for z in 0..=max_zoom
    Ok(((1u64 << (2 * (u32::from(max_zoom) + 1))) - 1) / 3)
}

/// Pixel side length the source image must be resized to for `zoom`.
///
/// # Errors
///
/// - [`TileError::InvalidTileSize`] when `tile_size` is zero
/// - [`TileError::ZoomOutOfRange`] when the side length does not fit in a
///   `u32` for this tile size
pub fn zoom_image_size(zoom: u8, tile_size: u32) -> Result<u32, TileError> {
    if tile_size == 0 {
        return Err(TileError::InvalidTileSize(tile_size));
    }

    tiles_per_side(zoom)?
        .checked_mul(tile_size)
        .ok_or(TileError::ZoomOutOfRange {
            zoom,
            max: max_zoom_for_tile_size(tile_size),
        })
}

/// Enumerate every tile coordinate at `zoom`, x-major.
pub fn tile_coordinates(zoom: u8) -> Result<TileCoordinates, TileError> {
    Ok(TileCoordinates::new(tiles_per_side(zoom)?))
}

/// Pixel offset of a tile's top-left corner within the resized image.
///
/// Returns `None` when the offset does not fit in a `u32`.
#[inline]
pub fn tile_origin(coord: TileCoord, tile_size: u32) -> Option<(u32, u32)> {
    Some((
        coord.x.checked_mul(tile_size)?,
        coord.y.checked_mul(tile_size)?,
    ))
}

/// Highest zoom level that does not upscale a source of `source_side` pixels.
///
/// Sources smaller than a single tile map to zoom 0, which upscales them to
/// exactly one tile.
pub fn native_max_zoom(source_side: u32, tile_size: u32) -> u8 {
    if tile_size == 0 || source_side < tile_size {
        return 0;
    }

    let levels = (source_side / tile_size).ilog2();
    levels.min(u32::from(max_zoom_for_tile_size(tile_size))) as u8
}

/// Highest zoom level whose resized side still fits in a `u32`.
pub fn max_zoom_for_tile_size(tile_size: u32) -> u8 {
    if tile_size == 0 {
        return 0;
    }
    (u32::MAX / tile_size).ilog2().min(u32::from(MAX_ZOOM_LEVEL)) as u8
}

/// Highest zoom level whose resized side stays within [`MAX_LEVEL_SIDE`].
///
/// Tile sizes above the budget map to zoom 0, which is itself rejected by
/// the cutter.
pub fn max_cuttable_zoom(tile_size: u32) -> u8 {
    if tile_size == 0 || tile_size > MAX_LEVEL_SIDE {
        return 0;
    }
    (MAX_LEVEL_SIDE / tile_size).ilog2() as u8
}

fn check_zoom(zoom: u8) -> Result<(), TileError> {
    if zoom > MAX_ZOOM_LEVEL {
        return Err(TileError::ZoomOutOfRange {
            zoom,
            max: MAX_ZOOM_LEVEL,
        });
    }
    Ok(())
}

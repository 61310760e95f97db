//! Resize-then-slice tile cutting.
//!
//! Cutting one zoom level is two steps:
//! 1. resize the source to `zoom_image_size(zoom, tile_size)` on each side
//! 2. extract every `tile_size` square in [`tile_coordinates`] order
//!
//! A pyramid repeats this for levels `0..=max_zoom`. Each level is resized
//! from the untouched source, never from a previous level, so resampling
//! error does not accumulate down the pyramid.

use std::time::Instant;

use clap::ValueEnum;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, RgbaImage};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{OutputError, TileError};
use crate::grid::{
    tile_coordinates, tile_origin, tiles_per_side, zoom_image_size, TileCoord, TileId,
    DEFAULT_TILE_SIZE, MAX_LEVEL_SIDE, MAX_ZOOM_LEVEL,
};
use crate::output::TileSink;

// =============================================================================
// Resize Filter
// =============================================================================

/// Resampling filter used when resizing the source to a zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

// =============================================================================
// Image Operations
// =============================================================================

/// Resize `image` in place to the square side length for `zoom`.
///
/// Returns the new side length. Non-square images are stretched. An image
/// that already has the target size is left untouched, as is the image on
/// error.
///
/// # Errors
///
/// - [`TileError::InvalidTileSize`] when `tile_size` is zero
/// - [`TileError::ZoomOutOfRange`] when the side length overflows
/// - [`TileError::LevelTooLarge`] when the side exceeds [`MAX_LEVEL_SIDE`]
pub fn resize_to_zoom_level(
    image: &mut DynamicImage,
    zoom: u8,
    tile_size: u32,
    filter: ResizeFilter,
) -> Result<u32, TileError> {
    let side = level_side(zoom, tile_size)?;

    if image.width() == side && image.height() == side {
        return Ok(side);
    }

    if image.width() != image.height() {
        warn!(
            width = image.width(),
            height = image.height(),
            side,
            "Stretching non-square image to square"
        );
    }

    debug!(
        zoom,
        from_width = image.width(),
        from_height = image.height(),
        side,
        "Resizing image"
    );

    *image = image.resize_exact(side, side, filter.into());
    Ok(side)
}

/// Extract the tile at `coord` from an image already resized to its level.
///
/// # Errors
///
/// - [`TileError::InvalidTileSize`] when `tile_size` is zero
/// - [`TileError::TileOutOfBounds`] when the tile does not fit in `image`
pub fn cut_tile(
    image: &DynamicImage,
    coord: TileCoord,
    tile_size: u32,
) -> Result<RgbaImage, TileError> {
    if tile_size == 0 {
        return Err(TileError::InvalidTileSize(tile_size));
    }

    let (width, height) = image.dimensions();
    let out_of_bounds = || TileError::TileOutOfBounds {
        x: coord.x,
        y: coord.y,
        tile_size,
        width,
        height,
    };

    let (x, y) = tile_origin(coord, tile_size).ok_or_else(out_of_bounds)?;
    let end_x = u64::from(x) + u64::from(tile_size);
    let end_y = u64::from(y) + u64::from(tile_size);
    if end_x > u64::from(width) || end_y > u64::from(height) {
        return Err(out_of_bounds());
    }

    Ok(image.view(x, y, tile_size, tile_size).to_image())
}

// =============================================================================
// Cut Results
// =============================================================================

/// A single cut tile.
#[derive(Debug, Clone)]
pub struct Tile {
    pub id: TileId,
    pub image: RgbaImage,
}

/// Every tile of one zoom level, in enumeration order.
#[derive(Debug, Clone)]
pub struct ZoomLevelTiles {
    pub zoom: u8,

    /// Side length of the resized image the tiles were cut from
    pub image_size: u32,

    pub tiles: Vec<Tile>,
}

impl ZoomLevelTiles {
    /// Look up a tile by its grid position.
    pub fn get(&self, coord: TileCoord) -> Option<&Tile> {
        let side = 1u64 << self.zoom;
        if u64::from(coord.x) >= side || u64::from(coord.y) >= side {
            return None;
        }
        let index = u64::from(coord.x) * side + u64::from(coord.y);
        self.tiles.get(usize::try_from(index).ok()?)
    }
}

/// Tiles for zoom levels `0..=max_zoom`.
#[derive(Debug, Clone)]
pub struct TilePyramid {
    pub tile_size: u32,
    pub levels: Vec<ZoomLevelTiles>,
}

impl TilePyramid {
    /// Highest zoom level in the pyramid.
    pub fn max_zoom(&self) -> u8 {
        self.levels.last().map(|level| level.zoom).unwrap_or(0)
    }

    /// Total number of tiles across all levels.
    pub fn tile_count(&self) -> usize {
        self.levels.iter().map(|level| level.tiles.len()).sum()
    }

    /// Look up a tile anywhere in the pyramid.
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.levels.get(usize::from(id.zoom))?.get(id.coord)
    }

    /// Iterate over every tile, level by level.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.levels.iter().flat_map(|level| level.tiles.iter())
    }
}

/// Grid dimensions of one cut zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelSummary {
    pub zoom: u8,
    pub image_size: u32,
    pub tiles_per_side: u32,
    pub tile_count: u64,
}

impl LevelSummary {
    /// Compute the summary for `zoom` without cutting anything.
    pub fn for_zoom(zoom: u8, tile_size: u32) -> Result<Self, TileError> {
        let per_side = tiles_per_side(zoom)?;
        Ok(Self {
            zoom,
            image_size: zoom_image_size(zoom, tile_size)?,
            tiles_per_side: per_side,
            tile_count: u64::from(per_side) * u64::from(per_side),
        })
    }
}

/// Result of streaming a pyramid into a [`TileSink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PyramidSummary {
    pub tile_size: u32,
    pub levels: Vec<LevelSummary>,
    pub tiles_written: u64,
}

// =============================================================================
// Tile Cutter
// =============================================================================

/// Options shared by every cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutOptions {
    /// Side length of each tile in pixels
    pub tile_size: u32,

    /// Resampling filter for the per-level resize
    pub filter: ResizeFilter,
}

impl Default for CutOptions {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            filter: ResizeFilter::default(),
        }
    }
}

/// Cuts source images into zoom levels and pyramids.
///
/// # Example
///
/// ```
/// use image::{DynamicImage, Rgba, RgbaImage};
/// use travertine::tile::{CutOptions, ResizeFilter, TileCutter};
///
/// let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 255])));
/// let cutter = TileCutter::new(CutOptions { tile_size: 16, filter: ResizeFilter::Nearest });
///
/// let pyramid = cutter.cut_pyramid(&source, 2).unwrap();
/// assert_eq!(pyramid.tile_count(), 1 + 4 + 16);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TileCutter {
    options: CutOptions,
}

impl TileCutter {
    pub fn new(options: CutOptions) -> Self {
        Self { options }
    }

    /// Cutter with the given tile size and the default filter.
    pub fn with_tile_size(tile_size: u32) -> Self {
        Self::new(CutOptions {
            tile_size,
            ..CutOptions::default()
        })
    }

    pub fn options(&self) -> &CutOptions {
        &self.options
    }

    /// Resize a copy of `source` to `zoom` and cut all of its tiles.
    pub fn cut_zoom_level(
        &self,
        source: &DynamicImage,
        zoom: u8,
    ) -> Result<ZoomLevelTiles, TileError> {
        let mut tiles = Vec::new();
        let image_size = self.slice_level(source, zoom, |id, image| {
            tiles.push(Tile { id, image });
            Ok::<(), TileError>(())
        })?;

        Ok(ZoomLevelTiles {
            zoom,
            image_size,
            tiles,
        })
    }

    /// Cut levels `0..=max_zoom`, keeping every tile in memory.
    pub fn cut_pyramid(
        &self,
        source: &DynamicImage,
        max_zoom: u8,
    ) -> Result<TilePyramid, TileError> {
        check_max_zoom(max_zoom, self.options.tile_size)?;

        let levels = (0..=max_zoom)
            .map(|zoom| self.cut_zoom_level(source, zoom))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TilePyramid {
            tile_size: self.options.tile_size,
            levels,
        })
    }

    /// Cut levels `0..=max_zoom`, handing each tile to `sink` as soon as it
    /// is cut. Only one resized level is held in memory at a time.
    ///
    /// [`TileSink::finish`] is called once after the last tile.
    pub fn cut_pyramid_into<K>(
        &self,
        source: &DynamicImage,
        max_zoom: u8,
        sink: &mut K,
    ) -> Result<PyramidSummary, OutputError>
    where
        K: TileSink + ?Sized,
    {
        check_max_zoom(max_zoom, self.options.tile_size)?;

        let mut levels = Vec::with_capacity(usize::from(max_zoom) + 1);
        let mut tiles_written = 0u64;

        for zoom in 0..=max_zoom {
            self.slice_level(source, zoom, |id, image| {
                sink.write_tile(id, &image)?;
                tiles_written += 1;
                Ok::<(), OutputError>(())
            })?;
            levels.push(LevelSummary::for_zoom(zoom, self.options.tile_size)?);
        }

        sink.finish()?;

        Ok(PyramidSummary {
            tile_size: self.options.tile_size,
            levels,
            tiles_written,
        })
    }

    /// Resize a copy of `source` to `zoom` and pass every tile to `emit`.
    ///
    /// Returns the side length of the resized level.
    fn slice_level<F, E>(&self, source: &DynamicImage, zoom: u8, mut emit: F) -> Result<u32, E>
    where
        F: FnMut(TileId, RgbaImage) -> Result<(), E>,
        E: From<TileError>,
    {
        let tile_size = self.options.tile_size;
        let coords = tile_coordinates(zoom)?;
        let start = Instant::now();

        info!(
            zoom,
            tiles = coords.len(),
            tile_size,
            "Cutting zoom level"
        );

        let mut level_image = source.clone();
        let side = resize_to_zoom_level(&mut level_image, zoom, tile_size, self.options.filter)?;

        for coord in coords {
            let tile = cut_tile(&level_image, coord, tile_size)?;
            debug!(zoom, x = coord.x, y = coord.y, "Cut tile");
            emit(TileId { zoom, coord }, tile)?;
        }

        debug!(
            zoom,
            side,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Zoom level done"
        );
        Ok(side)
    }
}

/// Side length for `zoom`, or `LevelTooLarge` past [`MAX_LEVEL_SIDE`].
fn level_side(zoom: u8, tile_size: u32) -> Result<u32, TileError> {
    let side = zoom_image_size(zoom, tile_size)?;
    if side > MAX_LEVEL_SIDE {
        return Err(TileError::LevelTooLarge {
            zoom,
            side,
            max_side: MAX_LEVEL_SIDE,
        });
    }
    Ok(side)
}

// Checked before the first level so an oversized pyramid emits no tiles
fn check_max_zoom(max_zoom: u8, tile_size: u32) -> Result<(), TileError> {
    if max_zoom > MAX_ZOOM_LEVEL {
        return Err(TileError::ZoomOutOfRange {
            zoom: max_zoom,
            max: MAX_ZOOM_LEVEL,
        });
    }
    level_side(max_zoom, tile_size).map(|_| ())
}

// =============================================================================
// Tests
// =============================================================================

//! Tile coordinate types and per-level enumeration.

use std::fmt;
use std::iter::FusedIterator;

use serde::Serialize;

/// Position of a tile within one zoom level's grid.
///
/// `x` counts columns from the left edge, `y` counts rows from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
}

impl TileCoord {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl From<(u32, u32)> for TileCoord {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.x, self.y)
    }
}

/// A tile addressed within the whole pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TileId {
    pub zoom: u8,
    pub coord: TileCoord,
}

impl TileId {
    pub const fn new(zoom: u8, x: u32, y: u32) -> Self {
        Self {
            zoom,
            coord: TileCoord::new(x, y),
        }
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.zoom, self.coord)
    }
}

// =============================================================================
// Coordinate Enumeration
// =============================================================================

/// Iterator over every tile coordinate of a square grid, x-major.
///
/// For a grid with `n` tiles per side this yields `(0, 0), (0, 1), ..,
/// (0, n-1), (1, 0), ..` and so on, `n * n` items in total.
///
/// Created by [`tile_coordinates`](super::tile_coordinates).
#[derive(Debug, Clone)]
pub struct TileCoordinates {
    per_side: u32,
    next: u64,
    total: u64,
}

impl TileCoordinates {
    pub(crate) fn new(per_side: u32) -> Self {
        Self {
            per_side,
            next: 0,
            total: u64::from(per_side) * u64::from(per_side),
        }
    }
}

impl Iterator for TileCoordinates {
    type Item = TileCoord;

    fn next(&mut self) -> Option<TileCoord> {
        if self.next >= self.total {
            return None;
        }

        let side = u64::from(self.per_side);
        let coord = TileCoord::new((self.next / side) as u32, (self.next % side) as u32);
        self.next += 1;
        Some(coord)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.total - self.next).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<TileCoord> {
        self.next = self.next.saturating_add(n as u64).min(self.total);
        self.next()
    }
}

impl ExactSizeIterator for TileCoordinates {}

impl FusedIterator for TileCoordinates {}

//! Tile sink abstraction.

use std::collections::BTreeMap;

use bytes::Bytes;
use image::RgbaImage;

use crate::error::OutputError;
use crate::grid::TileId;
use crate::tile::TileEncoder;

/// Destination for tiles as they are cut.
///
/// The cutter calls [`write_tile`](TileSink::write_tile) once per tile in
/// pyramid order (zoom ascending, then x-major within a level) and
/// [`finish`](TileSink::finish) once at the end.
pub trait TileSink {
    /// Accept one cut tile.
    fn write_tile(&mut self, id: TileId, tile: &RgbaImage) -> Result<(), OutputError>;

    /// Flush anything buffered. Called after the last tile.
    fn finish(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}

impl<K: TileSink + ?Sized> TileSink for &mut K {
    fn write_tile(&mut self, id: TileId, tile: &RgbaImage) -> Result<(), OutputError> {
        (**self).write_tile(id, tile)
    }

    fn finish(&mut self) -> Result<(), OutputError> {
        (**self).finish()
    }
}

// =============================================================================
// Memory Sink
// =============================================================================

/// Sink that keeps encoded tiles in memory, keyed by tile id.
#[derive(Debug, Default)]
pub struct MemorySink {
    encoder: TileEncoder,
    tiles: BTreeMap<TileId, Bytes>,
    finished: bool,
}

impl MemorySink {
    pub fn new(encoder: TileEncoder) -> Self {
        Self {
            encoder,
            tiles: BTreeMap::new(),
            finished: false,
        }
    }

    /// Encoded bytes for a tile, if it has been written.
    pub fn get(&self, id: &TileId) -> Option<&Bytes> {
        self.tiles.get(id)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether [`TileSink::finish`] has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Tile ids in pyramid order.
    pub fn ids(&self) -> impl Iterator<Item = &TileId> {
        self.tiles.keys()
    }
}

impl TileSink for MemorySink {
    fn write_tile(&mut self, id: TileId, tile: &RgbaImage) -> Result<(), OutputError> {
        let bytes = self.encoder.encode(tile)?;
        self.tiles.insert(id, bytes);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), OutputError> {
        self.finished = true;
        Ok(())
    }
}

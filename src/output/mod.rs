//! Tile output.
//!
//! - [`TileSink`]: destination the cutter streams tiles into
//! - [`DirectorySink`]: writes `{z}/{x}/{y}.{ext}` files
//! - [`MemorySink`]: keeps encoded tiles in a map
//! - [`PyramidManifest`]: JSON description of a cut pyramid

mod directory;
mod manifest;
mod sink;

pub use directory::DirectorySink;
pub use manifest::{PyramidManifest, SourceInfo, MANIFEST_FILE_NAME};
pub use sink::{MemorySink, TileSink};

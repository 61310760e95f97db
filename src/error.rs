use thiserror::Error;

/// Errors raised while computing the tile grid or cutting tiles
#[derive(Debug, Clone, Error)]
pub enum TileError {
    /// Tile size must be at least one pixel
    #[error("Invalid tile size: {0} (must be greater than 0)")]
    InvalidTileSize(u32),

    /// Zoom level is beyond what the grid arithmetic can represent
    #[error("Zoom level {zoom} is out of range (max: {max})")]
    ZoomOutOfRange { zoom: u8, max: u8 },

    /// Resized zoom level would exceed the in-memory pixel budget
    #[error("Zoom level {zoom} needs a {side}x{side} image (max side: {max_side})")]
    LevelTooLarge { zoom: u8, side: u32, max_side: u32 },

    /// Tile region does not fit inside the resized image
    #[error("Tile ({x}, {y}) of size {tile_size} is out of bounds for a {width}x{height} image")]
    TileOutOfBounds {
        x: u32,
        y: u32,
        tile_size: u32,
        width: u32,
        height: u32,
    },

    /// Source image could not be read or decoded
    #[error("Failed to decode image: {message}")]
    DecodeError { message: String },

    /// Tile could not be encoded
    #[error("Failed to encode tile: {message}")]
    EncodeError { message: String },

    /// Filesystem error while reading the source image
    #[error("I/O error: {0}")]
    Io(String),
}

/// Errors raised by tile sinks and the pyramid manifest
#[derive(Debug, Clone, Error)]
pub enum OutputError {
    /// Filesystem error while writing output
    #[error("I/O error at {path}: {message}")]
    Io { path: String, message: String },

    /// Refusing to replace an existing tile
    #[error("Tile already exists: {0} (use --overwrite to replace)")]
    TileExists(String),

    /// Tile encoding failed
    #[error("Tile error: {0}")]
    Tile(#[from] TileError),

    /// Manifest serialization failed
    #[error("Manifest error: {0}")]
    Manifest(String),
}

impl OutputError {
    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        OutputError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

//! Loading source images.

use std::path::Path;

use image::{DynamicImage, ImageError, ImageReader};
use tracing::{debug, warn};

use crate::error::TileError;

/// Decode the source image at `path`.
///
/// The format is guessed from the file contents, falling back to the
/// extension. Non-square sources are accepted but logged, since cutting
/// stretches them to a square.
pub fn load_source(path: impl AsRef<Path>) -> Result<DynamicImage, TileError> {
    let path = path.as_ref();

    let reader = ImageReader::open(path)
        .map_err(|e| TileError::Io(format!("{}: {}", path.display(), e)))?
        .with_guessed_format()
        .map_err(|e| TileError::Io(format!("{}: {}", path.display(), e)))?;

    let image = reader.decode().map_err(|e| match e {
        ImageError::IoError(io) => TileError::Io(format!("{}: {}", path.display(), io)),
        other => TileError::DecodeError {
            message: format!("{}: {}", path.display(), other),
        },
    })?;

    debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Loaded source image"
    );

    if !is_square(&image) {
        warn!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "Source image is not square; tiles will be stretched"
        );
    }

    Ok(image)
}

/// Whether the image has equal width and height.
#[inline]
pub fn is_square(image: &DynamicImage) -> bool {
    image.width() == image.height()
}

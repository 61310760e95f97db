//! Test utilities for integration tests.
//!
//! Helpers for synthesising source images and inspecting tile output.

use std::path::{Path, PathBuf};

use image::{DynamicImage, Rgba, RgbaImage};

use travertine::{CutConfig, ResizeFilter, TileFormat};

/// Source split into four solid quadrants:
///
/// ```text
/// ┌───────┬───────┐
/// │  red  │ green │
/// ├───────┼───────┤
/// │ blue  │ white │
/// └───────┴───────┘
/// ```
pub fn quadrant_source(side: u32) -> DynamicImage {
    let half = side / 2;
    DynamicImage::ImageRgba8(RgbaImage::from_fn(side, side, |x, y| {
        match (x < half, y < half) {
            (true, true) => RED,
            (false, true) => GREEN,
            (true, false) => BLUE,
            (false, false) => WHITE,
        }
    }))
}

pub const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
pub const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
pub const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Write `image` as a PNG in `dir` and return its path.
pub fn write_source(dir: &Path, name: &str, image: &DynamicImage) -> PathBuf {
    let path = dir.join(name);
    image.save(&path).unwrap();
    path
}

/// Whether every pixel of `tile` equals `pixel`.
pub fn is_solid(tile: &RgbaImage, pixel: Rgba<u8>) -> bool {
    tile.pixels().all(|p| *p == pixel)
}

/// Cut configuration with test-friendly defaults.
pub fn cut_config(input: PathBuf, output: PathBuf) -> CutConfig {
    CutConfig {
        input,
        output,
        max_zoom: None,
        tile_size: 16,
        format: TileFormat::Png,
        quality: 80,
        filter: ResizeFilter::Nearest,
        overwrite: false,
        no_manifest: false,
        verbose: false,
    }
}

/// Count regular files below `root`, recursively.
pub fn count_files(root: &Path, extension: &str) -> usize {
    let mut count = 0;
    for entry in std::fs::read_dir(root).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            count += count_files(&path, extension);
        } else if path.extension().and_then(|e| e.to_str()) == Some(extension) {
            count += 1;
        }
    }
    count
}

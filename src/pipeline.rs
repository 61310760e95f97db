//! End-to-end cut and info runs.
//!
//! These glue the grid, cutter and output layers together for the CLI
//! commands, so the binary only has to deal with logging and exit codes.

use std::path::Path;
use std::time::Instant;

use image::DynamicImage;
use tracing::info;

use crate::config::{CutConfig, InfoConfig};
use crate::error::{OutputError, TileError};
use crate::grid::{max_cuttable_zoom, native_max_zoom, pyramid_tile_count};
use crate::output::{DirectorySink, PyramidManifest, SourceInfo};
use crate::tile::{
    load_source, CutOptions, PyramidSummary, ResizeFilter, TileCutter, TileEncoder, TileFormat,
};

/// Outcome of a `cut` run.
#[derive(Debug, Clone)]
pub struct CutReport {
    pub max_zoom: u8,
    pub summary: PyramidSummary,
    pub manifest: PyramidManifest,
    pub elapsed_ms: u128,
}

/// Highest zoom to cut: the requested one, or the native maximum of the
/// source's longer side.
///
/// The native maximum avoids upscaling the longer side only. Levels are
/// square, so the shorter side of a non-square source is stretched up at
/// the deeper levels. It is also capped at [`max_cuttable_zoom`].
pub fn resolve_max_zoom(source: &DynamicImage, tile_size: u32, requested: Option<u8>) -> u8 {
    requested.unwrap_or_else(|| {
        let native = native_max_zoom(source.width().max(source.height()), tile_size);
        native.min(max_cuttable_zoom(tile_size))
    })
}

/// Load the source named by `config`, cut its pyramid and write it to the
/// output directory.
pub fn cut_to_directory(config: &CutConfig) -> Result<CutReport, OutputError> {
    let start = Instant::now();
    let source = load_source(&config.input)?;
    let max_zoom = resolve_max_zoom(&source, config.tile_size, config.max_zoom);
    let tiles = pyramid_tile_count(max_zoom)?;

    info!(
        input = %config.input.display(),
        output = %config.output.display(),
        max_zoom,
        tiles,
        "Cutting tile pyramid"
    );

    let encoder = TileEncoder::new(config.format, config.quality);
    let mut sink = DirectorySink::new(&config.output, encoder)?.with_overwrite(config.overwrite);

    let cutter = TileCutter::new(CutOptions {
        tile_size: config.tile_size,
        filter: config.filter,
    });
    let summary = cutter.cut_pyramid_into(&source, max_zoom, &mut sink)?;

    let manifest = build_manifest(
        &config.input,
        &source,
        config.tile_size,
        max_zoom,
        config.format,
        config.filter,
    )?;
    if !config.no_manifest {
        let path = manifest.write_to_dir(sink.root())?;
        info!(path = %path.display(), "Wrote manifest");
    }

    Ok(CutReport {
        max_zoom,
        summary,
        manifest,
        elapsed_ms: start.elapsed().as_millis(),
    })
}

/// Describe the pyramid `config` would produce, without cutting.
pub fn describe(config: &InfoConfig) -> Result<PyramidManifest, TileError> {
    let source = load_source(&config.input)?;
    let max_zoom = resolve_max_zoom(&source, config.tile_size, config.max_zoom);

    build_manifest(
        &config.input,
        &source,
        config.tile_size,
        max_zoom,
        TileFormat::default(),
        ResizeFilter::default(),
    )
}

fn build_manifest(
    path: &Path,
    source: &DynamicImage,
    tile_size: u32,
    max_zoom: u8,
    format: TileFormat,
    filter: ResizeFilter,
) -> Result<PyramidManifest, TileError> {
    let info = SourceInfo {
        path: Some(path.display().to_string()),
        width: source.width(),
        height: source.height(),
    };
    PyramidManifest::new(info, tile_size, max_zoom, format, filter)
}

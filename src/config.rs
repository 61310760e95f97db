//! Configuration management for Travertine.
//!
//! This module provides the command-line interface:
//! - Subcommands via clap derive
//! - Environment variables with `TRAVERTINE_` prefix
//! - Sensible defaults for all optional settings
//!
//! # Commands
//!
//! - `travertine cut <INPUT> --output <DIR>` - cut a tile pyramid to disk
//! - `travertine info <INPUT>` - print the pyramid layout without cutting
//!
//! # Environment Variables
//!
//! - `TRAVERTINE_OUTPUT` - Output directory for `cut`
//! - `TRAVERTINE_MAX_ZOOM` - Highest zoom level to cut
//! - `TRAVERTINE_TILE_SIZE` - Tile side length in pixels (default: 256)
//! - `TRAVERTINE_FORMAT` - Tile format, `png` or `jpeg` (default: png)
//! - `TRAVERTINE_QUALITY` - JPEG quality (default: 80)
//! - `TRAVERTINE_FILTER` - Resize filter (default: lanczos3)

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::grid::{max_cuttable_zoom, max_zoom_for_tile_size, DEFAULT_TILE_SIZE};
use crate::tile::{is_valid_quality, ResizeFilter, TileFormat, DEFAULT_JPEG_QUALITY};

/// Largest accepted tile size.
pub const MAX_TILE_SIZE: u32 = 8192;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Travertine - cut a square image into a web map tile pyramid.
#[derive(Parser, Debug, Clone)]
#[command(name = "travertine")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn into_command(self) -> Command {
        self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Resize the source for each zoom level and write every tile.
    Cut(CutConfig),

    /// Print the zoom levels a source would produce without cutting.
    Info(InfoConfig),
}

// =============================================================================
// Cut Command
// =============================================================================

#[derive(Args, Debug, Clone)]
pub struct CutConfig {
    /// Source image to cut.
    pub input: PathBuf,

    /// Directory tiles are written to as `{z}/{x}/{y}.{ext}`.
    #[arg(short, long, env = "TRAVERTINE_OUTPUT")]
    pub output: PathBuf,

    /// Highest zoom level to cut.
    ///
    /// Defaults to the highest level that does not upscale the source's
    /// longer side. The shorter side of a non-square source is still
    /// stretched up to the square level size.
    #[arg(short = 'z', long, env = "TRAVERTINE_MAX_ZOOM")]
    pub max_zoom: Option<u8>,

    /// Tile side length in pixels.
    #[arg(short, long, default_value_t = DEFAULT_TILE_SIZE, env = "TRAVERTINE_TILE_SIZE")]
    pub tile_size: u32,

    /// Tile image format.
    #[arg(short, long, value_enum, default_value_t = TileFormat::Png, env = "TRAVERTINE_FORMAT")]
    pub format: TileFormat,

    /// JPEG quality (1-100). Ignored for PNG.
    #[arg(short, long, default_value_t = DEFAULT_JPEG_QUALITY, env = "TRAVERTINE_QUALITY")]
    pub quality: u8,

    /// Resampling filter used when resizing to each zoom level.
    #[arg(long, value_enum, default_value_t = ResizeFilter::Lanczos3, env = "TRAVERTINE_FILTER")]
    pub filter: ResizeFilter,

    /// Replace tiles left by a previous run.
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    /// Do not write manifest.json next to the tiles.
    #[arg(long, default_value_t = false)]
    pub no_manifest: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl CutConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        validate_tile_size(self.tile_size)?;
        if let Some(max_zoom) = self.max_zoom {
            // Every level up to max_zoom is resized in memory
            validate_max_zoom(max_zoom, self.tile_size, max_cuttable_zoom(self.tile_size))?;
        }

        if !is_valid_quality(self.quality) {
            return Err("quality must be between 1 and 100".to_string());
        }

        if self.output.as_os_str().is_empty() {
            return Err("Output directory is required. Set --output or TRAVERTINE_OUTPUT".to_string());
        }

        Ok(())
    }

    /// Default tracing filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "travertine=debug"
        } else {
            "travertine=info"
        }
    }
}

// =============================================================================
// Info Command
// =============================================================================

#[derive(Args, Debug, Clone)]
pub struct InfoConfig {
    /// Source image to inspect.
    pub input: PathBuf,

    /// Highest zoom level to list. Defaults to the native maximum.
    #[arg(short = 'z', long, env = "TRAVERTINE_MAX_ZOOM")]
    pub max_zoom: Option<u8>,

    /// Tile side length in pixels.
    #[arg(short, long, default_value_t = DEFAULT_TILE_SIZE, env = "TRAVERTINE_TILE_SIZE")]
    pub tile_size: u32,

    /// Print the layout as JSON instead of a table.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl InfoConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        validate_tile_size(self.tile_size)?;
        if let Some(max_zoom) = self.max_zoom {
            validate_max_zoom(max_zoom, self.tile_size, max_zoom_for_tile_size(self.tile_size))?;
        }
        Ok(())
    }

    /// Default tracing filter when `RUST_LOG` is unset. Warnings are kept so
    /// source problems still reach stderr without `--verbose`.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "travertine=debug"
        } else {
            "travertine=warn"
        }
    }
}

fn validate_tile_size(tile_size: u32) -> Result<(), String> {
    if tile_size == 0 || tile_size > MAX_TILE_SIZE {
        return Err(format!("tile_size must be between 1 and {}", MAX_TILE_SIZE));
    }
    Ok(())
}

fn validate_max_zoom(max_zoom: u8, tile_size: u32, limit: u8) -> Result<(), String> {
    if max_zoom > limit {
        return Err(format!(
            "max_zoom {} is too large for {}px tiles (max: {})",
            max_zoom, tile_size, limit
        ));
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

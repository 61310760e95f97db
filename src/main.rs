//! Travertine - cut a square image into a web map tile pyramid.
//!
//! This binary parses the command line, sets up logging and dispatches to
//! the library's pipeline functions.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use travertine::{
    config::{Cli, Command, CutConfig, InfoConfig},
    pipeline::{cut_to_directory, describe},
    PyramidManifest, TileFormat,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Cut(config) => run_cut(config),
        Command::Info(config) => run_info(config),
    }
}

// =============================================================================
// Cut Command
// =============================================================================

fn run_cut(config: CutConfig) -> ExitCode {
    init_logging(config.log_filter());

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Configuration:");
    info!("  Input: {}", config.input.display());
    info!("  Output: {}", config.output.display());
    info!(
        "  Tiles: {}px {}{}",
        config.tile_size,
        config.format.extension(),
        if config.format == TileFormat::Jpeg {
            format!(" (quality {})", config.quality)
        } else {
            String::new()
        }
    );
    match config.max_zoom {
        Some(zoom) => info!("  Max zoom: {}", zoom),
        None => info!("  Max zoom: native"),
    }

    match cut_to_directory(&config) {
        Ok(report) => {
            info!("");
            info!("────────────────────────────────────────────────────────────────");
            info!(
                "  Cut {} tile(s) over zoom levels 0-{} in {}ms",
                report.summary.tiles_written, report.max_zoom, report.elapsed_ms
            );
            info!("  Tiles written to: {}", config.output.display());
            info!("────────────────────────────────────────────────────────────────");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Cut failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// Info Command
// =============================================================================

fn run_info(config: InfoConfig) -> ExitCode {
    init_logging(config.log_filter());

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let manifest = match describe(&config) {
        Ok(manifest) => manifest,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if config.json {
        match manifest.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_level_table(&manifest);
    }

    ExitCode::SUCCESS
}

/// Print the zoom level layout as a table.
fn print_level_table(manifest: &PyramidManifest) {
    println!(
        "Source: {}x{}",
        manifest.source.width, manifest.source.height
    );
    println!("Tile size: {}px", manifest.tile_size);
    println!();
    println!("{:>4}  {:>12}  {:>8}  {:>14}", "zoom", "image size", "grid", "tiles");
    println!("{}", "─".repeat(44));

    for level in &manifest.levels {
        let marker = if level.image_size > manifest.source.width.max(manifest.source.height) {
            " (upscaled)"
        } else {
            ""
        };
        println!(
            "{:>4}  {:>12}  {:>8}  {:>14}{}",
            level.zoom,
            format!("{0}x{0}", level.image_size),
            format!("{0}x{0}", level.tiles_per_side),
            level.tile_count,
            marker
        );
    }

    println!("{}", "─".repeat(44));
    println!("Total: {} tile(s)", manifest.tile_count);
}

/// Initialize the tracing/logging subsystem.
///
/// Logs go to stderr so `info --json` output on stdout stays parseable.
fn init_logging(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

//! End-to-end `cut` and `info` pipeline tests.

use travertine::output::MANIFEST_FILE_NAME;
use travertine::pipeline::{cut_to_directory, describe};
use travertine::{InfoConfig, OutputError, TileError, TileFormat};

use super::test_utils::{count_files, cut_config, quadrant_source, write_source};

#[test]
fn test_cut_native_zoom() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "source.png", &quadrant_source(64));
    let output = dir.path().join("tiles");

    let report = cut_to_directory(&cut_config(input, output.clone())).unwrap();

    // 64px source with 16px tiles: native max zoom is 2
    assert_eq!(report.max_zoom, 2);
    assert_eq!(report.summary.tiles_written, 21);
    assert_eq!(count_files(&output, "png"), 21);
    assert!(output.join(MANIFEST_FILE_NAME).is_file());
}

#[test]
fn test_cut_explicit_zoom_and_jpeg() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "source.png", &quadrant_source(64));
    let output = dir.path().join("tiles");

    let mut config = cut_config(input, output.clone());
    config.max_zoom = Some(1);
    config.format = TileFormat::Jpeg;
    config.no_manifest = true;

    let report = cut_to_directory(&config).unwrap();

    assert_eq!(report.max_zoom, 1);
    assert_eq!(count_files(&output, "jpg"), 5);
    assert!(!output.join(MANIFEST_FILE_NAME).exists());
    assert_eq!(report.manifest.url_template, "{z}/{x}/{y}.jpg");
}

#[test]
fn test_cut_manifest_contents() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "source.png", &quadrant_source(32));
    let output = dir.path().join("tiles");

    cut_to_directory(&cut_config(input, output.clone())).unwrap();

    let raw = std::fs::read_to_string(output.join(MANIFEST_FILE_NAME)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(json["tile_size"], 16);
    assert_eq!(json["max_zoom"], 1);
    assert_eq!(json["tile_count"], 5);
    assert_eq!(json["source"]["width"], 32);
    assert_eq!(json["levels"].as_array().unwrap().len(), 2);
    assert_eq!(json["levels"][1]["image_size"], 32);
}

#[test]
fn test_cut_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let config = cut_config(dir.path().join("missing.png"), dir.path().join("tiles"));

    let result = cut_to_directory(&config);
    assert!(matches!(result, Err(OutputError::Tile(TileError::Io(_)))));
}

#[test]
fn test_cut_twice_needs_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "source.png", &quadrant_source(32));
    let mut config = cut_config(input, dir.path().join("tiles"));

    cut_to_directory(&config).unwrap();
    assert!(matches!(
        cut_to_directory(&config),
        Err(OutputError::TileExists(_))
    ));

    config.overwrite = true;
    assert!(cut_to_directory(&config).is_ok());
}

#[test]
fn test_cut_zoom_over_level_budget() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "source.png", &quadrant_source(32));
    let output = dir.path().join("tiles");

    // 16px tiles at zoom 12 would need a 65536px level
    let mut config = cut_config(input, output.clone());
    config.max_zoom = Some(12);
    assert!(config.validate().is_err());

    let result = cut_to_directory(&config);
    assert!(matches!(
        result,
        Err(OutputError::Tile(TileError::LevelTooLarge {
            zoom: 12,
            side: 65536,
            ..
        }))
    ));
    assert_eq!(count_files(&output, "png"), 0);
    assert!(!output.join(MANIFEST_FILE_NAME).exists());
}

#[test]
fn test_describe() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "source.png", &quadrant_source(600));

    let manifest = describe(&InfoConfig {
        input,
        max_zoom: None,
        tile_size: 256,
        json: false,
        verbose: false,
    })
    .unwrap();

    assert_eq!(manifest.max_zoom, 1);
    assert_eq!(manifest.source.width, 600);
    assert_eq!(manifest.levels[1].image_size, 512);
    assert_eq!(manifest.tile_count, 5);
}

#[test]
fn test_describe_explicit_zoom() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "source.png", &quadrant_source(16));

    let manifest = describe(&InfoConfig {
        input,
        max_zoom: Some(5),
        tile_size: 256,
        json: true,
        verbose: false,
    })
    .unwrap();

    assert_eq!(manifest.levels.len(), 6);
    assert_eq!(manifest.levels[5].tiles_per_side, 32);
    assert_eq!(manifest.levels[5].image_size, 256 * 32);
}

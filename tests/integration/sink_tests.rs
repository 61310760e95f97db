//! Streaming pyramids into tile sinks.
//!
//! Tests verify:
//! - Every tile reaches the sink exactly once, in pyramid order
//! - Directory output follows the `{z}/{x}/{y}.{ext}` layout
//! - Sink errors abort the cut

use image::{GenericImageView, RgbaImage};

use travertine::{
    CutOptions, DirectorySink, MemorySink, OutputError, ResizeFilter, TileCutter, TileEncoder,
    TileFormat, TileId, TileSink,
};

use super::test_utils::{count_files, quadrant_source, GREEN};

fn cutter() -> TileCutter {
    TileCutter::new(CutOptions {
        tile_size: 16,
        filter: ResizeFilter::Nearest,
    })
}

/// Records the order tiles arrive in.
#[derive(Default)]
struct RecordingSink {
    ids: Vec<TileId>,
    finished: usize,
}

impl TileSink for RecordingSink {
    fn write_tile(&mut self, id: TileId, tile: &RgbaImage) -> Result<(), OutputError> {
        assert_eq!(tile.dimensions(), (16, 16));
        self.ids.push(id);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), OutputError> {
        self.finished += 1;
        Ok(())
    }
}

/// Fails after accepting a fixed number of tiles.
struct FailingSink {
    remaining: usize,
}

impl TileSink for FailingSink {
    fn write_tile(&mut self, id: TileId, _tile: &RgbaImage) -> Result<(), OutputError> {
        if self.remaining == 0 {
            return Err(OutputError::TileExists(id.to_string()));
        }
        self.remaining -= 1;
        Ok(())
    }
}

#[test]
fn test_tiles_arrive_in_pyramid_order() {
    let source = quadrant_source(64);
    let mut sink = RecordingSink::default();

    let summary = cutter().cut_pyramid_into(&source, 2, &mut sink).unwrap();

    assert_eq!(summary.tiles_written, 21);
    assert_eq!(summary.levels.len(), 3);
    assert_eq!(summary.levels[2].tiles_per_side, 4);
    assert_eq!(sink.finished, 1);

    let mut sorted = sink.ids.clone();
    sorted.sort();
    assert_eq!(sink.ids, sorted);
    assert_eq!(sink.ids[0], TileId::new(0, 0, 0));
    assert_eq!(sink.ids[1], TileId::new(1, 0, 0));
    assert_eq!(sink.ids[2], TileId::new(1, 0, 1));
    assert_eq!(sink.ids[20], TileId::new(2, 3, 3));
}

#[test]
fn test_memory_sink_matches_in_memory_pyramid() {
    let source = quadrant_source(64);
    let encoder = TileEncoder::new(TileFormat::Png, 80);
    let mut sink = MemorySink::new(encoder);

    cutter().cut_pyramid_into(&source, 2, &mut sink).unwrap();
    let pyramid = cutter().cut_pyramid(&source, 2).unwrap();

    assert!(sink.is_finished());
    assert_eq!(sink.len(), pyramid.tile_count());

    for tile in pyramid.tiles() {
        let encoded = sink.get(&tile.id).unwrap();
        let decoded = image::load_from_memory(encoded).unwrap().to_rgba8();
        assert_eq!(decoded, tile.image, "tile {}", tile.id);
    }
}

#[test]
fn test_directory_layout() {
    let dir = tempfile::tempdir().unwrap();
    let source = quadrant_source(64);
    let mut sink = DirectorySink::new(dir.path(), TileEncoder::default()).unwrap();

    cutter().cut_pyramid_into(&source, 2, &mut sink).unwrap();

    assert_eq!(sink.tiles_written(), 21);
    assert_eq!(count_files(dir.path(), "png"), 21);
    assert!(dir.path().join("0").join("0").join("0.png").is_file());
    assert!(dir.path().join("2").join("3").join("3.png").is_file());
    assert!(!dir.path().join("2").join("4").exists());

    // Column 3, row 0 of zoom 2 is the top-right quadrant
    let tile = image::open(dir.path().join("2").join("3").join("0.png"))
        .unwrap()
        .to_rgba8();
    assert!(tile.pixels().all(|p| *p == GREEN));
}

#[test]
fn test_directory_jpeg_tiles() {
    let dir = tempfile::tempdir().unwrap();
    let source = quadrant_source(32);
    let encoder = TileEncoder::new(TileFormat::Jpeg, 90);
    let mut sink = DirectorySink::new(dir.path(), encoder).unwrap();

    cutter().cut_pyramid_into(&source, 1, &mut sink).unwrap();

    assert_eq!(count_files(dir.path(), "jpg"), 5);
    let tile = image::open(dir.path().join("1").join("1").join("1.jpg")).unwrap();
    assert_eq!(tile.dimensions(), (16, 16));
}

#[test]
fn test_sink_error_aborts_cut() {
    let source = quadrant_source(64);
    let mut sink = FailingSink { remaining: 3 };

    let result = cutter().cut_pyramid_into(&source, 2, &mut sink);

    match result {
        Err(OutputError::TileExists(id)) => assert_eq!(id, "1/1/0"),
        other => panic!("Expected sink error, got {:?}", other),
    }
}

#[test]
fn test_second_run_refuses_existing_tiles() {
    let dir = tempfile::tempdir().unwrap();
    let source = quadrant_source(32);

    let mut first = DirectorySink::new(dir.path(), TileEncoder::default()).unwrap();
    cutter().cut_pyramid_into(&source, 1, &mut first).unwrap();

    let mut second = DirectorySink::new(dir.path(), TileEncoder::default()).unwrap();
    let result = cutter().cut_pyramid_into(&source, 1, &mut second);
    assert!(matches!(result, Err(OutputError::TileExists(_))));

    let mut third = DirectorySink::new(dir.path(), TileEncoder::default())
        .unwrap()
        .with_overwrite(true);
    assert!(cutter().cut_pyramid_into(&source, 1, &mut third).is_ok());
}

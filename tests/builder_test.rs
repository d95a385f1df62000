//! Integration tests for the report builder and layout engine.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use summarease::layout::{
    ensure_room, fit_image, resolve_path, BuildPhase, FlowState, LayoutConfig, PathKind,
    Placement, ReportBuilder, Surface,
};
use summarease::model::{Block, Column, Table};
use summarease::Error;
use tempfile::tempdir;

fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Rgb([255, 255, 255]))
        .save(&path)
        .unwrap();
    path
}

fn numbers(rows: i64) -> Table {
    Table::from_columns(vec![
        Column::integer("id", 0..rows),
        Column::float("value", (0..rows).map(|i| i as f64 * 1.5)),
    ])
    .unwrap()
}

fn page_count(path: &Path) -> usize {
    let bytes = std::fs::read(path).unwrap();
    lopdf::Document::load_mem(&bytes).unwrap().get_pages().len()
}

#[test]
fn test_full_report_lifecycle() {
    let dir = tempdir().unwrap();
    let img = write_png(dir.path(), "chart.png", 800, 600);
    let output = dir.path().join("nested/out/report.pdf");

    let mut builder = ReportBuilder::new(LayoutConfig::default()).unwrap();
    builder.start(&output).unwrap();

    // Parent directories exist before anything is written
    assert!(output.parent().unwrap().is_dir());
    assert!(!output.exists());

    builder
        .append_all(&[
            Block::title("Summary"),
            Block::section("Numbers"),
            Block::Table(numbers(10)),
            Block::image(&img),
        ])
        .unwrap();

    let report = builder.finish().unwrap();
    assert_eq!(report.path, output);
    assert!(output.exists());
    assert_eq!(report.stats.headers, 2);
    assert_eq!(report.stats.tables, 1);
    assert_eq!(report.stats.images, 1);
    assert_eq!(page_count(&output), report.page_count);
}

#[test]
fn test_append_after_finish_is_state_error() {
    let dir = tempdir().unwrap();
    let mut builder = ReportBuilder::new(LayoutConfig::default()).unwrap();
    builder.start(dir.path().join("report.pdf")).unwrap();
    builder.finish().unwrap();

    let result = builder.append_block(&Block::title("late"));
    assert!(matches!(result, Err(Error::State(_))));

    let result = builder.finish();
    assert!(matches!(result, Err(Error::State(_))));
    assert_eq!(builder.phase(), BuildPhase::Finalized);
}

#[test]
fn test_start_twice_is_state_error() {
    let dir = tempdir().unwrap();
    let mut builder = ReportBuilder::new(LayoutConfig::default()).unwrap();
    builder.start(dir.path().join("a.pdf")).unwrap();
    let result = builder.start(dir.path().join("b.pdf"));
    assert!(matches!(result, Err(Error::State(_))));
}

#[test]
fn test_missing_image_aborts_without_output() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("report.pdf");
    let mut builder = ReportBuilder::new(LayoutConfig::default()).unwrap();
    builder.start(&output).unwrap();

    builder.append_block(&Block::title("Summary")).unwrap();
    let result = builder.append_block(&Block::image(dir.path().join("img/missing.png")));
    assert!(matches!(result, Err(Error::NotFound(_))));

    // No partial document can be salvaged from a failed build
    assert!(matches!(
        builder.append_block(&Block::Table(numbers(3))),
        Err(Error::State(_))
    ));
    assert!(matches!(builder.finish(), Err(Error::State(_))));
    assert_eq!(builder.phase(), BuildPhase::Finalized);
    assert!(!output.exists());
}

#[test]
fn test_unsupported_image_extension() {
    let dir = tempdir().unwrap();
    let mut builder = ReportBuilder::new(LayoutConfig::default()).unwrap();
    builder.start(dir.path().join("report.pdf")).unwrap();

    let result = builder.append_block(&Block::image(dir.path().join("data.csv")));
    match result {
        Err(Error::UnsupportedFormat(ext)) => assert_eq!(ext, "csv"),
        other => panic!("expected UnsupportedFormat, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_image_extents_fit_padded_page() {
    let dir = tempdir().unwrap();
    let mut builder = ReportBuilder::new(LayoutConfig::default()).unwrap();
    builder.start(dir.path().join("report.pdf")).unwrap();

    for (name, w, h) in [
        ("large_image.png", 2000, 3000),
        ("small_image.png", 200, 300),
        ("normal_image.png", 800, 600),
    ] {
        let path = write_png(dir.path(), name, w, h);
        let Placement::Image(extent) = builder.append_block(&Block::image(&path)).unwrap() else {
            panic!("expected an image placement");
        };
        assert!(extent.width <= 180.0 + 1e-3);
        assert!(extent.height <= 267.0 + 1e-3);

        let natural = w as f32 / h as f32;
        let rendered = extent.width / extent.height;
        assert!((natural - rendered).abs() < 1e-3);
    }

    let report = builder.finish().unwrap();
    assert!(report.page_count >= 3);
}

#[test]
fn test_fit_image_examples() {
    let extent = fit_image(2000.0, 3000.0, 210.0, 297.0, 15).unwrap();
    assert!(extent.width <= 180.0);
    assert!((extent.height - 267.0).abs() < 1e-3);

    let extent = fit_image(800.0, 600.0, 210.0, 297.0, 15).unwrap();
    assert!((extent.width - 180.0).abs() < 1e-3);
    assert!((extent.height - 135.0).abs() < 1e-3);
}

#[test]
fn test_empty_table_leaves_cursor_unchanged() {
    let dir = tempdir().unwrap();
    let mut builder = ReportBuilder::new(LayoutConfig::default()).unwrap();
    builder.start(dir.path().join("report.pdf")).unwrap();

    let before = builder.surface().unwrap().cursor_y();
    builder.append_block(&Block::Table(Table::new())).unwrap();
    builder
        .append_block(&Block::Table(Table::empty_with_columns(&["a", "b"])))
        .unwrap();

    let surface = builder.surface().unwrap();
    assert_eq!(surface.cursor_y(), before);
    assert_eq!(surface.page_count(), 1);
    assert_eq!(builder.stats().empty_tables, 2);
}

#[test]
fn test_long_table_spans_pages() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("long.pdf");
    let mut builder = ReportBuilder::new(LayoutConfig::default()).unwrap();
    builder.start(&output).unwrap();

    let Placement::Table(layout) = builder.append_block(&Block::Table(numbers(120))).unwrap() else {
        panic!("expected a table placement");
    };
    assert_eq!(layout.rows_drawn, 120);
    assert!(layout.page_breaks >= 2);

    let report = builder.finish().unwrap();
    assert_eq!(page_count(&output), report.page_count);
}

#[test]
fn test_ensure_room_is_idempotent() {
    let mut surface = Surface::new(LayoutConfig::default());
    surface.advance(100.0);

    assert_eq!(ensure_room(&mut surface), FlowState::PageFull);
    assert_eq!(ensure_room(&mut surface), FlowState::RoomAvailable);
    assert_eq!(surface.page_count(), 2);
}

#[test]
fn test_resolve_path_is_idempotent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a/b/report.pdf");

    let first = resolve_path(&path).unwrap();
    let second = resolve_path(&path).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.kind, PathKind::File);
    assert!(dir.path().join("a/b").is_dir());
}

#[test]
fn test_output_path_is_directory() {
    let dir = tempdir().unwrap();
    let mut builder = ReportBuilder::new(LayoutConfig::default()).unwrap();
    let result = builder.start(dir.path());
    assert!(matches!(result, Err(Error::Validation(_))));
    assert_eq!(builder.phase(), BuildPhase::Initial);
}

#[test]
fn test_invalid_layout_config() {
    let config = LayoutConfig::new().with_page_size(f32::INFINITY, 297.0);
    assert!(matches!(
        ReportBuilder::new(config),
        Err(Error::InvalidType(_))
    ));
}

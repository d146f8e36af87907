#![cfg(feature = "cairo-backend")]

use galaxy_figures::FigureError;
use galaxy_figures::export::{render_png, write_png};
use galaxy_figures::figure::landscape::{LandscapeOptions, build_simulation_landscape_figure};
use galaxy_figures::figure::passive_nd::build_passive_nd_figure;
use galaxy_figures::render::CairoRenderer;

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, FigureError::InvalidData(_)));
}

#[test]
fn passive_figure_is_written_and_non_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("passive_nd_evolution.png");
    let figure = build_passive_nd_figure().expect("figure");

    let export = write_png(&figure, &path).expect("write png");
    let bytes = std::fs::read(&path).expect("read back");
    assert!(!bytes.is_empty());
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    assert!(export.width > 0 && export.width <= 500);
    assert!(export.height > 0 && export.height <= 800);
}

#[test]
fn rerendering_produces_identical_bytes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first = dir.path().join("first.png");
    let second = dir.path().join("second.png");
    let figure = build_passive_nd_figure().expect("figure");

    write_png(&figure, &first).expect("first write");
    write_png(&figure, &second).expect("second write");
    assert_eq!(
        std::fs::read(&first).expect("first"),
        std::fs::read(&second).expect("second")
    );
}

#[test]
fn missing_output_directory_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("no_such_dir").join("figure.png");
    let figure = build_passive_nd_figure().expect("figure");

    let err = write_png(&figure, &path).expect_err("directory is not created");
    assert!(matches!(err, FigureError::Io { .. }));
    assert!(!path.exists());
}

#[test]
fn tight_crop_fits_inside_the_page() {
    let figure = build_simulation_landscape_figure(LandscapeOptions::default()).expect("figure");
    let viewport = figure.viewport();
    let surface = render_png(&figure).expect("render");
    assert!(surface.width() > 0 && surface.width() as u32 <= viewport.width);
    assert!(surface.height() > 0 && surface.height() as u32 <= viewport.height);
}

//! Output writers: tight-cropped PNG rasters and JSON scene dumps.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{FigureError, FigureResult};
use crate::render::LayeredRenderFrame;

/// Summary of one written raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngExport {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Writes the layered scene as pretty-printed JSON.
///
/// The parent directory must exist.
pub fn write_frame_json(frame: &LayeredRenderFrame, path: impl AsRef<Path>) -> FigureResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| FigureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, frame)?;
    writer.flush().map_err(|source| FigureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), panels = frame.panels.len(), "wrote scene dump");
    Ok(())
}

#[cfg(feature = "cairo-backend")]
pub use raster::{render_png, write_png};

#[cfg(feature = "cairo-backend")]
mod raster {
    use std::fs::File;
    use std::path::Path;

    use cairo::{Context, Format, ImageSurface};
    use tracing::{debug, info};

    use super::PngExport;
    use crate::error::{FigureError, FigureResult};
    use crate::figure::Figure;
    use crate::render::crop::{PixelBounds, content_bounds};
    use crate::render::{
        CairoContextRenderer, CairoRenderer, RenderFrame, Renderer, compose_figure,
    };

    /// Rasterizes `figure` and crops the result to its content plus the
    /// configured padding.
    pub fn render_png(figure: &Figure) -> FigureResult<ImageSurface> {
        let frame = compose_figure(figure)?.flatten();
        let viewport = frame.viewport;
        let width = i32::try_from(viewport.width).map_err(|_| FigureError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        })?;
        let height = i32::try_from(viewport.height).map_err(|_| FigureError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        })?;

        let mut renderer = CairoRenderer::new(width, height)?;
        renderer.render(&frame)?;
        let stats = renderer.last_stats();
        debug!(
            lines = stats.lines_drawn,
            polylines = stats.polylines_drawn,
            rects = stats.rects_drawn,
            markers = stats.markers_drawn,
            texts = stats.texts_drawn,
            backend = renderer.backend_name(),
            "rasterized full page"
        );

        let full = PixelBounds {
            x: 0,
            y: 0,
            width: viewport.width,
            height: viewport.height,
        };
        let crop = content_extent(renderer.surface(), viewport.width, viewport.height, &frame)?
            .map_or(full, |bounds| {
                bounds.padded(
                    figure.config.pad_px(),
                    viewport.width,
                    viewport.height,
                )
            });
        debug!(
            x = crop.x,
            y = crop.y,
            width = crop.width,
            height = crop.height,
            "tight crop"
        );

        // Second pass draws straight onto the crop-sized surface.
        let cropped = ImageSurface::create(
            Format::ARgb32,
            to_i32(crop.width)?,
            to_i32(crop.height)?,
        )
        .map_err(|err| FigureError::Backend(format!("failed to create crop surface: {err}")))?;
        {
            let context = Context::new(&cropped).map_err(|err| {
                FigureError::Backend(format!("failed to create crop context: {err}"))
            })?;
            context.translate(-f64::from(crop.x), -f64::from(crop.y));
            renderer.render_on_cairo_context(&context, &frame)?;
        }
        cropped.flush();
        Ok(cropped)
    }

    /// Renders `figure` and writes it to `path`. Missing parent
    /// directories are reported, never created.
    pub fn write_png(figure: &Figure, path: impl AsRef<Path>) -> FigureResult<PngExport> {
        let path = path.as_ref();
        let surface = render_png(figure)?;
        let mut file = File::create(path).map_err(|source| FigureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        surface.write_to_png(&mut file).map_err(|err| match err {
            cairo::IoError::Io(source) => FigureError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => FigureError::Backend(format!("failed to encode png: {other}")),
        })?;

        let export = PngExport {
            path: path.to_path_buf(),
            width: u32::try_from(surface.width()).unwrap_or_default(),
            height: u32::try_from(surface.height()).unwrap_or_default(),
        };
        info!(
            path = %export.path.display(),
            width = export.width,
            height = export.height,
            "wrote figure"
        );
        Ok(export)
    }

    fn content_extent(
        surface: &ImageSurface,
        width: u32,
        height: u32,
        frame: &RenderFrame,
    ) -> FigureResult<Option<PixelBounds>> {
        surface.flush();
        let stride = usize::try_from(surface.stride()).map_err(|_| {
            FigureError::Backend("cairo surface reported a negative stride".to_owned())
        })?;
        let background = frame.background.argb32_premultiplied();
        let mut bounds = None;
        surface
            .with_data(|data| {
                bounds = content_bounds(data, stride, width, height, background);
            })
            .map_err(|err| FigureError::Backend(format!("failed to read surface: {err}")))?;
        Ok(bounds)
    }

    fn to_i32(value: u32) -> FigureResult<i32> {
        i32::try_from(value)
            .map_err(|_| FigureError::InvalidData(format!("crop extent {value} is too large")))
    }
}

#[cfg(test)]
mod tests {
    use super::write_frame_json;
    use crate::core::Viewport;
    use crate::error::FigureError;
    use crate::render::LayeredRenderFrame;

    #[test]
    fn scene_dump_into_missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("frame.json");
        let frame = LayeredRenderFrame::from_stacks(Viewport::new(10, 10), Vec::new());
        let err = write_frame_json(&frame, &path).expect_err("missing dir must fail");
        assert!(matches!(err, FigureError::Io { .. }));
    }

    #[test]
    fn scene_dump_is_valid_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("frame.json");
        let frame = LayeredRenderFrame::from_stacks(Viewport::new(10, 10), Vec::new());
        write_frame_json(&frame, &path).expect("write");
        let raw = std::fs::read_to_string(&path).expect("read back");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("parse");
        assert_eq!(value["viewport"]["width"], 10);
    }
}

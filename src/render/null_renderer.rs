use crate::error::FigureResult;
use crate::render::{Primitive, RenderFrame, Renderer};

/// No-op renderer used by tests and headless scene building.
///
/// It still validates frame content so tests catch invalid geometry without
/// a raster backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_primitive_count: usize,
    pub last_text_count: usize,
    pub last_marker_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> FigureResult<()> {
        frame.validate()?;
        self.last_primitive_count = frame.primitives.len();
        self.last_text_count = frame
            .primitives
            .iter()
            .filter(|primitive| matches!(primitive, Primitive::Text(_)))
            .count();
        self.last_marker_count = frame
            .primitives
            .iter()
            .filter(|primitive| matches!(primitive, Primitive::Marker(_)))
            .count();
        Ok(())
    }
}

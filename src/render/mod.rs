pub mod compose;
pub mod crop;
mod frame;
mod layer_stack;
mod layered_frame;
mod null_renderer;
mod primitives;
pub mod text_metrics;

pub use compose::compose_figure;
pub use frame::RenderFrame;
pub use layer_stack::{CanvasLayerKind, PanelId, PanelLayerStack};
pub use layered_frame::{LayerPrimitives, LayeredRenderFrame, PanelLayerFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, LinePrimitive, LineStrokeStyle, MarkerPrimitive, MarkerShape, PixelPoint,
    PolylinePrimitive, Primitive, RectPrimitive, TextHAlign, TextPrimitive, TextVAlign,
};

use crate::error::FigureResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from figure descriptions and data tables.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> FigureResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};

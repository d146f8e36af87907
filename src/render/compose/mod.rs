//! Turns a [`Figure`] description into a layered pixel-space scene.

mod axes;
mod decorations;
mod layout;
mod legend;
mod series;

pub use layout::panel_plot_rects;

use tracing::debug;

use crate::core::{AxisScale, PixelSpan, PlotRect};
use crate::error::{FigureError, FigureResult};
use crate::figure::{Figure, FigureConfig, FigureStyle, Panel};
use crate::render::{
    CanvasLayerKind, Color, LayeredRenderFrame, PanelId, PanelLayerStack, Primitive, TextHAlign,
    TextPrimitive, TextVAlign,
};

/// Composes every panel of `figure` into one layered frame.
///
/// The output depends only on the figure description, so two calls with
/// equal figures produce equal frames.
pub fn compose_figure(figure: &Figure) -> FigureResult<LayeredRenderFrame> {
    figure.validate()?;
    let viewport = figure.viewport();
    let rects = panel_plot_rects(figure)?;

    let stacks = rects
        .iter()
        .enumerate()
        .map(|(index, rect)| (PanelLayerStack::canonical_for_panel(PanelId::new(index)), *rect))
        .collect();
    let mut layered =
        LayeredRenderFrame::from_stacks(viewport, stacks).with_background(figure.config.background);

    for (index, (panel, rect)) in figure.panels.iter().zip(rects).enumerate() {
        let ctx = PanelContext::new(panel, rect, &figure.config, &figure.style)?;
        let mut sink = PanelSink::new(&mut layered, PanelId::new(index));

        series::append_series(&mut sink, &ctx)?;
        series::append_point_sets(&mut sink, &ctx)?;
        decorations::append_spans(&mut sink, &ctx)?;
        decorations::append_annotations(&mut sink, &ctx)?;
        legend::append_legend(&mut sink, &ctx);
        axes::append_axes(&mut sink, &ctx)?;

        debug!(
            panel = index,
            primitives = sink.pushed,
            plot_x = rect.x,
            plot_y = rect.y,
            plot_width = rect.width,
            plot_height = rect.height,
            "composed panel"
        );
    }

    Ok(layered)
}

/// Scales and style resolved for one panel.
pub(crate) struct PanelContext<'a> {
    pub panel: &'a Panel,
    pub rect: PlotRect,
    pub config: &'a FigureConfig,
    pub style: &'a FigureStyle,
    pub x_scale: AxisScale,
    pub y_scale: AxisScale,
}

impl<'a> PanelContext<'a> {
    fn new(
        panel: &'a Panel,
        rect: PlotRect,
        config: &'a FigureConfig,
        style: &'a FigureStyle,
    ) -> FigureResult<Self> {
        if !rect.is_valid() {
            return Err(FigureError::InvalidData(
                "figure margins leave no room for the plot area".to_owned(),
            ));
        }
        Ok(Self {
            panel,
            rect,
            config,
            style,
            x_scale: panel.x_axis.scale,
            y_scale: panel.y_axis.scale,
        })
    }

    pub fn pt(&self, points: f64) -> f64 {
        self.config.pt_to_px(points)
    }

    pub fn x_span(&self) -> PixelSpan {
        PixelSpan::new(self.rect.left(), self.rect.right())
    }

    /// Vertical span runs bottom to top so larger values sit higher.
    pub fn y_span(&self) -> PixelSpan {
        PixelSpan::new(self.rect.bottom(), self.rect.top())
    }

    pub fn x_px(&self, x: f64) -> FigureResult<f64> {
        self.x_scale.domain_to_pixel(x, self.x_span())
    }

    pub fn y_px(&self, y: f64) -> FigureResult<f64> {
        self.y_scale.domain_to_pixel(y, self.y_span())
    }

    pub fn to_px(&self, x: f64, y: f64) -> FigureResult<(f64, f64)> {
        Ok((self.x_px(x)?, self.y_px(y)?))
    }

    /// Mapping for data points; `None` marks a point that cannot be drawn
    /// (non-finite or outside a log domain).
    pub fn point_px(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let (px, py) = self.to_px(x, y).ok()?;
        (px.is_finite() && py.is_finite()).then_some((px, py))
    }

    pub fn text(
        &self,
        text: impl Into<String>,
        x: f64,
        y: f64,
        size_pt: f64,
        color: Color,
        align: (TextHAlign, TextVAlign),
    ) -> TextPrimitive {
        TextPrimitive::new(text, x, y, self.pt(size_pt), color, align.0).with_v_align(align.1)
    }
}

/// Collects primitives for one panel into the layered frame.
pub(crate) struct PanelSink<'a> {
    layered: &'a mut LayeredRenderFrame,
    panel_id: PanelId,
    pushed: usize,
}

impl<'a> PanelSink<'a> {
    fn new(layered: &'a mut LayeredRenderFrame, panel_id: PanelId) -> Self {
        Self {
            layered,
            panel_id,
            pushed: 0,
        }
    }

    pub fn push(&mut self, layer: CanvasLayerKind, primitive: impl Into<Primitive>) {
        self.layered.push(self.panel_id, layer, primitive);
        self.pushed += 1;
    }
}

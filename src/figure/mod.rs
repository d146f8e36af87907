//! Figure descriptions: panels, series and the page they are laid out on.

mod config;
pub mod landscape;
mod panel;
pub mod passive_nd;
mod series;

pub use config::{FigureConfig, FigureStyle, LegendMetrics};
pub use panel::{
    Annotation, ArrowAnnotation, Axis, AxisSide, Hatch, Legend, LegendLocation, Panel,
    ReferenceLine, SecondaryAxis, SecondaryTicks, Span, SpanOrientation, TextAnnotation,
};
pub use series::{ErrorBar, Series, SeriesStyle};

use serde::Serialize;

use crate::core::Viewport;
use crate::error::{FigureError, FigureResult};

/// Ordered stack of panels drawn top to bottom onto one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub config: FigureConfig,
    pub style: FigureStyle,
    pub panels: Vec<Panel>,
}

impl Figure {
    #[must_use]
    pub fn new(config: FigureConfig) -> Self {
        Self {
            config,
            style: FigureStyle::default(),
            panels: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: FigureStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_panel(mut self, panel: Panel) -> Self {
        self.panels.push(panel);
        self
    }

    pub fn validate(&self) -> FigureResult<()> {
        self.config.validate()?;
        self.style.validate()?;
        if self.panels.is_empty() {
            return Err(FigureError::InvalidData(
                "figure needs at least one panel".to_owned(),
            ));
        }
        for panel in &self.panels {
            panel.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport()
    }

    /// Converts a length in points to pixels at the figure DPI.
    #[must_use]
    pub fn pt_to_px(&self, points: f64) -> f64 {
        self.config.pt_to_px(points)
    }
}

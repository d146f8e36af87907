use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{FigureError, FigureResult};
use crate::render::Color;

const POINTS_PER_INCH: f64 = 72.0;

/// Page and output settings for one figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureConfig {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: f64,
    /// Padding kept around the content when cropping to its bounding box.
    pub pad_in: f64,
    pub background: Color,
    pub output_path: PathBuf,
}

impl FigureConfig {
    /// Creates a config for a page of `width_in` x `height_in` inches at 100 DPI.
    #[must_use]
    pub fn new(width_in: f64, height_in: f64) -> Self {
        Self {
            width_in,
            height_in,
            dpi: 100.0,
            pad_in: 0.1,
            background: Color::WHITE,
            output_path: PathBuf::from("plots/figure.png"),
        }
    }

    #[must_use]
    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    #[must_use]
    pub fn with_pad_in(mut self, pad_in: f64) -> Self {
        self.pad_in = pad_in;
        self
    }

    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub fn with_output_path(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = output_path.into();
        self
    }

    pub fn validate(&self) -> FigureResult<()> {
        for (name, value) in [("width", self.width_in), ("height", self.height_in)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(FigureError::InvalidData(format!(
                    "figure {name} must be finite and > 0"
                )));
            }
        }
        if !self.dpi.is_finite() || self.dpi <= 0.0 {
            return Err(FigureError::InvalidData(
                "figure dpi must be finite and > 0".to_owned(),
            ));
        }
        if !self.pad_in.is_finite() || self.pad_in < 0.0 {
            return Err(FigureError::InvalidData(
                "figure padding must be finite and >= 0".to_owned(),
            ));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(FigureError::InvalidData(
                "figure output path must not be empty".to_owned(),
            ));
        }
        let viewport = self.viewport();
        if !viewport.is_valid() {
            return Err(FigureError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.background.validate()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            (self.width_in * self.dpi).round() as u32,
            (self.height_in * self.dpi).round() as u32,
        )
    }

    #[must_use]
    pub fn pt_to_px(&self, points: f64) -> f64 {
        points * self.dpi / POINTS_PER_INCH
    }

    #[must_use]
    pub fn pad_px(&self) -> u32 {
        (self.pad_in * self.dpi).round() as u32
    }
}

/// Legend box metrics in units of the legend font size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendMetrics {
    pub font_size_pt: f64,
    pub handle_length_em: f64,
    pub handle_text_pad_em: f64,
    pub border_pad_em: f64,
    pub label_spacing_em: f64,
    pub border_axes_pad_em: f64,
    pub corner_radius_em: f64,
    pub edge_color: Color,
    pub edge_width_pt: f64,
}

impl Default for LegendMetrics {
    fn default() -> Self {
        Self {
            font_size_pt: 10.0,
            handle_length_em: 2.0,
            handle_text_pad_em: 0.8,
            border_pad_em: 0.4,
            label_spacing_em: 0.5,
            border_axes_pad_em: 0.5,
            corner_radius_em: 0.2,
            edge_color: Color::LIGHT_GREY,
            edge_width_pt: 0.8,
        }
    }
}

/// Typography and spacing shared by every panel of a figure, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigureStyle {
    pub margin_left_pt: f64,
    pub margin_right_pt: f64,
    pub margin_top_pt: f64,
    pub margin_bottom_pt: f64,
    /// Vertical gap between stacked panels.
    pub panel_gap_pt: f64,
    pub axis_label_font_size_pt: f64,
    pub tick_label_font_size_pt: f64,
    pub major_tick_length_pt: f64,
    pub minor_tick_length_pt: f64,
    pub major_tick_width_pt: f64,
    pub minor_tick_width_pt: f64,
    pub tick_label_pad_pt: f64,
    pub axis_label_pad_pt: f64,
    pub frame_width_pt: f64,
    pub frame_color: Color,
    pub text_color: Color,
    pub grid_color: Color,
    pub grid_width_pt: f64,
    pub error_bar_width_pt: f64,
    pub hatch_width_pt: f64,
    /// Arrow shortening at both ends, away from text and target.
    pub arrow_shrink_pt: f64,
    pub legend: LegendMetrics,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            margin_left_pt: 58.0,
            margin_right_pt: 46.0,
            margin_top_pt: 10.0,
            margin_bottom_pt: 40.0,
            panel_gap_pt: 46.0,
            axis_label_font_size_pt: 12.0,
            tick_label_font_size_pt: 10.0,
            major_tick_length_pt: 3.5,
            minor_tick_length_pt: 2.0,
            major_tick_width_pt: 0.8,
            minor_tick_width_pt: 0.6,
            tick_label_pad_pt: 3.5,
            axis_label_pad_pt: 4.0,
            frame_width_pt: 0.8,
            frame_color: Color::BLACK,
            text_color: Color::BLACK,
            grid_color: Color::GRID,
            grid_width_pt: 0.8,
            error_bar_width_pt: 1.5,
            hatch_width_pt: 1.0,
            arrow_shrink_pt: 2.0,
            legend: LegendMetrics::default(),
        }
    }
}

impl FigureStyle {
    #[must_use]
    pub fn with_margins(mut self, left_pt: f64, right_pt: f64, top_pt: f64, bottom_pt: f64) -> Self {
        self.margin_left_pt = left_pt;
        self.margin_right_pt = right_pt;
        self.margin_top_pt = top_pt;
        self.margin_bottom_pt = bottom_pt;
        self
    }

    #[must_use]
    pub fn with_panel_gap_pt(mut self, panel_gap_pt: f64) -> Self {
        self.panel_gap_pt = panel_gap_pt;
        self
    }

    pub fn validate(&self) -> FigureResult<()> {
        for (name, value) in [
            ("margin_left_pt", self.margin_left_pt),
            ("margin_right_pt", self.margin_right_pt),
            ("margin_top_pt", self.margin_top_pt),
            ("margin_bottom_pt", self.margin_bottom_pt),
            ("panel_gap_pt", self.panel_gap_pt),
            ("major_tick_length_pt", self.major_tick_length_pt),
            ("minor_tick_length_pt", self.minor_tick_length_pt),
            ("tick_label_pad_pt", self.tick_label_pad_pt),
            ("axis_label_pad_pt", self.axis_label_pad_pt),
            ("arrow_shrink_pt", self.arrow_shrink_pt),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(FigureError::InvalidData(format!(
                    "style `{name}` must be finite and >= 0"
                )));
            }
        }
        for (name, value) in [
            ("axis_label_font_size_pt", self.axis_label_font_size_pt),
            ("tick_label_font_size_pt", self.tick_label_font_size_pt),
            ("major_tick_width_pt", self.major_tick_width_pt),
            ("minor_tick_width_pt", self.minor_tick_width_pt),
            ("frame_width_pt", self.frame_width_pt),
            ("grid_width_pt", self.grid_width_pt),
            ("error_bar_width_pt", self.error_bar_width_pt),
            ("hatch_width_pt", self.hatch_width_pt),
            ("legend.font_size_pt", self.legend.font_size_pt),
            ("legend.edge_width_pt", self.legend.edge_width_pt),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(FigureError::InvalidData(format!(
                    "style `{name}` must be finite and > 0"
                )));
            }
        }
        self.frame_color.validate()?;
        self.text_color.validate()?;
        self.grid_color.validate()?;
        self.legend.edge_color.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::{FigureConfig, FigureStyle};

    #[test]
    fn five_by_eight_inches_at_100_dpi_is_500_by_800_px() {
        let config = FigureConfig::new(5.0, 8.0);
        let viewport = config.viewport();
        assert_eq!((viewport.width, viewport.height), (500, 800));
        assert_eq!(config.pad_px(), 10);
    }

    #[test]
    fn points_scale_with_dpi() {
        let config = FigureConfig::new(5.0, 8.0).with_dpi(144.0);
        assert!((config.pt_to_px(12.0) - 24.0).abs() <= 1e-12);
    }

    #[test]
    fn non_positive_dpi_is_rejected() {
        assert!(FigureConfig::new(5.0, 8.0).with_dpi(0.0).validate().is_err());
    }

    #[test]
    fn negative_margin_is_rejected() {
        let style = FigureStyle::default().with_margins(-1.0, 0.0, 0.0, 0.0);
        assert!(style.validate().is_err());
    }
}

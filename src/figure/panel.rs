use serde::Serialize;

use crate::core::{AxisScale, LinearTransform, ScaleKind};
use crate::error::{FigureError, FigureResult};
use crate::render::{Color, LineStrokeStyle, TextHAlign, TextVAlign};

use super::Series;

/// One plot axis: scale, orientation and label.
///
/// Labels are Pango markup, so `<sub>`/`<sup>` are available and literal
/// `&`, `<` and `>` must be escaped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub scale: AxisScale,
    pub label: String,
}

impl Axis {
    pub fn linear(start: f64, end: f64, label: impl Into<String>) -> FigureResult<Self> {
        Ok(Self {
            scale: AxisScale::linear(start, end)?,
            label: label.into(),
        })
    }

    pub fn log10(start: f64, end: f64, label: impl Into<String>) -> FigureResult<Self> {
        Ok(Self {
            scale: AxisScale::log10(start, end)?,
            label: label.into(),
        })
    }
}

/// Side of the plot a secondary axis is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AxisSide {
    /// Twin of the y axis.
    Right,
    /// Twin of the x axis.
    Top,
}

/// Tick placement on a secondary axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SecondaryTicks {
    /// Integer positions of the primary axis, labelled with the truncated
    /// transformed value.
    Integer,
    /// Nice ticks chosen in the transformed domain.
    Nice,
}

/// Axis sharing the primary axis' range, labelled through a linear transform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecondaryAxis {
    pub side: AxisSide,
    pub transform: LinearTransform,
    pub ticks: SecondaryTicks,
    pub label: String,
}

impl SecondaryAxis {
    #[must_use]
    pub fn new(
        side: AxisSide,
        transform: LinearTransform,
        ticks: SecondaryTicks,
        label: impl Into<String>,
    ) -> Self {
        Self {
            side,
            transform,
            ticks,
            label: label.into(),
        }
    }
}

/// Diagonal `/` hatch drawn over a span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hatch {
    /// Number of `/` characters in the hatch pattern (`///` is 3).
    pub density: u32,
    pub color: Color,
}

impl Hatch {
    /// Hatch written as a string of `/` characters, e.g. `"///"`.
    pub fn parse(pattern: &str, color: Color) -> FigureResult<Self> {
        if pattern.is_empty() || pattern.chars().any(|ch| ch != '/') {
            return Err(FigureError::InvalidData(format!(
                "unsupported hatch pattern `{pattern}`"
            )));
        }
        Ok(Self {
            density: pattern.chars().count() as u32,
            color,
        })
    }

    /// Distance between hatch lines, in pixels.
    #[must_use]
    pub fn spacing_px(self, dpi: f64) -> f64 {
        dpi / (f64::from(self.density) * 6.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpanOrientation {
    /// Band between two y values across the full width.
    Horizontal,
    /// Band between two x values across the full height.
    Vertical,
}

/// Shaded band between two data values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Span {
    pub orientation: SpanOrientation,
    pub start: f64,
    pub end: f64,
    pub color: Color,
    pub hatch: Option<Hatch>,
}

impl Span {
    #[must_use]
    pub fn horizontal(start: f64, end: f64, color: Color) -> Self {
        Self {
            orientation: SpanOrientation::Horizontal,
            start,
            end,
            color,
            hatch: None,
        }
    }

    #[must_use]
    pub fn vertical(start: f64, end: f64, color: Color) -> Self {
        Self {
            orientation: SpanOrientation::Vertical,
            start,
            end,
            color,
            hatch: None,
        }
    }

    #[must_use]
    pub fn with_hatch(mut self, hatch: Hatch) -> Self {
        self.hatch = Some(hatch);
        self
    }
}

/// Label placed at a data position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextAnnotation {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_pt: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    pub v_align: TextVAlign,
    pub rotation_deg: f64,
    /// Screen offset from the anchor in points; positive `dy` is upward.
    pub offset_pt: (f64, f64),
    pub markup: bool,
}

impl TextAnnotation {
    #[must_use]
    pub fn new(text: impl Into<String>, x: f64, y: f64, font_size_pt: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_pt,
            color: Color::BLACK,
            h_align: TextHAlign::Left,
            v_align: TextVAlign::Baseline,
            rotation_deg: 0.0,
            offset_pt: (0.0, 0.0),
            markup: false,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_align(mut self, h_align: TextHAlign, v_align: TextVAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation_deg: f64) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    #[must_use]
    pub fn with_offset_pt(mut self, dx: f64, dy: f64) -> Self {
        self.offset_pt = (dx, dy);
        self
    }

    #[must_use]
    pub fn with_markup(mut self) -> Self {
        self.markup = true;
        self
    }
}

/// Arrow from a text label to a target point, both in data coordinates.
///
/// The label is centred horizontally on `text_at` with its bottom edge there.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrowAnnotation {
    pub text: String,
    pub tip: (f64, f64),
    pub text_at: (f64, f64),
    pub color: Color,
    pub width_pt: f64,
    pub font_size_pt: f64,
}

impl ArrowAnnotation {
    #[must_use]
    pub fn new(text: impl Into<String>, tip: (f64, f64), text_at: (f64, f64), color: Color) -> Self {
        Self {
            text: text.into(),
            tip,
            text_at,
            color,
            width_pt: 1.5,
            font_size_pt: 10.0,
        }
    }

    #[must_use]
    pub fn with_width_pt(mut self, width_pt: f64) -> Self {
        self.width_pt = width_pt;
        self
    }
}

/// Line across the whole plot at a fixed data value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub orientation: SpanOrientation,
    pub value: f64,
    pub color: Color,
    pub width_pt: f64,
    pub stroke: LineStrokeStyle,
}

impl ReferenceLine {
    #[must_use]
    pub fn vertical(x: f64, color: Color) -> Self {
        Self {
            orientation: SpanOrientation::Vertical,
            value: x,
            color,
            width_pt: 1.5,
            stroke: LineStrokeStyle::Solid,
        }
    }

    #[must_use]
    pub fn horizontal(y: f64, color: Color) -> Self {
        Self {
            orientation: SpanOrientation::Horizontal,
            value: y,
            color,
            width_pt: 1.5,
            stroke: LineStrokeStyle::Solid,
        }
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: LineStrokeStyle) -> Self {
        self.stroke = stroke;
        self
    }

    #[must_use]
    pub fn with_width_pt(mut self, width_pt: f64) -> Self {
        self.width_pt = width_pt;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Annotation {
    Text(TextAnnotation),
    Arrow(ArrowAnnotation),
    Line(ReferenceLine),
}

impl From<TextAnnotation> for Annotation {
    fn from(value: TextAnnotation) -> Self {
        Self::Text(value)
    }
}

impl From<ArrowAnnotation> for Annotation {
    fn from(value: ArrowAnnotation) -> Self {
        Self::Arrow(value)
    }
}

impl From<ReferenceLine> for Annotation {
    fn from(value: ReferenceLine) -> Self {
        Self::Line(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LegendLocation {
    LowerLeft,
    LowerRight,
}

/// Legend box listing every labelled series of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Legend {
    pub location: LegendLocation,
    pub face_color: Color,
    pub frame_alpha: f64,
}

impl Legend {
    #[must_use]
    pub fn new(location: LegendLocation) -> Self {
        Self {
            location,
            face_color: Color::WHITE,
            frame_alpha: 0.8,
        }
    }

    #[must_use]
    pub fn with_frame_alpha(mut self, frame_alpha: f64) -> Self {
        self.frame_alpha = frame_alpha;
        self
    }

    #[must_use]
    pub fn with_face_color(mut self, face_color: Color) -> Self {
        self.face_color = face_color;
        self
    }
}

/// One plot region with its axes, data and decorations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub secondary_axis: Option<SecondaryAxis>,
    pub series: Vec<Series>,
    pub spans: Vec<Span>,
    pub annotations: Vec<Annotation>,
    pub legend: Option<Legend>,
    pub grid: bool,
    /// Share of the page height relative to sibling panels.
    pub height_ratio: f64,
}

impl Panel {
    #[must_use]
    pub fn new(x_axis: Axis, y_axis: Axis) -> Self {
        Self {
            x_axis,
            y_axis,
            secondary_axis: None,
            series: Vec::new(),
            spans: Vec::new(),
            annotations: Vec::new(),
            legend: None,
            grid: false,
            height_ratio: 1.0,
        }
    }

    #[must_use]
    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.spans.push(span);
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: impl Into<Annotation>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    #[must_use]
    pub fn with_secondary_axis(mut self, secondary_axis: SecondaryAxis) -> Self {
        self.secondary_axis = Some(secondary_axis);
        self
    }

    #[must_use]
    pub fn with_legend(mut self, legend: Legend) -> Self {
        self.legend = Some(legend);
        self
    }

    #[must_use]
    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    #[must_use]
    pub fn with_height_ratio(mut self, height_ratio: f64) -> Self {
        self.height_ratio = height_ratio;
        self
    }

    /// Labelled series in draw order.
    pub fn legend_entries(&self) -> impl Iterator<Item = &Series> {
        self.series.iter().filter(|series| series.label().is_some())
    }

    pub fn validate(&self) -> FigureResult<()> {
        if !self.height_ratio.is_finite() || self.height_ratio <= 0.0 {
            return Err(FigureError::InvalidData(
                "panel height ratio must be finite and > 0".to_owned(),
            ));
        }
        if let Some(secondary) = &self.secondary_axis {
            secondary.transform.validate()?;
        }
        for span in &self.spans {
            if !span.start.is_finite() || !span.end.is_finite() {
                return Err(FigureError::InvalidData(
                    "span bounds must be finite".to_owned(),
                ));
            }
            span.color.validate()?;
            if let Some(hatch) = span.hatch {
                hatch.color.validate()?;
            }
        }
        for annotation in &self.annotations {
            match annotation {
                Annotation::Text(text) => {
                    if text.text.is_empty() || !text.font_size_pt.is_finite() || text.font_size_pt <= 0.0 {
                        return Err(FigureError::InvalidData(
                            "text annotation needs text and a positive font size".to_owned(),
                        ));
                    }
                }
                Annotation::Arrow(arrow) => {
                    if !arrow.width_pt.is_finite() || arrow.width_pt <= 0.0 {
                        return Err(FigureError::InvalidData(
                            "arrow width must be finite and > 0".to_owned(),
                        ));
                    }
                }
                Annotation::Line(line) => {
                    if !line.value.is_finite() {
                        return Err(FigureError::InvalidData(
                            "reference line value must be finite".to_owned(),
                        ));
                    }
                }
            }
        }
        if let Some(legend) = self.legend
            && !(0.0..=1.0).contains(&legend.frame_alpha)
        {
            return Err(FigureError::InvalidData(
                "legend frame alpha must be in [0, 1]".to_owned(),
            ));
        }
        Ok(())
    }
}

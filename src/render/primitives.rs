use serde::{Deserialize, Serialize};

use crate::error::{FigureError, FigureResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    /// Single-letter `g`: half-intensity green.
    pub const GREEN: Self = Self::rgb(0.0, 0.5, 0.0);
    pub const GREY: Self = Self::rgb8(0x80, 0x80, 0x80);
    pub const ORANGE: Self = Self::rgb8(0xff, 0xa5, 0x00);
    pub const CHARCOAL: Self = Self::rgb8(0x33, 0x33, 0x33);
    pub const LIGHT_GREY: Self = Self::rgb8(0xcc, 0xcc, 0xcc);
    pub const GRID: Self = Self::rgb8(0xe6, 0xe6, 0xe6);
    /// Default property-cycle colors, in cycle order.
    pub const CYCLE_BLUE: Self = Self::rgb8(0x1f, 0x77, 0xb4);
    pub const CYCLE_ORANGE: Self = Self::rgb8(0xff, 0x7f, 0x0e);
    pub const CYCLE_GREEN: Self = Self::rgb8(0x2c, 0xa0, 0x2c);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub const fn rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
        )
    }

    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self::rgba(self.red, self.green, self.blue, alpha)
    }

    /// Native-endian ARGB32 premultiplied pixel value of this color.
    #[must_use]
    pub fn argb32_premultiplied(self) -> u32 {
        let channel = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u32;
        let alpha = self.alpha.clamp(0.0, 1.0);
        (channel(alpha) << 24)
            | (channel(self.red * alpha) << 16)
            | (channel(self.green * alpha) << 8)
            | channel(self.blue * alpha)
    }

    pub fn validate(self) -> FigureResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(FigureError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Dash pattern applied when stroking lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineStrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineStrokeStyle {
    /// Dash lengths in pixels, scaled with the stroke width.
    #[must_use]
    pub fn dash_pattern(self, stroke_width: f64) -> Vec<f64> {
        match self {
            Self::Solid => Vec::new(),
            Self::Dashed => vec![3.7 * stroke_width, 1.6 * stroke_width],
            Self::Dotted => vec![1.0 * stroke_width, 1.65 * stroke_width],
        }
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
    pub stroke_style: LineStrokeStyle,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
            stroke_style: LineStrokeStyle::Solid,
        }
    }

    #[must_use]
    pub const fn with_stroke_style(mut self, stroke_style: LineStrokeStyle) -> Self {
        self.stroke_style = stroke_style;
        self
    }

    pub fn validate(self) -> FigureResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(FigureError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        validate_stroke_width(self.stroke_width)?;
        self.color.validate()
    }
}

/// Point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Draw command for a connected line through several points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolylinePrimitive {
    pub points: Vec<PixelPoint>,
    pub stroke_width: f64,
    pub color: Color,
    pub stroke_style: LineStrokeStyle,
}

impl PolylinePrimitive {
    #[must_use]
    pub fn new(
        points: Vec<PixelPoint>,
        stroke_width: f64,
        color: Color,
        stroke_style: LineStrokeStyle,
    ) -> Self {
        Self {
            points,
            stroke_width,
            color,
            stroke_style,
        }
    }

    pub fn validate(&self) -> FigureResult<()> {
        if self.points.len() < 2 {
            return Err(FigureError::InvalidData(
                "polyline needs at least two points".to_owned(),
            ));
        }
        if self
            .points
            .iter()
            .any(|point| !point.x.is_finite() || !point.y.is_finite())
        {
            return Err(FigureError::InvalidData(
                "polyline coordinates must be finite".to_owned(),
            ));
        }
        validate_stroke_width(self.stroke_width)?;
        self.color.validate()
    }
}

/// Draw command for a filled and/or bordered rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
    pub border_color: Color,
    pub border_width: f64,
    pub corner_radius: f64,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
            border_color: Color::TRANSPARENT,
            border_width: 0.0,
            corner_radius: 0.0,
        }
    }

    #[must_use]
    pub const fn with_border(mut self, border_color: Color, border_width: f64) -> Self {
        self.border_color = border_color;
        self.border_width = border_width;
        self
    }

    #[must_use]
    pub const fn with_corner_radius(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    pub fn validate(self) -> FigureResult<()> {
        if !self.x.is_finite()
            || !self.y.is_finite()
            || !self.width.is_finite()
            || !self.height.is_finite()
        {
            return Err(FigureError::InvalidData(
                "rect geometry must be finite".to_owned(),
            ));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(FigureError::InvalidData(
                "rect size must be > 0".to_owned(),
            ));
        }
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            return Err(FigureError::InvalidData(
                "rect border width must be finite and >= 0".to_owned(),
            ));
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(FigureError::InvalidData(
                "rect corner radius must be finite and >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()?;
        self.border_color.validate()
    }
}

/// Glyph drawn at each point of a marker series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerShape {
    Circle,
    /// Small dot, half the diameter of `Circle` at the same size.
    Point,
    Square,
    TriangleDown,
    Star,
    Pentagon,
}

/// Draw command for one marker centred on `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerPrimitive {
    pub x: f64,
    pub y: f64,
    pub shape: MarkerShape,
    pub size_px: f64,
    pub fill_color: Color,
    pub edge_color: Color,
    pub edge_width: f64,
}

impl MarkerPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, shape: MarkerShape, size_px: f64, color: Color) -> Self {
        Self {
            x,
            y,
            shape,
            size_px,
            fill_color: color,
            edge_color: color,
            edge_width: 1.0,
        }
    }

    #[must_use]
    pub const fn hollow(mut self, edge_width: f64) -> Self {
        self.fill_color = Color::TRANSPARENT;
        self.edge_width = edge_width;
        self
    }

    pub fn validate(self) -> FigureResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(FigureError::InvalidData(
                "marker coordinates must be finite".to_owned(),
            ));
        }
        if !self.size_px.is_finite() || self.size_px <= 0.0 {
            return Err(FigureError::InvalidData(
                "marker size must be finite and > 0".to_owned(),
            ));
        }
        if !self.edge_width.is_finite() || self.edge_width < 0.0 {
            return Err(FigureError::InvalidData(
                "marker edge width must be finite and >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()?;
        self.edge_color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextHAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text alignment relative to `TextPrimitive::y`.
///
/// Rotated text aligns its screen-space bounding box; `Baseline` then
/// behaves like `Bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextVAlign {
    Top,
    Center,
    #[default]
    Baseline,
    Bottom,
}

/// Draw command for one label in pixel space.
///
/// With `markup` set, `text` is Pango markup (`<sub>`, `<sup>`, escaped
/// entities); otherwise it is drawn verbatim. Newlines start new lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    pub v_align: TextVAlign,
    /// Counter-clockwise rotation in degrees.
    pub rotation_deg: f64,
    pub markup: bool,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
            v_align: TextVAlign::Baseline,
            rotation_deg: 0.0,
            markup: false,
        }
    }

    #[must_use]
    pub fn with_v_align(mut self, v_align: TextVAlign) -> Self {
        self.v_align = v_align;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation_deg: f64) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    #[must_use]
    pub fn with_markup(mut self, markup: bool) -> Self {
        self.markup = markup;
        self
    }

    pub fn validate(&self) -> FigureResult<()> {
        if self.text.is_empty() {
            return Err(FigureError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(FigureError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(FigureError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        if !self.rotation_deg.is_finite() {
            return Err(FigureError::InvalidData(
                "text rotation must be finite".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// One draw command; a frame keeps these in paint order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Line(LinePrimitive),
    Polyline(PolylinePrimitive),
    Rect(RectPrimitive),
    Marker(MarkerPrimitive),
    Text(TextPrimitive),
}

impl Primitive {
    pub fn validate(&self) -> FigureResult<()> {
        match self {
            Self::Line(line) => line.validate(),
            Self::Polyline(polyline) => polyline.validate(),
            Self::Rect(rect) => rect.validate(),
            Self::Marker(marker) => marker.validate(),
            Self::Text(text) => text.validate(),
        }
    }
}

impl From<LinePrimitive> for Primitive {
    fn from(value: LinePrimitive) -> Self {
        Self::Line(value)
    }
}

impl From<PolylinePrimitive> for Primitive {
    fn from(value: PolylinePrimitive) -> Self {
        Self::Polyline(value)
    }
}

impl From<RectPrimitive> for Primitive {
    fn from(value: RectPrimitive) -> Self {
        Self::Rect(value)
    }
}

impl From<MarkerPrimitive> for Primitive {
    fn from(value: MarkerPrimitive) -> Self {
        Self::Marker(value)
    }
}

impl From<TextPrimitive> for Primitive {
    fn from(value: TextPrimitive) -> Self {
        Self::Text(value)
    }
}

fn validate_stroke_width(stroke_width: f64) -> FigureResult<()> {
    if !stroke_width.is_finite() || stroke_width <= 0.0 {
        return Err(FigureError::InvalidData(
            "line stroke width must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Color, LinePrimitive, TextHAlign, TextPrimitive};

    #[test]
    fn opaque_white_maps_to_all_ones_pixel() {
        assert_eq!(Color::WHITE.argb32_premultiplied(), 0xffff_ffff);
    }

    #[test]
    fn translucent_color_is_premultiplied() {
        let pixel = Color::rgba(1.0, 0.0, 0.0, 0.5).argb32_premultiplied();
        assert_eq!(pixel, 0x8080_0000);
    }

    #[test]
    fn out_of_range_channel_is_rejected() {
        let line = LinePrimitive::new(0.0, 0.0, 1.0, 1.0, 1.0, Color::rgba(1.2, 0.0, 0.0, 1.0));
        assert!(line.validate().is_err());
    }

    #[test]
    fn empty_text_is_rejected() {
        let text = TextPrimitive::new("", 0.0, 0.0, 10.0, Color::BLACK, TextHAlign::Left);
        assert!(text.validate().is_err());
    }
}

use serde::Serialize;

use crate::error::{FigureError, FigureResult};
use crate::render::{Color, LineStrokeStyle, MarkerShape};

/// Error bar extents in data units, one entry per point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ErrorBar {
    Symmetric(Vec<f64>),
    Asymmetric { lower: Vec<f64>, upper: Vec<f64> },
}

impl ErrorBar {
    /// Same lower and upper extent for every point.
    #[must_use]
    pub fn uniform(extent: f64, count: usize) -> Self {
        Self::Symmetric(vec![extent; count])
    }

    /// Separate lower and upper extent, shared by every point.
    #[must_use]
    pub fn uniform_asymmetric(lower: f64, upper: f64, count: usize) -> Self {
        Self::Asymmetric {
            lower: vec![lower; count],
            upper: vec![upper; count],
        }
    }

    /// `(lower, upper)` extents for point `index`.
    #[must_use]
    pub fn extents(&self, index: usize) -> Option<(f64, f64)> {
        match self {
            Self::Symmetric(values) => values.get(index).map(|value| (*value, *value)),
            Self::Asymmetric { lower, upper } => Some((*lower.get(index)?, *upper.get(index)?)),
        }
    }

    fn check(&self, series: &str, axis: &'static str, expected: usize) -> FigureResult<()> {
        let fields: Vec<(&'static str, &Vec<f64>)> = match (self, axis) {
            (Self::Symmetric(values), "x") => vec![("x_error", values)],
            (Self::Symmetric(values), _) => vec![("y_error", values)],
            (Self::Asymmetric { lower, upper }, "x") => {
                vec![("x_error.lower", lower), ("x_error.upper", upper)]
            }
            (Self::Asymmetric { lower, upper }, _) => {
                vec![("y_error.lower", lower), ("y_error.upper", upper)]
            }
        };
        for (field, values) in fields {
            check_len(series, field, expected, values.len())?;
            if values.iter().any(|value| !value.is_finite() || *value < 0.0) {
                return Err(FigureError::InvalidData(format!(
                    "series `{series}`: `{field}` extents must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SeriesStyle {
    Line {
        width_pt: f64,
        stroke: LineStrokeStyle,
    },
    /// Unconnected markers; error bars, when present, share the color.
    Markers {
        shape: MarkerShape,
        size_pt: f64,
        filled: bool,
    },
}

/// Ordered `(x, y)` pairs with a style, a color and an optional legend label.
///
/// Paired arrays are checked at construction; non-finite values split a
/// line into separate runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    name: String,
    x: Vec<f64>,
    y: Vec<f64>,
    x_error: Option<ErrorBar>,
    y_error: Option<ErrorBar>,
    style: SeriesStyle,
    color: Color,
    label: Option<String>,
}

impl Series {
    /// Solid 1.5 pt line through the points.
    pub fn line(name: impl Into<String>, x: Vec<f64>, y: Vec<f64>, color: Color) -> FigureResult<Self> {
        Self::new(
            name,
            x,
            y,
            SeriesStyle::Line {
                width_pt: 1.5,
                stroke: LineStrokeStyle::Solid,
            },
            color,
        )
    }

    pub fn markers(
        name: impl Into<String>,
        x: Vec<f64>,
        y: Vec<f64>,
        shape: MarkerShape,
        size_pt: f64,
        color: Color,
    ) -> FigureResult<Self> {
        Self::new(
            name,
            x,
            y,
            SeriesStyle::Markers {
                shape,
                size_pt,
                filled: true,
            },
            color,
        )
    }

    pub fn new(
        name: impl Into<String>,
        x: Vec<f64>,
        y: Vec<f64>,
        style: SeriesStyle,
        color: Color,
    ) -> FigureResult<Self> {
        let name = name.into();
        check_len(&name, "y", x.len(), y.len())?;
        if x.is_empty() {
            return Err(FigureError::InvalidData(format!(
                "series `{name}` has no points"
            )));
        }
        match style {
            SeriesStyle::Line { width_pt, .. } if !width_pt.is_finite() || width_pt <= 0.0 => {
                return Err(FigureError::InvalidData(format!(
                    "series `{name}`: line width must be finite and > 0"
                )));
            }
            SeriesStyle::Markers { size_pt, .. } if !size_pt.is_finite() || size_pt <= 0.0 => {
                return Err(FigureError::InvalidData(format!(
                    "series `{name}`: marker size must be finite and > 0"
                )));
            }
            _ => {}
        }
        color.validate()?;
        Ok(Self {
            name,
            x,
            y,
            x_error: None,
            y_error: None,
            style,
            color,
            label: None,
        })
    }

    pub fn with_x_error(mut self, error: ErrorBar) -> FigureResult<Self> {
        error.check(&self.name, "x", self.x.len())?;
        self.x_error = Some(error);
        Ok(self)
    }

    pub fn with_y_error(mut self, error: ErrorBar) -> FigureResult<Self> {
        error.check(&self.name, "y", self.y.len())?;
        self.y_error = Some(error);
        Ok(self)
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Replaces the stroke of a line series; marker series are unchanged.
    #[must_use]
    pub fn with_stroke(mut self, stroke: LineStrokeStyle) -> Self {
        if let SeriesStyle::Line { width_pt, .. } = self.style {
            self.style = SeriesStyle::Line { width_pt, stroke };
        }
        self
    }

    /// Replaces the width of a line series; marker series are unchanged.
    #[must_use]
    pub fn with_line_width(mut self, width_pt: f64) -> Self {
        if let SeriesStyle::Line { stroke, .. } = self.style
            && width_pt.is_finite()
            && width_pt > 0.0
        {
            self.style = SeriesStyle::Line { width_pt, stroke };
        }
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    #[must_use]
    pub fn x_error(&self) -> Option<&ErrorBar> {
        self.x_error.as_ref()
    }

    #[must_use]
    pub fn y_error(&self) -> Option<&ErrorBar> {
        self.y_error.as_ref()
    }

    #[must_use]
    pub fn style(&self) -> SeriesStyle {
        self.style
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Points as `(x, y)` pairs, including non-finite ones.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Maximal runs of consecutive finite points.
    #[must_use]
    pub fn runs(&self) -> Vec<Vec<(f64, f64)>> {
        let mut runs = Vec::new();
        let mut current = Vec::new();
        for (x, y) in self.points() {
            if x.is_finite() && y.is_finite() {
                current.push((x, y));
            } else if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }
}

fn check_len(series: &str, field: &'static str, expected: usize, actual: usize) -> FigureResult<()> {
    if expected != actual {
        return Err(FigureError::LengthMismatch {
            series: series.to_owned(),
            field,
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ErrorBar, Series};
    use crate::error::FigureError;
    use crate::render::{Color, MarkerShape};

    #[test]
    fn mismatched_y_is_rejected() {
        let err = Series::line("s", vec![0.0, 1.0, 2.0], vec![1.0, 2.0], Color::RED)
            .expect_err("length mismatch");
        assert!(matches!(
            err,
            FigureError::LengthMismatch {
                field: "y",
                expected: 3,
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn mismatched_asymmetric_error_is_rejected() {
        let series = Series::markers(
            "obs",
            vec![2.5, 3.5],
            vec![-4.2, -4.8],
            MarkerShape::Point,
            5.0,
            Color::GREY,
        )
        .expect("valid series");
        let err = series
            .with_y_error(ErrorBar::Asymmetric {
                lower: vec![0.0, 0.3],
                upper: vec![0.1],
            })
            .expect_err("upper too short");
        assert!(matches!(
            err,
            FigureError::LengthMismatch {
                field: "y_error.upper",
                ..
            }
        ));
    }

    #[test]
    fn nan_splits_runs() {
        let series = Series::line(
            "flares",
            vec![7.0, 6.0, 5.0, 4.0],
            vec![f64::NAN, -7.35, -6.0, -5.0],
            Color::RED,
        )
        .expect("valid series");
        assert_eq!(series.runs(), vec![vec![(6.0, -7.35), (5.0, -6.0), (4.0, -5.0)]]);

        let gapped = Series::line(
            "gap",
            vec![0.0, 1.0, 2.0, 3.0],
            vec![1.0, f64::NAN, 2.0, 3.0],
            Color::RED,
        )
        .expect("valid series");
        assert_eq!(gapped.runs().len(), 2);
    }

    #[test]
    fn uniform_asymmetric_error_yields_per_point_extents() {
        let error = ErrorBar::uniform_asymmetric(0.8, 0.5, 2);
        assert_eq!(error.extents(1), Some((0.8, 0.5)));
        assert_eq!(error.extents(2), None);
    }
}

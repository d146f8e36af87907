use serde::{Deserialize, Serialize};

use crate::error::{FigureError, FigureResult};

/// Mapping mode used by an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScaleKind {
    /// Uniform spacing in raw data units.
    #[default]
    Linear,
    /// Uniform spacing in decades (all values must be > 0).
    Log10,
}

/// Pixel interval an axis domain is projected onto.
///
/// `start` receives the domain start, so vertical axes pass the plot bottom
/// as `start` to get the usual upward-growing orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelSpan {
    pub start: f64,
    pub end: f64,
}

impl PixelSpan {
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn length(self) -> f64 {
        (self.end - self.start).abs()
    }
}

/// Data-to-pixel mapping for one axis. A domain whose start exceeds its end
/// yields a reversed axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisScale {
    kind: ScaleKind,
    domain_start: f64,
    domain_end: f64,
}

impl AxisScale {
    pub fn linear(domain_start: f64, domain_end: f64) -> FigureResult<Self> {
        Self::new(ScaleKind::Linear, domain_start, domain_end)
    }

    pub fn log10(domain_start: f64, domain_end: f64) -> FigureResult<Self> {
        Self::new(ScaleKind::Log10, domain_start, domain_end)
    }

    pub fn new(kind: ScaleKind, domain_start: f64, domain_end: f64) -> FigureResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(FigureError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if kind == ScaleKind::Log10 && (domain_start <= 0.0 || domain_end <= 0.0) {
            return Err(FigureError::InvalidData(
                "log scale domain must be > 0".to_owned(),
            ));
        }

        Ok(Self {
            kind,
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn kind(self) -> ScaleKind {
        self.kind
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Domain bounds ordered as (min, max) regardless of orientation.
    #[must_use]
    pub fn bounds(self) -> (f64, f64) {
        (
            self.domain_start.min(self.domain_end),
            self.domain_start.max(self.domain_end),
        )
    }

    #[must_use]
    pub fn is_reversed(self) -> bool {
        self.domain_start > self.domain_end
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        let (min, max) = self.bounds();
        value >= min && value <= max
    }

    /// Fraction of the way from domain start to domain end, in scale space.
    pub fn normalize(self, value: f64) -> FigureResult<f64> {
        let start = self.transform(self.domain_start)?;
        let end = self.transform(self.domain_end)?;
        Ok((self.transform(value)? - start) / (end - start))
    }

    pub fn denormalize(self, fraction: f64) -> FigureResult<f64> {
        if !fraction.is_finite() {
            return Err(FigureError::InvalidData(
                "scale fraction must be finite".to_owned(),
            ));
        }
        let start = self.transform(self.domain_start)?;
        let end = self.transform(self.domain_end)?;
        self.inverse(start + fraction * (end - start))
    }

    pub fn domain_to_pixel(self, value: f64, span: PixelSpan) -> FigureResult<f64> {
        let fraction = self.normalize(value)?;
        Ok(span.start + fraction * (span.end - span.start))
    }

    pub fn pixel_to_domain(self, pixel: f64, span: PixelSpan) -> FigureResult<f64> {
        if !pixel.is_finite() {
            return Err(FigureError::InvalidData("pixel must be finite".to_owned()));
        }
        let extent = span.end - span.start;
        if extent == 0.0 || !extent.is_finite() {
            return Err(FigureError::InvalidData(
                "pixel span must be finite and non-zero".to_owned(),
            ));
        }
        self.denormalize((pixel - span.start) / extent)
    }

    fn transform(self, value: f64) -> FigureResult<f64> {
        if !value.is_finite() {
            return Err(FigureError::InvalidData("value must be finite".to_owned()));
        }
        match self.kind {
            ScaleKind::Linear => Ok(value),
            ScaleKind::Log10 => {
                if value <= 0.0 {
                    return Err(FigureError::InvalidData(
                        "log scale requires values > 0".to_owned(),
                    ));
                }
                Ok(value.log10())
            }
        }
    }

    fn inverse(self, value: f64) -> FigureResult<f64> {
        match self.kind {
            ScaleKind::Linear => Ok(value),
            ScaleKind::Log10 => {
                let raw = 10f64.powf(value);
                if !raw.is_finite() || raw <= 0.0 {
                    return Err(FigureError::InvalidData(
                        "mapped log value must be finite and > 0".to_owned(),
                    ));
                }
                Ok(raw)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisScale, PixelSpan};

    #[test]
    fn reversed_linear_scale_maps_start_to_span_start() {
        let scale = AxisScale::linear(10.5, 3.8).expect("valid scale");
        let span = PixelSpan::new(0.0, 670.0);
        assert!(scale.is_reversed());
        assert_eq!(scale.domain_to_pixel(10.5, span).expect("start"), 0.0);
        assert!((scale.domain_to_pixel(3.8, span).expect("end") - 670.0).abs() <= 1e-9);
    }

    #[test]
    fn log_scale_places_decades_evenly() {
        let scale = AxisScale::log10(0.001, 0.1).expect("valid scale");
        let span = PixelSpan::new(200.0, 0.0);
        let middle = scale.domain_to_pixel(0.01, span).expect("middle");
        assert!((middle - 100.0).abs() <= 1e-9);
    }
}

use serde::{Deserialize, Serialize};

use crate::error::{FigureError, FigureResult};

const NICE_STEP_MULTIPLIERS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];
const TICK_EPSILON: f64 = 1e-9;
const MAX_TICK_COUNT: usize = 512;

/// Default number of intervals a linear axis is split into.
pub const DEFAULT_LINEAR_BINS: usize = 9;

/// One axis tick in data space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub value: f64,
    pub label: Option<String>,
    pub major: bool,
}

impl Tick {
    #[must_use]
    pub fn major(value: f64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: Some(label.into()),
            major: true,
        }
    }

    #[must_use]
    pub fn minor(value: f64) -> Self {
        Self {
            value,
            label: None,
            major: false,
        }
    }
}

/// `value * scale + offset` relation between a primary and a secondary axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearTransform {
    pub scale: f64,
    pub offset: f64,
}

impl LinearTransform {
    #[must_use]
    pub const fn offset(offset: f64) -> Self {
        Self { scale: 1.0, offset }
    }

    pub fn validate(self) -> FigureResult<Self> {
        if !self.scale.is_finite() || self.scale == 0.0 || !self.offset.is_finite() {
            return Err(FigureError::InvalidData(
                "axis transform must be finite with a non-zero scale".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        value * self.scale + self.offset
    }

    #[must_use]
    pub fn invert(self, value: f64) -> f64 {
        (value - self.offset) / self.scale
    }
}

/// Step size that splits `span` into at most `max_bins` intervals using
/// 1/2/2.5/5 multiples of a power of ten.
#[must_use]
pub fn nice_step(span: f64, max_bins: usize) -> f64 {
    let bins = max_bins.max(1) as f64;
    let raw_step = span.abs() / bins;
    if !raw_step.is_finite() || raw_step <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw_step.log10().floor());
    NICE_STEP_MULTIPLIERS
        .iter()
        .map(|multiplier| multiplier * magnitude)
        .find(|step| *step >= raw_step * (1.0 - TICK_EPSILON))
        .unwrap_or(10.0 * magnitude)
}

/// Tick positions on a linear axis, ascending, all inside `[min, max]`.
pub fn nice_linear_ticks(min: f64, max: f64, max_bins: usize) -> FigureResult<Vec<f64>> {
    if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(FigureError::InvalidData(
            "tick range must be finite with min < max".to_owned(),
        ));
    }

    let step = nice_step(max - min, max_bins);
    let tolerance = step * TICK_EPSILON;
    let first_index = ((min - tolerance) / step).ceil() as i64;
    let mut ticks = Vec::new();
    for offset in 0..MAX_TICK_COUNT as i64 {
        let value = (first_index + offset) as f64 * step;
        if value > max + tolerance {
            break;
        }
        ticks.push(if value == 0.0 { 0.0 } else { value });
    }
    Ok(ticks)
}

/// Labelled ticks for a linear axis.
pub fn linear_ticks(min: f64, max: f64, max_bins: usize) -> FigureResult<Vec<Tick>> {
    let step = nice_step(max - min, max_bins);
    Ok(nice_linear_ticks(min, max, max_bins)?
        .into_iter()
        .map(|value| Tick::major(value, format_linear_label(value, step)))
        .collect())
}

/// Decade ticks (labelled) plus 2..9 minor ticks inside `[min, max]`.
pub fn log10_ticks(min: f64, max: f64) -> FigureResult<Vec<Tick>> {
    if !min.is_finite() || !max.is_finite() || min <= 0.0 || min >= max {
        return Err(FigureError::InvalidData(
            "log tick range must be finite with 0 < min < max".to_owned(),
        ));
    }

    let low = min * (1.0 - TICK_EPSILON);
    let high = max * (1.0 + TICK_EPSILON);
    let first_decade = min.log10().floor() as i32;
    let last_decade = max.log10().ceil() as i32;

    let mut ticks = Vec::new();
    for decade in first_decade..=last_decade {
        let base = 10f64.powi(decade);
        for multiplier in 1..=9u8 {
            let value = f64::from(multiplier) * base;
            if value < low || value > high {
                continue;
            }
            if multiplier == 1 {
                ticks.push(Tick::major(value, power_of_ten_label(decade)));
            } else {
                ticks.push(Tick::minor(value));
            }
        }
    }
    Ok(ticks)
}

/// Ticks for a secondary axis placed at the integer positions of the
/// primary range, labelled with the truncated transformed value.
pub fn integer_secondary_ticks(
    min: f64,
    max: f64,
    transform: LinearTransform,
) -> FigureResult<Vec<Tick>> {
    if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(FigureError::InvalidData(
            "tick range must be finite with min < max".to_owned(),
        ));
    }
    let transform = transform.validate()?;

    let first = min.trunc() as i64;
    let last = max.trunc() as i64 + 1;
    Ok((first..last)
        .map(|position| position as f64)
        .filter(|position| *position >= min && *position <= max)
        .map(|position| {
            let label = transform.apply(position).trunc() as i64;
            Tick::major(position, format_signed(&label.to_string()))
        })
        .collect())
}

/// Ticks for a secondary axis whose nice tick values live in the
/// transformed domain; positions are mapped back onto the primary axis.
pub fn transformed_secondary_ticks(
    min: f64,
    max: f64,
    transform: LinearTransform,
    max_bins: usize,
) -> FigureResult<Vec<Tick>> {
    let transform = transform.validate()?;
    let a = transform.apply(min);
    let b = transform.apply(max);
    let (low, high) = (a.min(b), a.max(b));
    let step = nice_step(high - low, max_bins);
    Ok(nice_linear_ticks(low, high, max_bins)?
        .into_iter()
        .map(|value| Tick::major(transform.invert(value), format_linear_label(value, step)))
        .collect())
}

/// Formats a linear tick with as many decimals as the step requires.
#[must_use]
pub fn format_linear_label(value: f64, step: f64) -> String {
    let decimals = (0..=6usize)
        .find(|decimals| {
            let scaled = step * 10f64.powi(*decimals as i32);
            (scaled - scaled.round()).abs() <= 1e-6 * scaled.abs().max(1.0)
        })
        .unwrap_or(6);
    let rounded = if value.abs() < step * TICK_EPSILON {
        0.0
    } else {
        value
    };
    format_signed(&format!("{rounded:.decimals$}"))
}

/// `10` followed by the exponent in superscript digits.
#[must_use]
pub fn power_of_ten_label(exponent: i32) -> String {
    let mut label = String::from("10");
    label.extend(exponent.to_string().chars().map(superscript));
    label
}

/// Replaces an ASCII hyphen-minus sign with the typographic minus.
#[must_use]
pub fn format_signed(text: &str) -> String {
    match text.strip_prefix('-') {
        Some(rest) => format!("\u{2212}{rest}"),
        None => text.to_owned(),
    }
}

fn superscript(ch: char) -> char {
    match ch {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4' => '⁴',
        '5' => '⁵',
        '6' => '⁶',
        '7' => '⁷',
        '8' => '⁸',
        '9' => '⁹',
        '-' => '⁻',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::{format_linear_label, nice_step, power_of_ten_label};

    #[test]
    fn nice_step_prefers_unit_steps_for_redshift_range() {
        assert_eq!(nice_step(8.5, 9), 1.0);
        assert_eq!(nice_step(5.0, 9), 1.0);
    }

    #[test]
    fn nice_step_uses_quarter_multiples() {
        assert_eq!(nice_step(2.0, 9), 0.25);
    }

    #[test]
    fn labels_use_typographic_minus() {
        assert_eq!(format_linear_label(-3.0, 1.0), "\u{2212}3");
        assert_eq!(format_linear_label(2.5, 0.5), "2.5");
        assert_eq!(format_linear_label(-0.0, 1.0), "0");
    }

    #[test]
    fn power_of_ten_uses_superscripts() {
        assert_eq!(power_of_ten_label(-3), "10⁻³");
        assert_eq!(power_of_ten_label(10), "10¹⁰");
    }
}

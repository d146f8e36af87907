//! Resolution against volume (or survey-equivalent area) of hydrodynamical
//! simulations.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::core::{Cosmology, LinearTransform};
use crate::data::{SimulationRun, simulation_catalogue, survey_catalogue};
use crate::error::{FigureError, FigureResult};
use crate::render::{Color, MarkerShape, TextHAlign, TextVAlign};

use super::{
    Axis, AxisSide, Figure, FigureConfig, Panel, ReferenceLine, SecondaryAxis, SecondaryTicks,
    Series, SeriesStyle, TextAnnotation,
};

pub const DEFAULT_OUTPUT_PATH: &str = "plots/simulation_landscape.png";

const LOG_ELEMENT_MASS_LIMITS: (f64, f64) = (10.5, 3.8);
const LOG_VOLUME_LIMITS: (f64, f64) = (3.0, 12.0);
const AREA_PADDING_FRACTION: f64 = 0.1;
/// Resolved stellar mass is 100 elements, i.e. two decades above `m_g`.
const RESOLVED_MASS_OFFSET: f64 = 2.0;
const INCOMPLETE_ALPHA: f64 = 0.3;

/// Marker sizes (diameters) in points.
const POINT_SIZE_PT: f64 = 7.2;
const RING_SIZE_PT: f64 = 11.5;
const STAR_SIZE_PT: f64 = 16.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum YAxisMode {
    /// log10 of the comoving box volume.
    #[default]
    Volume,
    /// log10 of the sky area enclosing the box volume over a redshift slice.
    Area,
}

impl FromStr for YAxisMode {
    type Err = FigureError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "volume" => Ok(Self::Volume),
            "area" => Ok(Self::Area),
            other => Err(FigureError::InvalidData(format!(
                "unknown y axis mode `{other}` (expected `volume` or `area`)"
            ))),
        }
    }
}

impl fmt::Display for YAxisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Volume => f.write_str("volume"),
            Self::Area => f.write_str("area"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LandscapeOptions {
    pub y_axis: YAxisMode,
    /// Centre of the redshift slice used in area mode.
    pub redshift: f64,
    pub delta_z: f64,
    pub cosmology: Cosmology,
}

impl Default for LandscapeOptions {
    fn default() -> Self {
        Self {
            y_axis: YAxisMode::Volume,
            redshift: 7.0,
            delta_z: 1.0,
            cosmology: Cosmology::PLANCK15,
        }
    }
}

impl LandscapeOptions {
    #[must_use]
    pub fn with_y_axis(mut self, y_axis: YAxisMode) -> Self {
        self.y_axis = y_axis;
        self
    }

    #[must_use]
    pub fn with_redshift(mut self, redshift: f64) -> Self {
        self.redshift = redshift;
        self
    }

    #[must_use]
    pub fn with_delta_z(mut self, delta_z: f64) -> Self {
        self.delta_z = delta_z;
        self
    }

    /// y value of one run in the configured mode.
    pub fn y_value(&self, run: &SimulationRun) -> FigureResult<f64> {
        match self.y_axis {
            YAxisMode::Volume => Ok(run.log_volume()),
            YAxisMode::Area => Ok(self
                .cosmology
                .volume_to_area(run.volume(), self.redshift, self.delta_z)?
                .log10()),
        }
    }

    fn y_label(&self) -> String {
        match self.y_axis {
            YAxisMode::Volume => "log₁₀(volume/cMpc³)".to_owned(),
            YAxisMode::Area => format!(
                "log₁₀(area/arcmin²) @ z={:.1} (Δz={:.1})",
                self.redshift, self.delta_z
            ),
        }
    }
}

/// Builds the landscape figure for `options`.
pub fn build_simulation_landscape_figure(options: LandscapeOptions) -> FigureResult<Figure> {
    let catalogue = simulation_catalogue();
    let mut placed = Vec::with_capacity(catalogue.len());
    for (name, run) in &catalogue {
        placed.push((*name, run, options.y_value(run)?));
    }

    let y_limits = match options.y_axis {
        YAxisMode::Volume => LOG_VOLUME_LIMITS,
        YAxisMode::Area => padded_limits(placed.iter().map(|(_, _, y)| *y))?,
    };
    debug!(
        mode = %options.y_axis,
        y_min = y_limits.0,
        y_max = y_limits.1,
        runs = placed.len(),
        "simulation landscape limits"
    );

    let x_axis = Axis::linear(
        LOG_ELEMENT_MASS_LIMITS.0,
        LOG_ELEMENT_MASS_LIMITS.1,
        "log₁₀(baryonic resolution element mass/M☉)",
    )?;
    let y_axis = Axis::linear(y_limits.0, y_limits.1, options.y_label())?;
    let mut panel = Panel::new(x_axis, y_axis)
        .with_grid(true)
        .with_secondary_axis(SecondaryAxis::new(
            AxisSide::Top,
            LinearTransform::offset(RESOLVED_MASS_OFFSET),
            SecondaryTicks::Nice,
            "log₁₀(minimum resolved galaxy stellar mass/M☉)",
        ));

    if options.y_axis == YAxisMode::Area {
        for survey in survey_catalogue() {
            let y = survey.log_area();
            if y < y_limits.0 || y > y_limits.1 {
                continue;
            }
            panel = panel
                .with_annotation(ReferenceLine::horizontal(y, Color::GREY).with_width_pt(1.0))
                .with_annotation(
                    TextAnnotation::new(survey.name, LOG_ELEMENT_MASS_LIMITS.1, y, 8.0)
                        .with_color(Color::GREY)
                        .with_align(TextHAlign::Right, TextVAlign::Baseline)
                        .with_offset_pt(-3.6, 2.2),
                );
        }
    }

    for (name, run, y) in placed {
        panel = place_run(panel, name, run, y)?;
    }

    let figure = Figure::new(
        FigureConfig::new(8.0, 7.0)
            .with_dpi(100.0)
            .with_output_path(DEFAULT_OUTPUT_PATH),
    )
    .with_panel(panel);
    figure.validate()?;
    Ok(figure)
}

fn place_run(mut panel: Panel, name: &str, run: &SimulationRun, y: f64) -> FigureResult<Panel> {
    let alpha = if run.complete { 1.0 } else { INCOMPLETE_ALPHA };
    let color = run.highlight.unwrap_or(Color::CHARCOAL).with_alpha(alpha);
    let x = vec![run.log_element_mass()];

    panel = panel.with_series(Series::markers(
        name,
        x.clone(),
        vec![y],
        MarkerShape::Circle,
        POINT_SIZE_PT,
        color,
    )?);
    if run.radiative_transfer {
        panel = panel.with_series(Series::new(
            format!("{name}/ring"),
            x.clone(),
            vec![y],
            hollow(MarkerShape::Circle, RING_SIZE_PT),
            color,
        )?);
    }
    if run.starred {
        panel = panel.with_series(Series::new(
            format!("{name}/star"),
            x.clone(),
            vec![y],
            hollow(MarkerShape::Star, STAR_SIZE_PT),
            color,
        )?);
    }
    Ok(panel.with_annotation(
        TextAnnotation::new(name, x[0], y, 7.0)
            .with_color(color)
            .with_align(TextHAlign::Left, TextVAlign::Center)
            .with_offset_pt(7.0, 0.0),
    ))
}

fn hollow(shape: MarkerShape, size_pt: f64) -> SeriesStyle {
    SeriesStyle::Markers {
        shape,
        size_pt,
        filled: false,
    }
}

/// Data range widened by 10 % of its span on both sides.
fn padded_limits(values: impl Iterator<Item = f64>) -> FigureResult<(f64, f64)> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
        (min.min(value), max.max(value))
    });
    if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(FigureError::InvalidData(
            "area mode needs at least two distinct finite values".to_owned(),
        ));
    }
    let padding = (max - min) * AREA_PADDING_FRACTION;
    Ok((min - padding, max + padding))
}

#[cfg(test)]
mod tests {
    use super::{LandscapeOptions, YAxisMode, build_simulation_landscape_figure, padded_limits};
    use crate::figure::Annotation;

    #[test]
    fn volume_mode_uses_fixed_limits() {
        let figure = build_simulation_landscape_figure(LandscapeOptions::default()).expect("figure");
        let panel = &figure.panels[0];
        assert_eq!(panel.y_axis.scale.domain(), (3.0, 12.0));
        assert!(panel.x_axis.scale.is_reversed());
        assert!(panel.annotations.iter().all(|annotation| !matches!(annotation, Annotation::Line(_))));
    }

    #[test]
    fn area_mode_draws_survey_lines_inside_range() {
        let options = LandscapeOptions::default().with_y_axis(YAxisMode::Area);
        let figure = build_simulation_landscape_figure(options).expect("figure");
        let panel = &figure.panels[0];
        let (min, max) = panel.y_axis.scale.bounds();
        let lines: Vec<_> = panel
            .annotations
            .iter()
            .filter_map(|annotation| match annotation {
                Annotation::Line(line) => Some(line.value),
                _ => None,
            })
            .collect();
        assert!(!lines.is_empty());
        assert!(lines.iter().all(|y| *y >= min && *y <= max));
    }

    #[test]
    fn mode_parses_from_cli_words() {
        assert_eq!("area".parse::<YAxisMode>().ok(), Some(YAxisMode::Area));
        assert!("pressure".parse::<YAxisMode>().is_err());
    }

    #[test]
    fn padding_is_ten_percent_of_span() {
        let (min, max) = padded_limits([1.0, 3.0, 2.0].into_iter()).expect("limits");
        assert!((min - 0.8).abs() < 1e-12);
        assert!((max - 3.2).abs() < 1e-12);
    }
}

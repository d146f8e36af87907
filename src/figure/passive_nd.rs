//! Two-panel passive galaxy figure.
//!
//! The top panel shows passive number densities against redshift for
//! simulations and observations; the bottom panel shows the stellar-to-halo
//! mass ratio with its peak and feedback regimes.

use tracing::{debug, info};

use crate::core::{EfficiencyCurve, LinearTransform, SampledPeak, ShmrParameters, logspace};
use crate::data::{self, SampleSelection};
use crate::error::{FigureError, FigureResult};
use crate::render::{Color, LineStrokeStyle, TextHAlign, TextVAlign};

use super::{
    ArrowAnnotation, Axis, AxisSide, Figure, FigureConfig, Hatch, Legend, LegendLocation, Panel,
    ReferenceLine, SecondaryAxis, SecondaryTicks, Series, Span, TextAnnotation,
};

pub const DEFAULT_OUTPUT_PATH: &str = "plots/passive_nd_evolution.png";

/// Number density panel limits.
const REDSHIFT_LIMITS: (f64, f64) = (0.0, 8.5);
const LOG_DENSITY_LIMITS: (f64, f64) = (-9.2, -2.5);
/// log10 of Mpc³ per Gpc³.
const LOG_MPC3_PER_GPC3: f64 = 9.0;
const ZOOM_REGIME_CEILING: f64 = -6.0;
const COSMIC_VARIANCE_REDSHIFT: f64 = 5.0;

/// SHMR panel limits.
const LOG_HALO_MASS_LIMITS: (f64, f64) = (10.0, 15.0);
const EFFICIENCY_LIMITS: (f64, f64) = (0.001, 0.08);
const HALO_MASS_SAMPLES: usize = 100;
const RESOLUTION_LIMIT_LOG_HALO_MASS: f64 = 10.2;

const SHADE: Color = Color::GREY.with_alpha(0.2);
const ANNOTATION_TEXT: Color = Color::BLACK.with_alpha(0.7);
const REFERENCE_LINE: Color = Color::GREY.with_alpha(0.7);

/// Efficiency curve sampled for the bottom panel, with its located peak.
#[derive(Debug, Clone, PartialEq)]
pub struct ShmrSummary {
    pub curve: EfficiencyCurve,
    pub peak: SampledPeak,
}

/// Samples the z = 0 relation on 100 log-spaced halo masses and finds its peak.
pub fn shmr_summary() -> FigureResult<ShmrSummary> {
    let curve = EfficiencyCurve::evaluate(
        &ShmrParameters::moster13_like(),
        logspace(
            LOG_HALO_MASS_LIMITS.0,
            LOG_HALO_MASS_LIMITS.1,
            HALO_MASS_SAMPLES,
        ),
    )?;
    let peak = curve.peak().ok_or_else(|| {
        FigureError::InvalidData("efficiency curve has no finite samples".to_owned())
    })?;
    Ok(ShmrSummary { curve, peak })
}

/// Builds the complete two-panel figure with the default output path.
pub fn build_passive_nd_figure() -> FigureResult<Figure> {
    let config = FigureConfig::new(5.0, 8.0)
        .with_dpi(100.0)
        .with_pad_in(0.1)
        .with_output_path(DEFAULT_OUTPUT_PATH);
    let figure = Figure::new(config)
        .with_panel(number_density_panel()?)
        .with_panel(shmr_panel()?);
    figure.validate()?;
    Ok(figure)
}

fn number_density_panel() -> FigureResult<Panel> {
    let selection = SampleSelection::Mass1e10SsfrBelow1;
    let x_axis = Axis::linear(REDSHIFT_LIMITS.0, REDSHIFT_LIMITS.1, "Redshift (z)")?;
    let y_axis = Axis::linear(
        LOG_DENSITY_LIMITS.0,
        LOG_DENSITY_LIMITS.1,
        "log<sub>10</sub>(n<sub>g</sub> / Mpc<sup>−3</sup>)",
    )?;

    let mut panel = Panel::new(x_axis, y_axis)
        .with_series(data::flares().series(selection, Color::RED)?)
        .with_series(data::eagle().series(selection, Color::BLUE)?);
    for curve in data::comparison_curves() {
        panel = panel.with_series(curve.series()?);
    }
    for observation in data::observations() {
        panel = panel.with_series(observation.series(Color::GREY)?);
    }
    debug!(
        series = panel.series.len(),
        selection = selection.key(),
        "number density panel series"
    );

    Ok(panel
        .with_annotation(
            TextAnnotation::new(selection.description(), 6.0, -2.9, 9.0)
                .with_align(TextHAlign::Right, TextVAlign::Baseline)
                .with_markup(),
        )
        .with_secondary_axis(SecondaryAxis::new(
            AxisSide::Right,
            LinearTransform::offset(LOG_MPC3_PER_GPC3),
            SecondaryTicks::Integer,
            "log<sub>10</sub>(N<sub>objects</sub> / Gpc<sup>3</sup>)",
        ))
        .with_span(Span::horizontal(
            LOG_DENSITY_LIMITS.0,
            ZOOM_REGIME_CEILING,
            SHADE,
        ))
        .with_annotation(
            TextAnnotation::new("zoom-accessible regime", 0.15, -6.25, 9.0)
                .with_color(ANNOTATION_TEXT)
                .with_align(TextHAlign::Left, TextVAlign::Center),
        )
        .with_span(
            Span::vertical(COSMIC_VARIANCE_REDSHIFT, REDSHIFT_LIMITS.1, SHADE)
                .with_hatch(Hatch::parse("///", SHADE)?),
        )
        .with_annotation(
            TextAnnotation::new("Cosmic variance\nlimited regime", 5.2, -4.2, 9.0)
                .with_color(ANNOTATION_TEXT)
                .with_align(TextHAlign::Left, TextVAlign::Center)
                .with_rotation(90.0),
        )
        .with_legend(Legend::new(LegendLocation::LowerLeft)))
}

fn shmr_panel() -> FigureResult<Panel> {
    let summary = shmr_summary()?;
    let peak = summary.peak.peak;
    info!(
        index = summary.peak.index,
        log_halo_mass = peak.log_halo_mass,
        efficiency = peak.efficiency,
        stellar_mass = peak.stellar_mass(),
        "stellar-to-halo mass ratio peak"
    );

    let moster = Series::line(
        "moster13",
        summary.curve.log_halo_masses(),
        summary.curve.efficiencies.clone(),
        Color::GREEN,
    )?
    .with_line_width(2.0)
    .with_label("z = 0 (Moster+13)");

    let x_axis = Axis::linear(
        LOG_HALO_MASS_LIMITS.0,
        LOG_HALO_MASS_LIMITS.1,
        "Log(halo mass) [M<sub>⊙</sub>]",
    )?;
    let y_axis = Axis::log10(
        EFFICIENCY_LIMITS.0,
        EFFICIENCY_LIMITS.1,
        "Stellar mass / halo mass (average)",
    )?;

    let vertical_label = |text: &str, x: f64| {
        TextAnnotation::new(text, x, 0.0015, 9.0)
            .with_color(Color::GREY)
            .with_align(TextHAlign::Left, TextVAlign::Bottom)
            .with_rotation(90.0)
            .with_markup()
    };

    Ok(Panel::new(x_axis, y_axis)
        .with_series(moster)
        .with_series(data::shuntov22_z5().series(Color::BLUE, 2.0)?)
        .with_annotation(
            ReferenceLine::vertical(peak.log_halo_mass, REFERENCE_LINE)
                .with_stroke(LineStrokeStyle::Dashed),
        )
        .with_annotation(vertical_label(
            "Peak: M* ≈ 2 × 10<sup>10</sup> M☉",
            peak.log_halo_mass + 0.1,
        ))
        .with_annotation(
            ReferenceLine::vertical(RESOLUTION_LIMIT_LOG_HALO_MASS, REFERENCE_LINE)
                .with_stroke(LineStrokeStyle::Dashed),
        )
        .with_annotation(vertical_label(
            "Res Limit: M* ≈ 10<sup>8</sup> M☉",
            RESOLUTION_LIMIT_LOG_HALO_MASS + 0.1,
        ))
        .with_annotation(
            ArrowAnnotation::new("Stellar\nfeedback", (11.0, 0.02), (11.0, 0.04), Color::ORANGE)
                .with_width_pt(2.0),
        )
        .with_annotation(
            ArrowAnnotation::new("AGN\nfeedback", (14.2, 0.02), (14.2, 0.038), Color::ORANGE)
                .with_width_pt(2.0),
        )
        .with_legend(
            Legend::new(LegendLocation::LowerRight)
                .with_face_color(Color::WHITE)
                .with_frame_alpha(1.0),
        ))
}

#[cfg(test)]
mod tests {
    use super::{build_passive_nd_figure, shmr_summary};
    use crate::figure::Annotation;

    #[test]
    fn sampled_peak_sits_near_log_mass_12() {
        let summary = shmr_summary().expect("summary");
        assert!((summary.peak.peak.log_halo_mass - 11.97).abs() < 0.05);
        assert!(summary.peak.peak.stellar_mass() > 1e10);
        assert!(summary.peak.peak.stellar_mass() < 4e10);
    }

    #[test]
    fn figure_has_two_panels_with_expected_legends() {
        let figure = build_passive_nd_figure().expect("figure");
        assert_eq!(figure.panels.len(), 2);
        let top: Vec<_> = figure.panels[0]
            .legend_entries()
            .filter_map(|series| series.label())
            .collect();
        assert_eq!(top, ["FLARES", "EAGLE", "Simba", "Magneticum", "IllustrisTNG"]);
        assert_eq!(figure.panels[1].legend_entries().count(), 2);
    }

    #[test]
    fn peak_line_follows_sampled_peak() {
        let figure = build_passive_nd_figure().expect("figure");
        let summary = shmr_summary().expect("summary");
        let first_line = figure.panels[1].annotations.iter().find_map(|annotation| match annotation {
            Annotation::Line(line) => Some(line.value),
            _ => None,
        });
        assert_eq!(first_line, Some(summary.peak.peak.log_halo_mass));
    }
}

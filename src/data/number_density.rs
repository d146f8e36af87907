use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{FigureError, FigureResult};
use crate::figure::{ErrorBar, Series};
use crate::render::{Color, LineStrokeStyle, MarkerShape};

/// Stellar mass and sSFR cut a passive number density was measured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SampleSelection {
    /// M* > 5×10⁹ M☉, sSFR < 10⁻¹ Gyr⁻¹.
    Mass5e9SsfrBelow1,
    /// M* > 5×10⁹ M☉, sSFR < 10⁻² Gyr⁻¹.
    Mass5e9SsfrBelow2,
    /// M* > 10¹⁰ M☉, sSFR < 10⁻¹ Gyr⁻¹.
    Mass1e10SsfrBelow1,
    /// M* > 10¹⁰ M☉, sSFR < 10⁻² Gyr⁻¹.
    Mass1e10SsfrBelow2,
}

impl SampleSelection {
    pub const ALL: [Self; 4] = [
        Self::Mass5e9SsfrBelow1,
        Self::Mass5e9SsfrBelow2,
        Self::Mass1e10SsfrBelow1,
        Self::Mass1e10SsfrBelow2,
    ];

    /// Column key used by the published table.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Mass5e9SsfrBelow1 => "5e9_sSFR_-1",
            Self::Mass5e9SsfrBelow2 => "5e9_sSFR_-2",
            Self::Mass1e10SsfrBelow1 => "1e10_sSFR_-1",
            Self::Mass1e10SsfrBelow2 => "1e10_sSFR_-2",
        }
    }

    /// Pango markup describing the cut.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Mass5e9SsfrBelow1 => {
                "M<sub>*</sub> &gt; 5×10<sup>9</sup> M<sub>☉</sub> sSFR &lt; −1 Gyr<sup>−1</sup>"
            }
            Self::Mass5e9SsfrBelow2 => {
                "M<sub>*</sub> &gt; 5×10<sup>9</sup> M<sub>☉</sub> sSFR &lt; −2 Gyr<sup>−1</sup>"
            }
            Self::Mass1e10SsfrBelow1 => {
                "M<sub>*</sub> &gt; 10<sup>10</sup> M<sub>☉</sub> sSFR &lt; −1 Gyr<sup>−1</sup>"
            }
            Self::Mass1e10SsfrBelow2 => {
                "M<sub>*</sub> &gt; 10<sup>10</sup> M<sub>☉</sub> sSFR &lt; −2 Gyr<sup>−1</sup>"
            }
        }
    }
}

/// Passive number densities (log10 n / Mpc⁻³) of one simulation by redshift.
///
/// Columns are stored verbatim and may be shorter than `redshifts`; such a
/// column can be inspected but not turned into a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationTable {
    pub name: &'static str,
    pub redshifts: Vec<f64>,
    pub columns: IndexMap<SampleSelection, Vec<f64>>,
}

impl SimulationTable {
    #[must_use]
    pub fn column(&self, selection: SampleSelection) -> Option<&[f64]> {
        self.columns.get(&selection).map(Vec::as_slice)
    }

    /// Whether the column pairs one value with every redshift.
    #[must_use]
    pub fn is_complete(&self, selection: SampleSelection) -> bool {
        self.column(selection)
            .is_some_and(|values| values.len() == self.redshifts.len())
    }

    /// Solid line series for one column, labelled with the table name.
    pub fn series(&self, selection: SampleSelection, color: Color) -> FigureResult<Series> {
        let values = self.column(selection).ok_or_else(|| {
            FigureError::InvalidData(format!(
                "table `{}` has no `{}` column",
                self.name,
                selection.key()
            ))
        })?;
        Ok(Series::line(
            format!("{}/{}", self.name, selection.key()),
            self.redshifts.clone(),
            values.to_vec(),
            color,
        )?
        .with_label(self.name))
    }
}

/// FLARES passive number densities at z = 7, 6, 5.
#[must_use]
pub fn flares() -> SimulationTable {
    SimulationTable {
        name: "FLARES",
        redshifts: vec![7.0, 6.0, 5.0],
        columns: IndexMap::from([
            (SampleSelection::Mass5e9SsfrBelow1, vec![-7.92, -6.80, -5.40]),
            (SampleSelection::Mass5e9SsfrBelow2, vec![f64::NAN, -7.29, -5.74]),
            (SampleSelection::Mass1e10SsfrBelow1, vec![-7.92, -6.99, -5.85]),
            (SampleSelection::Mass1e10SsfrBelow2, vec![f64::NAN, -7.35, -6.00]),
        ]),
    }
}

/// EAGLE passive number densities at z = 5..0.
///
/// Only the M* > 10¹⁰, sSFR < −1 column covers all six redshifts.
#[must_use]
pub fn eagle() -> SimulationTable {
    SimulationTable {
        name: "EAGLE",
        redshifts: vec![5.0, 4.0, 3.0, 2.0, 1.0, 0.0],
        columns: IndexMap::from([
            (
                SampleSelection::Mass5e9SsfrBelow1,
                vec![-5.40, -4.40, -3.93, -3.59, -3.09],
            ),
            (
                SampleSelection::Mass5e9SsfrBelow2,
                vec![-5.70, -4.74, -4.31, -3.99, -3.56],
            ),
            (
                SampleSelection::Mass1e10SsfrBelow1,
                vec![-5.70, -4.77, -4.23, -3.81, -3.16, -2.65],
            ),
            (
                SampleSelection::Mass1e10SsfrBelow2,
                vec![-6.00, -5.05, -4.59, -4.22, -3.65],
            ),
        ]),
    }
}

/// Published curve of another simulation, drawn dashed for comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonCurve {
    pub name: &'static str,
    pub redshifts: Vec<f64>,
    pub log_densities: Vec<f64>,
    pub color: Color,
}

impl ComparisonCurve {
    pub fn series(&self) -> FigureResult<Series> {
        Ok(Series::line(
            self.name,
            self.redshifts.clone(),
            self.log_densities.clone(),
            self.color,
        )?
        .with_stroke(LineStrokeStyle::Dashed)
        .with_label(self.name))
    }
}

/// Simba, Magneticum and IllustrisTNG in default cycle colors.
#[must_use]
pub fn comparison_curves() -> Vec<ComparisonCurve> {
    vec![
        ComparisonCurve {
            name: "Simba",
            redshifts: vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            log_densities: vec![-2.5, -3.0, -3.6, -4.7, -5.4, -5.9],
            color: Color::CYCLE_BLUE,
        },
        ComparisonCurve {
            name: "Magneticum",
            redshifts: vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            log_densities: vec![-1.5, -2.5, -3.0, -3.8, -4.5, -5.2],
            color: Color::CYCLE_ORANGE,
        },
        ComparisonCurve {
            name: "IllustrisTNG",
            redshifts: vec![0.0, 1.0, 2.0, 3.0, 4.0],
            log_densities: vec![-1.9, -3.0, -3.4, -4.2, -6.0],
            color: Color::CYCLE_GREEN,
        },
    ]
}

/// Observational measurement set with its marker and error bars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub reference: &'static str,
    pub redshifts: Vec<f64>,
    pub log_densities: Vec<f64>,
    pub redshift_error: Option<ErrorBar>,
    pub density_error: Option<ErrorBar>,
    pub shape: MarkerShape,
    pub size_pt: f64,
}

impl Observation {
    /// Unlabelled marker series; construction checks every paired array.
    pub fn series(&self, color: Color) -> FigureResult<Series> {
        let mut series = Series::markers(
            self.reference,
            self.redshifts.clone(),
            self.log_densities.clone(),
            self.shape,
            self.size_pt,
            color,
        )?;
        if let Some(error) = &self.redshift_error {
            series = series.with_x_error(error.clone())?;
        }
        if let Some(error) = &self.density_error {
            series = series.with_y_error(error.clone())?;
        }
        Ok(series)
    }
}

/// Literature measurements of passive number densities.
#[must_use]
pub fn observations() -> Vec<Observation> {
    vec![
        Observation {
            reference: "Carnall+22",
            redshifts: vec![3.5, 4.5],
            log_densities: vec![6.3e-5_f64.log10(), 3.5e-5_f64.log10()],
            redshift_error: Some(ErrorBar::Symmetric(vec![0.5, 0.5])),
            density_error: None,
            shape: MarkerShape::TriangleDown,
            size_pt: 6.0,
        },
        Observation {
            reference: "Weibel+25",
            redshifts: vec![7.5],
            log_densities: vec![-5.8],
            redshift_error: Some(ErrorBar::uniform(0.0, 1)),
            density_error: Some(ErrorBar::Asymmetric {
                lower: vec![0.8],
                upper: vec![0.5],
            }),
            shape: MarkerShape::Star,
            size_pt: 10.0,
        },
        Observation {
            reference: "Valentino+23",
            redshifts: vec![5.8],
            log_densities: vec![-5.6],
            redshift_error: Some(ErrorBar::uniform(0.0, 1)),
            density_error: Some(ErrorBar::Asymmetric {
                lower: vec![0.5],
                upper: vec![0.0],
            }),
            shape: MarkerShape::Pentagon,
            size_pt: 5.0,
        },
        Observation {
            reference: "Carnall+22",
            redshifts: vec![2.5, 3.5],
            log_densities: vec![-4.2, -4.8],
            redshift_error: Some(ErrorBar::uniform(0.0, 2)),
            density_error: Some(ErrorBar::Asymmetric {
                lower: vec![0.0, 0.3],
                upper: vec![0.0, 0.1],
            }),
            shape: MarkerShape::Point,
            size_pt: 5.0,
        },
        Observation {
            reference: "Alberts+23",
            redshifts: vec![4.8],
            log_densities: vec![-4.7],
            redshift_error: Some(ErrorBar::Asymmetric {
                lower: vec![0.4],
                upper: vec![0.5],
            }),
            density_error: Some(ErrorBar::Asymmetric {
                lower: vec![0.9],
                upper: vec![0.2],
            }),
            shape: MarkerShape::Point,
            size_pt: 5.0,
        },
        Observation {
            reference: "de Graaf+24",
            redshifts: vec![3.5],
            log_densities: vec![-5.0],
            redshift_error: Some(ErrorBar::Symmetric(vec![0.5])),
            density_error: Some(ErrorBar::Symmetric(vec![0.1])),
            shape: MarkerShape::Point,
            size_pt: 5.0,
        },
        Observation {
            reference: "Nanayakarra+24",
            redshifts: vec![5.0],
            log_densities: vec![3e-6_f64.log10()],
            redshift_error: Some(ErrorBar::Symmetric(vec![0.5])),
            density_error: Some(ErrorBar::Symmetric(vec![0.1])),
            shape: MarkerShape::Point,
            size_pt: 5.0,
        },
        Observation {
            reference: "Baker+25",
            redshifts: vec![4.65, 5.5, 6.75],
            log_densities: vec![-5.0, -5.6, -6.25],
            redshift_error: Some(ErrorBar::Symmetric(vec![0.2, 0.5, 0.6])),
            density_error: Some(ErrorBar::Asymmetric {
                lower: vec![0.2, 0.35, 0.8],
                upper: vec![0.1, 0.2, 0.3],
            }),
            shape: MarkerShape::Circle,
            size_pt: 5.0,
        },
        Observation {
            reference: "McLeod+21",
            redshifts: vec![0.5, 1.5, 2.0, 2.5, 3.4],
            log_densities: vec![-3.3, -3.65, -4.15, -4.3, -5.0],
            redshift_error: Some(ErrorBar::uniform(0.0, 5)),
            density_error: Some(ErrorBar::uniform_asymmetric(0.0, 0.0, 5)),
            shape: MarkerShape::Square,
            size_pt: 5.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::{SampleSelection, eagle, flares, observations};
    use crate::error::FigureError;
    use crate::render::Color;

    #[test]
    fn incomplete_eagle_columns_are_kept_but_not_plottable() {
        let table = eagle();
        assert_eq!(
            table
                .column(SampleSelection::Mass5e9SsfrBelow1)
                .map(<[f64]>::len),
            Some(5)
        );
        assert!(!table.is_complete(SampleSelection::Mass5e9SsfrBelow2));
        let err = table
            .series(SampleSelection::Mass1e10SsfrBelow2, Color::BLUE)
            .expect_err("five values for six redshifts");
        assert!(matches!(
            err,
            FigureError::LengthMismatch {
                expected: 6,
                actual: 5,
                ..
            }
        ));
    }

    #[test]
    fn plotted_columns_are_complete() {
        assert!(eagle().is_complete(SampleSelection::Mass1e10SsfrBelow1));
        for selection in SampleSelection::ALL {
            assert!(flares().is_complete(selection), "{}", selection.key());
        }
    }

    #[test]
    fn every_observation_builds_a_series() {
        for observation in observations() {
            observation
                .series(Color::GREY)
                .unwrap_or_else(|err| panic!("{}: {err}", observation.reference));
        }
    }

    #[test]
    fn column_keys_follow_table_order() {
        let keys: Vec<_> = flares().columns.keys().map(|key| key.key()).collect();
        assert_eq!(
            keys,
            ["5e9_sSFR_-1", "5e9_sSFR_-2", "1e10_sSFR_-1", "1e10_sSFR_-2"]
        );
    }
}

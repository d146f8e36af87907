use serde::Serialize;

use crate::error::FigureResult;
use crate::figure::Series;
use crate::render::Color;

/// Stellar-to-halo mass ratios read off a published relation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShmrComparison {
    pub label: &'static str,
    pub log_halo_masses: Vec<f64>,
    pub log_efficiencies: Vec<f64>,
}

impl ShmrComparison {
    /// Linear efficiencies, `10^log_efficiency`.
    #[must_use]
    pub fn efficiencies(&self) -> Vec<f64> {
        self.log_efficiencies
            .iter()
            .map(|value| 10f64.powf(*value))
            .collect()
    }

    pub fn series(&self, color: Color, width_pt: f64) -> FigureResult<Series> {
        Ok(Series::line(
            self.label,
            self.log_halo_masses.clone(),
            self.efficiencies(),
            color,
        )?
        .with_line_width(width_pt)
        .with_label(self.label))
    }
}

/// z ~ 5 relation of Shuntov+22.
#[must_use]
pub fn shuntov22_z5() -> ShmrComparison {
    ShmrComparison {
        label: "z = 5 (Shuntov+22)",
        log_halo_masses: vec![
            11.0,
            11.415841584158416,
            11.828382838283828,
            12.184818481848184,
            12.732673267326733,
            13.138613861386139,
            13.508250825082508,
            13.996699669966997,
        ],
        log_efficiencies: vec![
            -2.4397590361445785,
            -2.141566265060241,
            -1.8253012048192772,
            -1.5753012048192772,
            -1.3283132530120478,
            -1.3644578313253009,
            -1.5391566265060241,
            -1.8493975903614457,
        ],
    }
}

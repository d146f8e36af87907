//! Stellar-to-halo mass ratio as a double power law in halo mass.
//!
//! The efficiency peaks near `M1` and falls off as `M^α` below it and as
//! `M^-β` above it:
//!
//! ```text
//! efficiency(M) = 2N / ((M / M1)^(-α) + (M / M1)^β)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{FigureError, FigureResult};

/// Fixed parameters of the efficiency curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShmrParameters {
    /// Halo mass `M1` at which the two branches meet, in solar masses.
    pub peak_halo_mass: f64,
    /// Normalization `N`; the efficiency at `M1` equals `N`.
    pub peak_efficiency: f64,
    /// Low-mass slope `α`.
    pub low_mass_slope: f64,
    /// High-mass slope `β`.
    pub high_mass_slope: f64,
}

impl ShmrParameters {
    pub fn new(
        peak_halo_mass: f64,
        peak_efficiency: f64,
        low_mass_slope: f64,
        high_mass_slope: f64,
    ) -> FigureResult<Self> {
        Self {
            peak_halo_mass,
            peak_efficiency,
            low_mass_slope,
            high_mass_slope,
        }
        .validate()
    }

    /// Moster+13-like parameters used for the z = 0 relation:
    /// log10 M1 = 11.8, N = 0.03, α = 1.3, β = 0.6.
    #[must_use]
    pub fn moster13_like() -> Self {
        Self {
            peak_halo_mass: 10f64.powf(11.8),
            peak_efficiency: 0.03,
            low_mass_slope: 1.3,
            high_mass_slope: 0.6,
        }
    }

    pub fn validate(self) -> FigureResult<Self> {
        if !self.peak_halo_mass.is_finite() || self.peak_halo_mass <= 0.0 {
            return Err(FigureError::InvalidData(
                "peak halo mass must be finite and > 0".to_owned(),
            ));
        }
        if !self.peak_efficiency.is_finite() || self.peak_efficiency <= 0.0 {
            return Err(FigureError::InvalidData(
                "peak efficiency must be finite and > 0".to_owned(),
            ));
        }
        if !self.low_mass_slope.is_finite()
            || !self.high_mass_slope.is_finite()
            || self.low_mass_slope <= 0.0
            || self.high_mass_slope <= 0.0
        {
            return Err(FigureError::InvalidData(
                "efficiency slopes must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Efficiency (stellar mass / halo mass) at one halo mass.
    pub fn efficiency(&self, halo_mass: f64) -> FigureResult<f64> {
        if !halo_mass.is_finite() || halo_mass <= 0.0 {
            return Err(FigureError::InvalidData(format!(
                "halo mass must be finite and > 0, got {halo_mass}"
            )));
        }
        let ratio = halo_mass / self.peak_halo_mass;
        Ok(2.0 * self.peak_efficiency
            / (ratio.powf(-self.low_mass_slope) + ratio.powf(self.high_mass_slope)))
    }

    /// Closed-form maximum: `x* = (α/β)^(1/(α+β))`, `M_peak = M1 · x*`.
    #[must_use]
    pub fn analytic_peak(&self) -> ShmrPeak {
        let alpha = self.low_mass_slope;
        let beta = self.high_mass_slope;
        let ratio = (alpha / beta).powf(1.0 / (alpha + beta));
        ShmrPeak {
            log_halo_mass: (self.peak_halo_mass * ratio).log10(),
            efficiency: 2.0 * self.peak_efficiency / (ratio.powf(-alpha) + ratio.powf(beta)),
        }
    }
}

/// Location and height of the efficiency maximum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShmrPeak {
    pub log_halo_mass: f64,
    pub efficiency: f64,
}

impl ShmrPeak {
    /// Stellar mass hosted by a halo at the peak, in solar masses.
    #[must_use]
    pub fn stellar_mass(&self) -> f64 {
        10f64.powf(self.log_halo_mass) * self.efficiency
    }
}

/// Peak found on a sampled curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampledPeak {
    pub index: usize,
    pub peak: ShmrPeak,
}

/// Efficiency evaluated on a grid of halo masses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyCurve {
    pub halo_masses: Vec<f64>,
    pub efficiencies: Vec<f64>,
}

impl EfficiencyCurve {
    pub fn evaluate(parameters: &ShmrParameters, halo_masses: Vec<f64>) -> FigureResult<Self> {
        let parameters = parameters.validate()?;
        let efficiencies = halo_masses
            .iter()
            .map(|mass| parameters.efficiency(*mass))
            .collect::<FigureResult<Vec<_>>>()?;
        Ok(Self {
            halo_masses,
            efficiencies,
        })
    }

    #[must_use]
    pub fn log_halo_masses(&self) -> Vec<f64> {
        self.halo_masses.iter().map(|mass| mass.log10()).collect()
    }

    #[must_use]
    pub fn peak(&self) -> Option<SampledPeak> {
        let index = peak_index(&self.efficiencies)?;
        Some(SampledPeak {
            index,
            peak: ShmrPeak {
                log_halo_mass: self.halo_masses[index].log10(),
                efficiency: self.efficiencies[index],
            },
        })
    }

    /// Indices of strict interior local maxima.
    #[must_use]
    pub fn local_maxima(&self) -> Vec<usize> {
        self.efficiencies
            .windows(3)
            .enumerate()
            .filter(|(_, window)| window[1] > window[0] && window[1] > window[2])
            .map(|(index, _)| index + 1)
            .collect()
    }
}

/// `count` values log-spaced from `10^start_exponent` to `10^stop_exponent`,
/// both ends included.
#[must_use]
pub fn logspace(start_exponent: f64, stop_exponent: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![10f64.powf(start_exponent)],
        _ => {
            let step = (stop_exponent - start_exponent) / (count - 1) as f64;
            (0..count)
                .map(|index| {
                    let exponent = if index == count - 1 {
                        stop_exponent
                    } else {
                        start_exponent + step * index as f64
                    };
                    10f64.powf(exponent)
                })
                .collect()
        }
    }
}

/// Index of the first maximum, ignoring non-finite values.
#[must_use]
pub fn peak_index(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, value) in values.iter().copied().enumerate() {
        if !value.is_finite() {
            continue;
        }
        if best.is_none_or(|(_, current)| value > current) {
            best = Some((index, value));
        }
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::{ShmrParameters, logspace, peak_index};

    #[test]
    fn efficiency_at_peak_mass_equals_normalization() {
        let parameters = ShmrParameters::moster13_like();
        let efficiency = parameters
            .efficiency(10f64.powf(11.8))
            .expect("positive mass");
        assert_eq!(efficiency, 0.03);
    }

    #[test]
    fn non_positive_halo_mass_is_rejected() {
        let parameters = ShmrParameters::moster13_like();
        assert!(parameters.efficiency(0.0).is_err());
        assert!(parameters.efficiency(-1.0e12).is_err());
    }

    #[test]
    fn non_positive_peak_mass_is_rejected() {
        assert!(ShmrParameters::new(0.0, 0.03, 1.3, 0.6).is_err());
        assert!(ShmrParameters::new(-1.0, 0.03, 1.3, 0.6).is_err());
        assert!(ShmrParameters::new(f64::NAN, 0.03, 1.3, 0.6).is_err());
    }

    #[test]
    fn logspace_includes_both_ends() {
        let values = logspace(10.0, 15.0, 100);
        assert_eq!(values.len(), 100);
        assert_eq!(values[0], 1e10);
        assert_eq!(values[99], 1e15);
    }

    #[test]
    fn peak_index_returns_first_maximum() {
        assert_eq!(peak_index(&[1.0, 3.0, 3.0, 2.0]), Some(1));
        assert_eq!(peak_index(&[f64::NAN, 1.0]), Some(1));
        assert_eq!(peak_index(&[]), None);
    }
}

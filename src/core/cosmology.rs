//! Flat ΛCDM distance and volume helpers used to express simulation boxes
//! as survey footprints.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{FigureError, FigureResult};

/// Speed of light in km/s.
pub const SPEED_OF_LIGHT_KM_S: f64 = 299_792.458;

const COMOVING_DISTANCE_STEPS: usize = 1000;

/// Square arcminutes in one steradian.
#[must_use]
pub fn square_arcmin_per_steradian() -> f64 {
    (180.0 / PI).powi(2) * 3600.0
}

/// Flat cosmology with matter and dark energy only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cosmology {
    /// Hubble constant in km/s/Mpc.
    pub hubble_constant: f64,
    pub omega_matter: f64,
    pub omega_lambda: f64,
}

impl Cosmology {
    /// Planck 2015 parameters.
    pub const PLANCK15: Self = Self {
        hubble_constant: 67.74,
        omega_matter: 0.3089,
        omega_lambda: 0.6911,
    };

    /// Hubble distance `c / H0` in Mpc.
    #[must_use]
    pub fn hubble_distance(&self) -> f64 {
        SPEED_OF_LIGHT_KM_S / self.hubble_constant
    }

    /// `E(z) = H(z) / H0`.
    #[must_use]
    pub fn e_of_z(&self, redshift: f64) -> f64 {
        let scale_factor = 1.0 / (1.0 + redshift);
        (self.omega_matter / scale_factor.powi(3) + self.omega_lambda).sqrt()
    }

    /// Line-of-sight comoving distance in Mpc, Simpson's rule over `1/E(z)`.
    #[must_use]
    pub fn comoving_distance(&self, redshift: f64) -> f64 {
        let steps = COMOVING_DISTANCE_STEPS;
        let dz = redshift / steps as f64;
        let sum: f64 = (0..=steps)
            .map(|index| {
                let weight = if index == 0 || index == steps {
                    1.0
                } else if index % 2 == 0 {
                    2.0
                } else {
                    4.0
                };
                weight / self.e_of_z(index as f64 * dz)
            })
            .sum();
        self.hubble_distance() * sum * dz / 3.0
    }

    /// Comoving volume element `dV / dz / dΩ` in Mpc³/sr.
    #[must_use]
    pub fn dv_dz_domega(&self, redshift: f64) -> f64 {
        let comoving = self.comoving_distance(redshift);
        self.hubble_distance() * comoving * comoving / self.e_of_z(redshift)
    }

    /// Sky area in arcmin² that encloses `volume` cMpc³ over a redshift
    /// slice of width `delta_z` centred on `redshift`.
    pub fn volume_to_area(&self, volume: f64, redshift: f64, delta_z: f64) -> FigureResult<f64> {
        let element = self.slice_element(redshift, delta_z)?;
        if !volume.is_finite() || volume < 0.0 {
            return Err(FigureError::InvalidData(
                "volume must be finite and >= 0".to_owned(),
            ));
        }
        Ok(volume / element * square_arcmin_per_steradian())
    }

    /// Inverse of [`Cosmology::volume_to_area`].
    pub fn area_to_volume(&self, area: f64, redshift: f64, delta_z: f64) -> FigureResult<f64> {
        let element = self.slice_element(redshift, delta_z)?;
        if !area.is_finite() || area < 0.0 {
            return Err(FigureError::InvalidData(
                "area must be finite and >= 0".to_owned(),
            ));
        }
        Ok(area / square_arcmin_per_steradian() * element)
    }

    fn slice_element(&self, redshift: f64, delta_z: f64) -> FigureResult<f64> {
        if !redshift.is_finite() || redshift <= 0.0 {
            return Err(FigureError::InvalidData(
                "slice redshift must be finite and > 0".to_owned(),
            ));
        }
        if !delta_z.is_finite() || delta_z <= 0.0 {
            return Err(FigureError::InvalidData(
                "slice width must be finite and > 0".to_owned(),
            ));
        }
        Ok(self.dv_dz_domega(redshift) * delta_z)
    }
}

impl Default for Cosmology {
    fn default() -> Self {
        Self::PLANCK15
    }
}

/// log10 of the smallest resolved stellar mass, taken as 100 baryonic
/// resolution elements.
#[must_use]
pub fn stellar_mass_limit(element_mass: f64) -> f64 {
    (element_mass * 100.0).log10()
}

#[cfg(test)]
mod tests {
    use super::{Cosmology, stellar_mass_limit};

    #[test]
    fn expansion_rate_is_unity_today() {
        assert!((Cosmology::PLANCK15.e_of_z(0.0) - 1.0).abs() <= 1e-12);
    }

    #[test]
    fn comoving_distance_vanishes_at_zero_redshift() {
        assert_eq!(Cosmology::PLANCK15.comoving_distance(0.0), 0.0);
    }

    #[test]
    fn comoving_distance_to_redshift_seven_is_about_nine_gpc() {
        let distance = Cosmology::PLANCK15.comoving_distance(7.0);
        assert!((8_500.0..9_200.0).contains(&distance), "{distance}");
    }

    #[test]
    fn area_conversion_rejects_empty_slice() {
        assert!(Cosmology::PLANCK15.volume_to_area(1e6, 7.0, 0.0).is_err());
        assert!(Cosmology::PLANCK15.volume_to_area(1e6, 0.0, 1.0).is_err());
    }

    #[test]
    fn stellar_mass_limit_adds_two_dex() {
        assert!((stellar_mass_limit(1e6) - 8.0).abs() <= 1e-12);
    }
}

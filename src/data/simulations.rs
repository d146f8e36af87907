use indexmap::IndexMap;
use serde::Serialize;

use crate::core::cosmology::square_arcmin_per_steradian;
use crate::core::stellar_mass_limit;
use crate::render::Color;

const LITTLE_H: f64 = 0.7;
const SQUARE_ARCMIN_PER_SQUARE_DEGREE: f64 = 3600.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimulationCategory {
    LargeVolume,
    RadiativeTransfer,
    Zoom,
}

/// One hydrodynamical simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationRun {
    /// Comoving box side length in cMpc.
    pub box_size: f64,
    /// Baryonic resolution element mass in M☉.
    pub element_mass: f64,
    pub radiative_transfer: bool,
    pub complete: bool,
    pub final_redshift: f64,
    pub category: SimulationCategory,
    pub highlight: Option<Color>,
    pub starred: bool,
}

impl SimulationRun {
    const fn large_volume(box_size: f64, element_mass: f64) -> Self {
        Self {
            box_size,
            element_mass,
            radiative_transfer: false,
            complete: true,
            final_redshift: 0.0,
            category: SimulationCategory::LargeVolume,
            highlight: None,
            starred: false,
        }
    }

    const fn radiative_transfer(box_size: f64, element_mass: f64, final_redshift: f64) -> Self {
        Self {
            radiative_transfer: true,
            final_redshift,
            category: SimulationCategory::RadiativeTransfer,
            ..Self::large_volume(box_size, element_mass)
        }
    }

    const fn zoom(box_size: f64, element_mass: f64, highlight: Color) -> Self {
        Self {
            category: SimulationCategory::Zoom,
            highlight: Some(highlight),
            ..Self::large_volume(box_size, element_mass)
        }
    }

    const fn ending_at(mut self, final_redshift: f64) -> Self {
        self.final_redshift = final_redshift;
        self
    }

    const fn starred(mut self) -> Self {
        self.starred = true;
        self
    }

    #[must_use]
    pub fn volume(&self) -> f64 {
        self.box_size.powi(3)
    }

    #[must_use]
    pub fn log_volume(&self) -> f64 {
        self.volume().log10()
    }

    #[must_use]
    pub fn log_element_mass(&self) -> f64 {
        self.element_mass.log10()
    }

    /// log10 of the smallest stellar mass resolved by 100 elements.
    #[must_use]
    pub fn log_min_stellar_mass(&self) -> f64 {
        stellar_mass_limit(self.element_mass)
    }
}

/// Simulation runs keyed by name, in catalogue order.
#[must_use]
pub fn simulation_catalogue() -> IndexMap<&'static str, SimulationRun> {
    IndexMap::from([
        ("EAGLE-Ref", SimulationRun::large_volume(100.0, 1.81e6)),
        ("EAGLE-Recal", SimulationRun::large_volume(25.0, 2.26e5)),
        ("Illustris-TNG50", SimulationRun::large_volume(51.7, 8.5e4)),
        ("Illustris-TNG100", SimulationRun::large_volume(110.7, 1.4e6)),
        ("Illustris-TNG300", SimulationRun::large_volume(302.6, 1.1e7)),
        ("Simba-100", SimulationRun::large_volume(100.0 / LITTLE_H, 1.82e7)),
        (
            "Simba-50",
            SimulationRun::large_volume(50.0 / LITTLE_H, 2.28e6).ending_at(1.0),
        ),
        (
            "Simba-25",
            SimulationRun::large_volume(25.0 / LITTLE_H, 2.85e5).ending_at(2.0),
        ),
        ("Horizon-AGN", SimulationRun::large_volume(120.0, 4e6)),
        ("BAHAMAS", SimulationRun::large_volume(560.0, 1.5e9)),
        ("THESAN-1", SimulationRun::radiative_transfer(95.5, 5.82e5, 5.5)),
        ("THESAN-2", SimulationRun::radiative_transfer(95.5, 4.66e6, 5.5)),
        ("SPHINX", SimulationRun::radiative_transfer(20.0, 3.8e4, 4.6)),
        ("FLAMINGO-L1_m8", SimulationRun::large_volume(1000.0, 1.34e8)),
        ("FLAMINGO-L1_m9", SimulationRun::large_volume(1000.0, 1.07e9)),
        ("FLAMINGO-L2p8_m9", SimulationRun::large_volume(2800.0, 1.07e9)),
        ("MTNG740", SimulationRun::large_volume(740.0, 7.63e7)),
        ("MTNG185", SimulationRun::large_volume(185.0, 2.98e6)),
        ("COLIBRE-50", SimulationRun::large_volume(50.0, 2.3e5)),
        ("COLIBRE-100", SimulationRun::large_volume(100.0, 1.84e6)),
        ("COLIBRE-200", SimulationRun::large_volume(200.0, 1.84e6)),
        ("COLIBRE-400", SimulationRun::large_volume(400.0, 1.47e7)),
        (
            "FLAMELS",
            SimulationRun::zoom(20.0, 2e7, Color::RED)
                .ending_at(5.0)
                .starred(),
        ),
        (
            "FLARES",
            SimulationRun::zoom(14.28, 1.81e6, Color::GREEN)
                .ending_at(5.0)
                .starred(),
        ),
        ("CAMELS-1", SimulationRun::zoom(25.0 / LITTLE_H, 2e7, Color::RED)),
        ("CAMELS-2", SimulationRun::zoom(50.0 / LITTLE_H, 2e7, Color::RED)),
    ])
}

/// Imaging survey footprint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Survey {
    pub name: &'static str,
    /// Sky area in arcmin².
    pub area: f64,
    pub redshift: f64,
}

impl Survey {
    #[must_use]
    pub fn log_area(&self) -> f64 {
        self.area.log10()
    }
}

#[must_use]
pub fn survey_catalogue() -> Vec<Survey> {
    let at_z7 = |name, area| Survey {
        name,
        area,
        redshift: 7.0,
    };
    vec![
        at_z7("All Sky", 4.0 * std::f64::consts::PI * square_arcmin_per_steradian()),
        at_z7("Euclid/Wide", 15000.0 * SQUARE_ARCMIN_PER_SQUARE_DEGREE),
        at_z7("Euclid/Deep", 40.0 * SQUARE_ARCMIN_PER_SQUARE_DEGREE),
        at_z7("Webb/COSMOS-Web", 0.6 * SQUARE_ARCMIN_PER_SQUARE_DEGREE),
        at_z7("Webb/NGDEEP", 8.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::{SimulationCategory, simulation_catalogue, survey_catalogue};

    #[test]
    fn catalogue_keeps_source_order() {
        let catalogue = simulation_catalogue();
        assert_eq!(catalogue.len(), 26);
        assert_eq!(catalogue.get_index(0).map(|(name, _)| *name), Some("EAGLE-Ref"));
        assert_eq!(catalogue.get_index(25).map(|(name, _)| *name), Some("CAMELS-2"));
    }

    #[test]
    fn radiative_transfer_runs_are_flagged() {
        let catalogue = simulation_catalogue();
        let rt: Vec<_> = catalogue
            .iter()
            .filter(|(_, run)| run.radiative_transfer)
            .map(|(name, run)| {
                assert_eq!(run.category, SimulationCategory::RadiativeTransfer);
                *name
            })
            .collect();
        assert_eq!(rt, ["THESAN-1", "THESAN-2", "SPHINX"]);
    }

    #[test]
    fn only_flamels_and_flares_are_starred() {
        let starred: Vec<_> = simulation_catalogue()
            .into_iter()
            .filter(|(_, run)| run.starred)
            .map(|(name, _)| name)
            .collect();
        assert_eq!(starred, ["FLAMELS", "FLARES"]);
    }

    #[test]
    fn all_sky_is_about_148_million_square_arcmin() {
        let surveys = survey_catalogue();
        let all_sky = surveys.first().expect("all sky survey");
        assert!((all_sky.area / 1.485e8 - 1.0).abs() < 1e-3);
        assert!(surveys.iter().all(|survey| survey.redshift == 7.0));
    }
}

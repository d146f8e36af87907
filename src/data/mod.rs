//! Literal data tables plotted by the figures.
//!
//! Values are kept exactly as published, including incomplete columns; the
//! figure builders decide which columns are plotted.

pub mod number_density;
pub mod shmr;
pub mod simulations;

pub use number_density::{
    ComparisonCurve, Observation, SampleSelection, SimulationTable, comparison_curves, eagle,
    flares, observations,
};
pub use shmr::{ShmrComparison, shuntov22_z5};
pub use simulations::{
    SimulationCategory, SimulationRun, Survey, simulation_catalogue, survey_catalogue,
};

//! galaxy-figures: static comparison figures for passive galaxy populations.
//!
//! The crate keeps a strict split between literal data tables, figure
//! descriptions, a backend-agnostic scene and the raster backend, so every
//! stage up to rasterization stays deterministic and testable headlessly.

pub mod core;
pub mod data;
pub mod error;
pub mod export;
pub mod figure;
pub mod render;
pub mod telemetry;

pub use error::{FigureError, FigureResult};
pub use figure::{Figure, FigureConfig, FigureStyle};

pub mod clip;
pub mod cosmology;
pub mod scale;
pub mod shmr;
pub mod ticks;
pub mod types;

pub use clip::{clip_polyline, clip_segment};
pub use cosmology::{Cosmology, stellar_mass_limit};
pub use scale::{AxisScale, PixelSpan, ScaleKind};
pub use shmr::{EfficiencyCurve, SampledPeak, ShmrParameters, ShmrPeak, logspace, peak_index};
pub use ticks::{LinearTransform, Tick};
pub use types::{PlotRect, Viewport};

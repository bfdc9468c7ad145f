//! Range/azimuth mapping grids and detection reporting for radar perception.
//!
//! The grid half turns cropped FFT bins into meters and azimuth angles and
//! resolves physical coordinates back to bins. The report half flattens
//! per-frame detection tables into an append-only text file.

pub mod config;
pub mod grid;
pub mod math;
pub mod prelude;
pub mod report;
pub mod telemetry;

pub use config::RadarConfig;
pub use prelude::{MapError, MapResult};

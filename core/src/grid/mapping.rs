use crate::config::RadarConfig;
use crate::grid::angle::{build_angle_grid, AngleUnit};
use crate::grid::locate::range_angle_to_indices;
use crate::grid::range::build_range_grid;
use crate::prelude::{MapError, MapResult};
use crate::telemetry::log::LogManager;
use ndarray::Array1;

/// Which axis of the range/azimuth map to build a grid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridKind {
    Range,
    Angle,
}

/// Builds the grid for `kind`. `unit` only applies to the angle axis.
pub fn build_grid(kind: GridKind, config: &RadarConfig, unit: AngleUnit) -> Array1<f64> {
    match kind {
        GridKind::Range => build_range_grid(config),
        GridKind::Angle => build_angle_grid(config, unit),
    }
}

/// Range and angle grids derived once from a radar configuration.
#[derive(Debug, Clone)]
pub struct RaGrids {
    pub range: Array1<f64>,
    pub angle: Array1<f64>,
    pub unit: AngleUnit,
}

impl RaGrids {
    pub fn new(config: &RadarConfig, unit: AngleUnit) -> Self {
        let range = build_grid(GridKind::Range, config, unit);
        let angle = build_grid(GridKind::Angle, config, unit);
        LogManager::new("grid").record(&format!(
            "built {}x{} grids, range {:.3}..{:.3} m, angle {:.4}..{:.4} {}",
            range.len(),
            angle.len(),
            range.iter().next().copied().unwrap_or_default(),
            range.iter().last().copied().unwrap_or_default(),
            angle.iter().next().copied().unwrap_or_default(),
            angle.iter().last().copied().unwrap_or_default(),
            unit
        ));
        Self { range, angle, unit }
    }

    /// Maps a (range, angle) pair to (range bin, angle bin).
    pub fn locate(&self, range: f64, angle: f64) -> MapResult<(usize, usize)> {
        range_angle_to_indices(range, angle, self.range.view(), self.angle.view())
    }

    /// Physical (range, angle) at the given bins.
    pub fn value_at(&self, range_idx: usize, angle_idx: usize) -> MapResult<(f64, f64)> {
        let range = self
            .range
            .get(range_idx)
            .copied()
            .ok_or(MapError::IndexOutOfRange {
                index: range_idx,
                len: self.range.len(),
            })?;
        let angle = self
            .angle
            .get(angle_idx)
            .copied()
            .ok_or(MapError::IndexOutOfRange {
                index: angle_idx,
                len: self.angle.len(),
            })?;
        Ok((range, angle))
    }
}

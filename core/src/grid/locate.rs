use crate::prelude::{MapError, MapResult};
use ndarray::ArrayView1;

/// Finds the grid entry closest to `value`.
///
/// Returns the index and the matched grid value. Equidistant entries resolve
/// to the lower index, and a NaN `value` resolves to index 0.
pub fn nearest_index(grid: ArrayView1<f64>, value: f64) -> MapResult<(usize, f64)> {
    let mut entries = grid.iter().copied().enumerate();
    let (mut best_idx, mut best_val) = entries.next().ok_or(MapError::EmptyGrid)?;
    let mut best_dist = (best_val - value).abs();

    for (idx, candidate) in entries {
        let dist = (candidate - value).abs();
        if dist < best_dist {
            best_idx = idx;
            best_val = candidate;
            best_dist = dist;
        }
    }

    Ok((best_idx, best_val))
}

/// Resolves a physical (range, angle) pair to map bins.
///
/// Each axis is searched on its own; there is no joint 2-D nearest
/// neighbour. `angle` must be in the unit the angle grid was built with.
pub fn range_angle_to_indices(
    range: f64,
    angle: f64,
    range_grid: ArrayView1<f64>,
    angle_grid: ArrayView1<f64>,
) -> MapResult<(usize, usize)> {
    let (range_idx, _) = nearest_index(range_grid, range)?;
    let (angle_idx, _) = nearest_index(angle_grid, angle)?;
    Ok((range_idx, angle_idx))
}

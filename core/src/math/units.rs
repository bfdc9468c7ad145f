use ndarray::{Array1, ArrayView1};

/// Speed of light in vacuum, m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Converts every element of a radian grid to degrees.
pub fn to_degrees(grid: ArrayView1<f64>) -> Array1<f64> {
    grid.mapv(f64::to_degrees)
}

/// Converts every element of a degree grid to radians.
pub fn to_radians(grid: ArrayView1<f64>) -> Array1<f64> {
    grid.mapv(f64::to_radians)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn quarter_turn_converts_both_ways() {
        let rad = array![-FRAC_PI_2, 0.0, FRAC_PI_2];
        let deg = to_degrees(rad.view());
        assert!((deg[0] + 90.0).abs() < 1e-12);
        assert!((deg[2] - 90.0).abs() < 1e-12);

        let back = to_radians(deg.view());
        for (a, b) in back.iter().zip(rad.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }
}

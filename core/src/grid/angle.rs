use crate::config::RadarConfig;
use crate::math::units::to_degrees;
use crate::prelude::{MapError, MapResult};
use ndarray::Array1;
use std::fmt;
use std::str::FromStr;

/// Unit of the values stored in an angle grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
}

impl FromStr for AngleUnit {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rad" | "radians" => Ok(AngleUnit::Radians),
            "deg" | "degrees" => Ok(AngleUnit::Degrees),
            other => Err(MapError::InvalidConfig(format!(
                "unsupported angle unit '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AngleUnit::Radians => write!(f, "rad"),
            AngleUnit::Degrees => write!(f, "deg"),
        }
    }
}

/// Builds the azimuth grid for the angle axis of the map.
///
/// Bins are spaced linearly in sine space between the sines of `ra_min` and
/// `ra_max`, then mapped back through arcsine, so bins are denser at
/// broadside than near the field-of-view edges.
pub fn build_angle_grid(config: &RadarConfig, unit: AngleUnit) -> Array1<f64> {
    let w = Array1::linspace(
        config.ra_min.to_radians().sin(),
        config.ra_max.to_radians().sin(),
        config.ramap_asize,
    );
    // linspace may overshoot the endpoint by an ulp
    let radians = w.mapv(|s| s.clamp(-1.0, 1.0).asin());

    match unit {
        AngleUnit::Radians => radians,
        AngleUnit::Degrees => to_degrees(radians.view()),
    }
}

/// Same as [`build_angle_grid`] with the unit given by name.
pub fn build_angle_grid_named(config: &RadarConfig, unit: &str) -> MapResult<Array1<f64>> {
    let unit = unit.parse::<AngleUnit>()?;
    Ok(build_angle_grid(config, unit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::sample_config;
    use crate::math::units::to_radians;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn full_fov_grid_spans_half_turn() {
        let config = sample_config();
        let grid = build_angle_grid(&config, AngleUnit::Radians);
        assert_eq!(grid.len(), 128);
        assert!((grid[0] + FRAC_PI_2).abs() < 1e-6);
        assert!((grid[127] - FRAC_PI_2).abs() < 1e-6);
        assert!(grid[63].abs() < 0.05);
        assert!(grid[64].abs() < 0.05);
        assert!(grid.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn angle_grid_strictly_increases() {
        let mut config = sample_config();
        config.ra_min = -60.0;
        config.ra_max = 45.0;
        config.ramap_asize = 33;
        let grid = build_angle_grid(&config, AngleUnit::Degrees);
        assert_eq!(grid.len(), 33);
        assert!(grid.windows(2).into_iter().all(|w| w[1] > w[0]));
        assert!((grid[0] + 60.0).abs() < 1e-9);
        assert!((grid[32] - 45.0).abs() < 1e-9);
    }

    #[test]
    fn bins_are_denser_at_broadside() {
        let grid = build_angle_grid(&sample_config(), AngleUnit::Degrees);
        let edge_step = grid[1] - grid[0];
        let centre_step = grid[64] - grid[63];
        assert!(centre_step < edge_step);
    }

    #[test]
    fn degree_radian_round_trip() {
        let config = sample_config();
        let rad = build_angle_grid(&config, AngleUnit::Radians);
        let deg = build_angle_grid(&config, AngleUnit::Degrees);
        let back = to_radians(deg.view());
        for (a, b) in back.iter().zip(rad.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn unknown_unit_fails_fast() {
        let err = build_angle_grid_named(&sample_config(), "grad").unwrap_err();
        assert!(matches!(err, MapError::InvalidConfig(_)));
        assert!(build_angle_grid_named(&sample_config(), "deg").is_ok());
        assert_eq!("radians".parse::<AngleUnit>().unwrap(), AngleUnit::Radians);
    }
}

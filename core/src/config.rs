use crate::prelude::{MapError, MapResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Radar configuration needed to derive the range/azimuth map grids.
///
/// Angle bounds are in degrees. Construct directly for trusted values, or go
/// through [`RadarConfig::from_json_str`] / [`RadarConfig::load`] which also
/// run [`RadarConfig::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarConfig {
    /// ADC sample frequency in Hz.
    pub sample_freq: f64,
    /// Chirp sweep slope in Hz/s.
    pub sweep_slope: f64,
    pub crop_num_near: usize,
    pub crop_num_rear: usize,
    pub ramap_rsize: usize,
    pub ramap_asize: usize,
    pub ra_min: f64,
    pub ra_max: f64,
}

impl RadarConfig {
    pub fn from_json_str(contents: &str) -> MapResult<Self> {
        let config: RadarConfig = serde_json::from_str(contents)
            .map_err(|err| MapError::InvalidConfig(format!("radar config: {}", err)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> MapResult<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref).map_err(|err| MapError::io(path_ref, err))?;
        let config: RadarConfig = serde_json::from_str(&contents).map_err(|err| {
            MapError::InvalidConfig(format!("radar config {}: {}", path_ref.display(), err))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Total FFT length along range before the guard bins are cropped.
    pub fn fft_range_size(&self) -> usize {
        self.ramap_rsize + self.crop_num_near + self.crop_num_rear
    }

    pub fn validate(&self) -> MapResult<()> {
        if !(self.sample_freq.is_finite() && self.sample_freq > 0.0) {
            return Err(MapError::InvalidConfig(format!(
                "sample_freq must be positive, got {}",
                self.sample_freq
            )));
        }
        if !(self.sweep_slope.is_finite() && self.sweep_slope > 0.0) {
            return Err(MapError::InvalidConfig(format!(
                "sweep_slope must be positive, got {}",
                self.sweep_slope
            )));
        }
        if self.ramap_rsize == 0 || self.ramap_asize == 0 {
            return Err(MapError::InvalidConfig(format!(
                "map sizes must be non-zero, got {}x{}",
                self.ramap_rsize, self.ramap_asize
            )));
        }
        if self.crop_num_near > self.ramap_rsize || self.crop_num_rear > self.ramap_rsize {
            return Err(MapError::InvalidConfig(format!(
                "crop counts ({}, {}) exceed ramap_rsize {}",
                self.crop_num_near, self.crop_num_rear, self.ramap_rsize
            )));
        }
        let in_fov = |deg: f64| (-90.0..=90.0).contains(&deg);
        if !(in_fov(self.ra_min) && in_fov(self.ra_max)) {
            return Err(MapError::InvalidConfig(format!(
                "angle bounds [{}, {}] outside [-90, 90]",
                self.ra_min, self.ra_max
            )));
        }
        if self.ra_min >= self.ra_max {
            return Err(MapError::InvalidConfig(format!(
                "ra_min {} must be below ra_max {}",
                self.ra_min, self.ra_max
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn sample_config() -> RadarConfig {
    RadarConfig {
        sample_freq: 4e6,
        sweep_slope: 21e12,
        crop_num_near: 3,
        crop_num_rear: 3,
        ramap_rsize: 128,
        ramap_asize: 128,
        ra_min: -90.0,
        ra_max: 90.0,
    }
}

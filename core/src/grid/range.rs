use crate::config::RadarConfig;
use crate::math::units::SPEED_OF_LIGHT;
use ndarray::{s, Array1};

/// Builds the range grid (meters per cropped frequency bin).
///
/// The beat-frequency grid spans the full FFT length including the guard
/// bins; `crop_num_near` leading and `crop_num_rear` trailing entries are
/// dropped so the result holds exactly `ramap_rsize` values. Zero divisors
/// are not guarded here, run [`RadarConfig::validate`] first.
pub fn build_range_grid(config: &RadarConfig) -> Array1<f64> {
    let fft_range = config.fft_range_size();
    let freq_res = config.sample_freq / fft_range as f64;

    let freq_grid = Array1::from_iter((0..fft_range).map(|bin| bin as f64 * freq_res));
    // halved for the round trip
    let range_grid = freq_grid.mapv(|freq| freq * SPEED_OF_LIGHT / config.sweep_slope / 2.0);

    range_grid
        .slice(s![config.crop_num_near..fft_range - config.crop_num_rear])
        .to_owned()
}

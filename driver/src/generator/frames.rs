use ndarray::Array2;
use rand::{rngs::StdRng, Rng, SeedableRng};
use ramapcore::report::detection::DETECTION_COLUMNS;
use serde::{Deserialize, Serialize};

/// Settings for synthetic detection tensors standing in for detector output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameGeneratorConfig {
    pub frames: usize,
    pub max_dets: usize,
    /// Probability that a slot holds a detection rather than a placeholder.
    pub detection_rate: f64,
    /// Share of detections labelled as explicit background.
    pub background_rate: f64,
    pub seed: u64,
}

impl Default for FrameGeneratorConfig {
    fn default() -> Self {
        Self {
            frames: 4,
            max_dets: 20,
            detection_rate: 0.3,
            background_rate: 0.1,
            seed: 0,
        }
    }
}

/// Builds `frames` tensors of `max_dets x 4`, bins inside a
/// `range_bins x angle_bins` map and class ids below `n_class`.
pub fn generate_frames(
    config: &FrameGeneratorConfig,
    n_class: usize,
    range_bins: usize,
    angle_bins: usize,
) -> Vec<Array2<f64>> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let detection_rate = config.detection_rate.clamp(0.0, 1.0);
    let background_rate = config.background_rate.clamp(0.0, 1.0);

    (0..config.frames)
        .map(|_| {
            let mut frame = Array2::<f64>::zeros((config.max_dets, DETECTION_COLUMNS));
            for mut slot in frame.rows_mut() {
                if n_class == 0 || !rng.gen_bool(detection_rate) {
                    slot[0] = -1.0;
                    continue;
                }
                slot[0] = if rng.gen_bool(background_rate) {
                    -1000.0
                } else {
                    rng.gen_range(0..n_class) as f64
                };
                slot[1] = rng.gen_range(0..range_bins.max(1)) as f64;
                slot[2] = rng.gen_range(0..angle_bins.max(1)) as f64;
                slot[3] = rng.gen_range(0.0..1.0);
            }
            frame
        })
        .collect()
}

use anyhow::Context;
use ndarray::Array2;
use ramapcore::report::detection::DETECTION_COLUMNS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Detection tensors for consecutive frames, as stored on disk.
///
/// Frame ids are the positions in `frames`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionBatch {
    pub frames: Vec<Vec<[f64; DETECTION_COLUMNS]>>,
}

impl DetectionBatch {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading detections {}", path_ref.display()))?;
        let batch: DetectionBatch = serde_json::from_str(&contents)
            .with_context(|| format!("parsing detections {}", path_ref.display()))?;
        Ok(batch)
    }

    pub fn to_tensors(&self) -> anyhow::Result<Vec<Array2<f64>>> {
        self.frames
            .iter()
            .enumerate()
            .map(|(frame_id, rows)| {
                let flat = rows.iter().flat_map(|row| row.iter().copied()).collect();
                Array2::from_shape_vec((rows.len(), DETECTION_COLUMNS), flat)
                    .with_context(|| format!("shaping frame {}", frame_id))
            })
            .collect()
    }
}

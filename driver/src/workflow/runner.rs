use crate::generator::frames::{generate_frames, FrameGeneratorConfig};
use crate::workflow::batch::DetectionBatch;
use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use log::warn;
use ndarray::Array2;
use ramapcore::grid::RaGrids;
use ramapcore::report::{ClassTable, DetectionWriter};
use ramapcore::telemetry::MetricsSnapshot;
use std::path::Path;

/// Bins and grid values matched for one (range, angle) query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocateResult {
    pub range_idx: usize,
    pub angle_idx: usize,
    pub range_m: f64,
    pub angle: f64,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn grids(&self) -> anyhow::Result<RaGrids> {
        let unit = self.config.angle_unit()?;
        Ok(RaGrids::new(&self.config.radar, unit))
    }

    pub fn locate(&self, range: f64, angle: f64) -> anyhow::Result<LocateResult> {
        let grids = self.grids()?;
        let (range_idx, angle_idx) = grids
            .locate(range, angle)
            .with_context(|| format!("locating range {} angle {}", range, angle))?;
        let (range_m, angle) = grids.value_at(range_idx, angle_idx)?;
        Ok(LocateResult {
            range_idx,
            angle_idx,
            range_m,
            angle,
        })
    }

    pub fn load_frames(&self, path: &Path) -> anyhow::Result<Vec<Array2<f64>>> {
        DetectionBatch::load(path)?.to_tensors()
    }

    /// Synthetic frames sized to the configured map and class list.
    pub fn synthetic_frames(
        &self,
        generator: &FrameGeneratorConfig,
    ) -> anyhow::Result<Vec<Array2<f64>>> {
        let classes = ClassTable::load(&self.config.class_config).with_context(|| {
            format!(
                "loading class config {}",
                self.config.class_config.display()
            )
        })?;
        Ok(generate_frames(
            generator,
            classes.len(),
            self.config.radar.ramap_rsize,
            self.config.radar.ramap_asize,
        ))
    }

    /// Appends `frames` to `results_file` as frames 0, 1, 2, ... in order.
    pub fn write_frames(
        &self,
        frames: &[Array2<f64>],
        results_file: &Path,
    ) -> anyhow::Result<MetricsSnapshot> {
        let mut writer = DetectionWriter::new(results_file, &self.config.class_config);

        for (frame_id, frame) in frames.iter().enumerate() {
            let outcome = writer.write_frame(frame_id as i64, frame.view());
            if let Err(err) = outcome {
                if self.config.continue_on_error {
                    warn!("skipping frame {}: {}", frame_id, err);
                    continue;
                }
                return Err(err).with_context(|| {
                    format!(
                        "writing frame {} to {}",
                        frame_id,
                        results_file.display()
                    )
                });
            }
        }

        Ok(writer.metrics())
    }
}

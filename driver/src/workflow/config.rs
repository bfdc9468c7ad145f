use crate::generator::frames::FrameGeneratorConfig;
use anyhow::Context;
use ramapcore::grid::AngleUnit;
use ramapcore::RadarConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_angle_unit() -> String {
    AngleUnit::Radians.to_string()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowConfig {
    pub radar: RadarConfig,
    /// Object config JSON holding the ordered `classes` list.
    pub class_config: PathBuf,
    pub results_file: PathBuf,
    #[serde(default = "default_angle_unit")]
    pub angle_unit: String,
    #[serde(default)]
    pub detections: Option<PathBuf>,
    #[serde(default)]
    pub synthetic: Option<FrameGeneratorConfig>,
    /// Log and skip frames that fail instead of stopping the run.
    #[serde(default)]
    pub continue_on_error: bool,
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let mut config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        if let Some(base) = path_ref.parent() {
            config.resolve_paths(base);
        }
        config
            .radar
            .validate()
            .with_context(|| format!("validating radar section of {}", path_ref.display()))?;
        config.angle_unit()?;
        Ok(config)
    }

    /// Anchors relative file paths at `base`, the workflow file's directory.
    pub fn resolve_paths(&mut self, base: &Path) {
        let anchor = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        anchor(&mut self.class_config);
        anchor(&mut self.results_file);
        if let Some(detections) = self.detections.as_mut() {
            anchor(detections);
        }
    }

    pub fn angle_unit(&self) -> anyhow::Result<AngleUnit> {
        self.angle_unit
            .parse::<AngleUnit>()
            .context("resolving angle_unit")
    }
}

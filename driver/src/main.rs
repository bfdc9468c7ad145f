use anyhow::Context;
use clap::{Parser, Subcommand};
use generator::frames::FrameGeneratorConfig;
use std::path::PathBuf;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Range/azimuth grid lookup and detection report driver")]
struct Args {
    /// Workflow config (YAML) with the radar, class config and report paths
    #[arg(long)]
    workflow: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the range and angle grids and print a summary
    Grids {
        /// Print every grid value, one bin per line
        #[arg(long, default_value_t = false)]
        values: bool,
    },
    /// Resolve a physical (range, angle) pair to map bins
    Locate {
        /// Range in meters
        #[arg(long, allow_hyphen_values = true)]
        range: f64,
        /// Azimuth in the workflow's angle unit
        #[arg(long, allow_hyphen_values = true)]
        angle: f64,
    },
    /// Append per-frame detections to the results file
    Write {
        /// Detections JSON (relative to the working directory); overrides the workflow's `detections`
        #[arg(long)]
        detections: Option<PathBuf>,
        /// Generate this many synthetic frames instead of reading detections
        #[arg(long)]
        synthetic_frames: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// Report path (relative to the working directory); overrides the workflow's `results_file`
        #[arg(long)]
        results_file: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = WorkflowConfig::load(&args.workflow)?;
    let runner = Runner::new(workflow_config);

    match args.command {
        Command::Grids { values } => {
            let grids = runner.grids()?;
            println!(
                "range grid: {} bins, {:.4}..{:.4} m",
                grids.range.len(),
                grids.range.iter().next().copied().unwrap_or_default(),
                grids.range.iter().last().copied().unwrap_or_default()
            );
            println!(
                "angle grid: {} bins, {:.4}..{:.4} {}",
                grids.angle.len(),
                grids.angle.iter().next().copied().unwrap_or_default(),
                grids.angle.iter().last().copied().unwrap_or_default(),
                grids.unit
            );
            if values {
                for (idx, value) in grids.range.iter().enumerate() {
                    println!("range {} {:.6}", idx, value);
                }
                for (idx, value) in grids.angle.iter().enumerate() {
                    println!("angle {} {:.6}", idx, value);
                }
            }
        }
        Command::Locate { range, angle } => {
            let result = runner.locate(range, angle)?;
            println!(
                "range {} -> bin {} ({:.4} m), angle {} -> bin {} ({:.4})",
                range, result.range_idx, result.range_m, angle, result.angle_idx, result.angle
            );
        }
        Command::Write {
            detections,
            synthetic_frames,
            seed,
            results_file,
        } => {
            let config = runner.config();
            let results_file = results_file.unwrap_or_else(|| config.results_file.clone());

            let frames = if let Some(count) = synthetic_frames {
                let mut generator = config.synthetic.clone().unwrap_or_default();
                generator.frames = count;
                if let Some(seed) = seed {
                    generator.seed = seed;
                }
                runner.synthetic_frames(&generator)?
            } else if let Some(path) = detections.or_else(|| config.detections.clone()) {
                runner.load_frames(&path)?
            } else if let Some(generator) = config.synthetic.clone() {
                let generator = FrameGeneratorConfig {
                    seed: seed.unwrap_or(generator.seed),
                    ..generator
                };
                runner.synthetic_frames(&generator)?
            } else {
                anyhow::bail!("no detections file or synthetic section configured");
            };

            let metrics = runner
                .write_frames(&frames, &results_file)
                .context("writing detection report")?;
            println!(
                "Report {} -> frames {}, lines {}, skipped {}, failed frames {}",
                results_file.display(),
                metrics.frames,
                metrics.lines_written,
                metrics.rows_skipped,
                metrics.frame_errors
            );
        }
    }

    Ok(())
}

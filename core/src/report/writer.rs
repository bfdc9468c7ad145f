use crate::prelude::{MapError, MapResult};
use crate::report::classes::{ClassConfigCache, ClassTable};
use crate::report::detection::{rows_from_tensor, DetectionRow};
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::{MetricsSnapshot, ReportMetrics};
use ndarray::ArrayView2;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends one frame of detections to the report at `output_path`.
///
/// The file is created if needed and never truncated. Placeholder rows are
/// skipped. An unknown class id aborts the call; lines appended before it
/// stay in the file. Rows with non-finite bins abort the same way. Returns the number of lines written.
pub fn write_frame_detections<P: AsRef<Path>>(
    rows: &[DetectionRow],
    output_path: P,
    frame_id: i64,
    classes: &ClassTable,
) -> MapResult<usize> {
    let path = output_path.as_ref();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| MapError::io(path, err))?;
    let mut writer = BufWriter::new(file);

    let outcome = append_rows(&mut writer, path, rows, frame_id, classes);
    let flushed = writer.flush();
    let written = outcome?;
    flushed.map_err(|err| MapError::io(path, err))?;
    Ok(written)
}

fn append_rows<W: Write>(
    writer: &mut W,
    path: &Path,
    rows: &[DetectionRow],
    frame_id: i64,
    classes: &ClassTable,
) -> MapResult<usize> {
    let mut written = 0;
    for row in rows.iter().filter(|row| !row.is_placeholder()) {
        row.check_bins()?;
        let class_name = classes.resolve(row.class_id)?;
        writer
            .write_all(row.report_line(frame_id, class_name).as_bytes())
            .map_err(|err| MapError::io(path, err))?;
        written += 1;
    }
    Ok(written)
}

/// Writes consecutive frames to one report, re-reading the class config
/// only when it changes on disk.
pub struct DetectionWriter {
    output: PathBuf,
    classes: ClassConfigCache,
    metrics: ReportMetrics,
    logger: LogManager,
}

impl DetectionWriter {
    pub fn new(output: impl Into<PathBuf>, class_config: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            classes: ClassConfigCache::new(class_config),
            metrics: ReportMetrics::new(),
            logger: LogManager::new("report"),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output
    }

    /// Writes a `max_dets x 4` detection tensor as frame `frame_id`.
    pub fn write_frame(&mut self, frame_id: i64, tensor: ArrayView2<f64>) -> MapResult<usize> {
        let rows = match rows_from_tensor(tensor) {
            Ok(rows) => rows,
            Err(err) => {
                self.metrics.record_error();
                self.logger.warn(&format!("frame {}: {}", frame_id, err));
                return Err(err);
            }
        };
        self.write_rows(frame_id, &rows)
    }

    pub fn write_rows(&mut self, frame_id: i64, rows: &[DetectionRow]) -> MapResult<usize> {
        let result = self
            .classes
            .table()
            .and_then(|table| write_frame_detections(rows, &self.output, frame_id, table));

        match result {
            Ok(written) => {
                let skipped = rows.len() - written;
                self.metrics.record_frame(written, skipped);
                self.logger.record(&format!(
                    "frame {} -> {} lines, {} skipped",
                    frame_id, written, skipped
                ));
                Ok(written)
            }
            Err(err) => {
                self.metrics.record_error();
                self.logger.warn(&format!("frame {}: {}", frame_id, err));
                Err(err)
            }
        }
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::fs;
    use tempfile::tempdir;

    fn scenario_rows() -> Vec<DetectionRow> {
        vec![
            DetectionRow::new(-1, 0.0, 0.0, 0.0),
            DetectionRow::new(2, 10.0, 20.0, 0.8765),
            DetectionRow::new(-1000, 5.0, 5.0, 0.5),
        ]
    }

    #[test]
    fn frame_lines_skip_placeholders() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("results.txt");
        let classes = ClassTable::new(["car", "ped", "cyclist"]);

        let written = write_frame_detections(&scenario_rows(), &output, 3, &classes).unwrap();
        assert_eq!(written, 2);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "3 cyclist 10 20 0.8765\n3 __background 5 5 0.5000\n"
        );
    }

    #[test]
    fn repeated_writes_append() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("results.txt");
        let classes = ClassTable::new(["car", "ped", "cyclist"]);

        write_frame_detections(&scenario_rows(), &output, 3, &classes).unwrap();
        write_frame_detections(&scenario_rows(), &output, 3, &classes).unwrap();
        let contents = fs::read_to_string(&output).unwrap();
        assert_eq!(contents.lines().count(), 4);
        assert_eq!(
            contents,
            "3 cyclist 10 20 0.8765\n3 __background 5 5 0.5000\n".repeat(2)
        );
    }

    #[test]
    fn invalid_class_aborts_but_keeps_earlier_lines() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("results.txt");
        fs::write(&output, "0 car 1 1 0.1000\n").unwrap();
        let classes = ClassTable::new(["car"]);
        let rows = vec![
            DetectionRow::new(0, 4.0, 8.0, 0.25),
            DetectionRow::new(7, 1.0, 1.0, 0.9),
            DetectionRow::new(0, 2.0, 2.0, 0.75),
        ];

        let err = write_frame_detections(&rows, &output, 1, &classes).unwrap_err();
        assert!(matches!(err, MapError::InvalidClass(7)));
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "0 car 1 1 0.1000\n1 car 4 8 0.2500\n"
        );
    }

    #[test]
    fn non_finite_bins_abort_the_frame() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("results.txt");
        let classes = ClassTable::new(["car"]);
        let rows = vec![
            DetectionRow::new(0, 4.0, 8.0, 0.25),
            DetectionRow::new(0, f64::NAN, f64::INFINITY, 0.5),
        ];

        let err = write_frame_detections(&rows, &output, 0, &classes).unwrap_err();
        assert!(matches!(err, MapError::MalformedTensor(_)));
        assert_eq!(fs::read_to_string(&output).unwrap(), "0 car 4 8 0.2500\n");
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("missing").join("results.txt");
        let classes = ClassTable::new(["car"]);
        assert!(matches!(
            write_frame_detections(&scenario_rows(), &output, 0, &classes),
            Err(MapError::Io { .. })
        ));
    }

    #[test]
    fn writer_streams_frames_in_order() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("results.txt");
        let class_config = dir.path().join("object_config.json");
        fs::write(&class_config, r#"{"classes": ["car", "ped", "cyclist"]}"#).unwrap();

        let mut writer = DetectionWriter::new(&output, &class_config);
        let frame = array![[-1.0, 0.0, 0.0, 0.0], [1.0, 3.0, 4.0, 0.66666]];
        for frame_id in 0..3 {
            writer.write_frame(frame_id, frame.view()).unwrap();
        }

        let contents = fs::read_to_string(writer.output_path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines, vec!["0 ped 3 4 0.6667", "1 ped 3 4 0.6667", "2 ped 3 4 0.6667"]);

        let metrics = writer.metrics();
        assert_eq!(metrics.frames, 3);
        assert_eq!(metrics.lines_written, 3);
        assert_eq!(metrics.rows_skipped, 3);
    }

    #[test]
    fn writer_counts_failed_frames() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("results.txt");
        let mut writer = DetectionWriter::new(&output, dir.path().join("absent.json"));
        let frame = array![[0.0, 1.0, 1.0, 0.5]];

        assert!(writer.write_frame(0, frame.view()).is_err());
        assert_eq!(writer.metrics().frame_errors, 1);
        assert!(!output.exists());
    }
}

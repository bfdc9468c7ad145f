use crate::prelude::{MapError, MapResult};
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

/// Class id marking an unused detection slot.
pub const NO_DETECTION_CLASS_ID: i64 = -1;

/// Number of columns in a detection tensor: class id, row, column, confidence.
pub const DETECTION_COLUMNS: usize = 4;

/// One row of a per-frame detection table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionRow {
    pub class_id: i64,
    pub row_bin: f64,
    pub col_bin: f64,
    pub confidence: f64,
}

impl DetectionRow {
    pub fn new(class_id: i64, row_bin: f64, col_bin: f64, confidence: f64) -> Self {
        Self {
            class_id,
            row_bin,
            col_bin,
            confidence,
        }
    }

    /// Placeholder slots carry no detection and are never reported.
    pub fn is_placeholder(&self) -> bool {
        self.class_id == NO_DETECTION_CLASS_ID
    }

    /// Bins must be finite to print as integers.
    pub fn check_bins(&self) -> MapResult<()> {
        if self.row_bin.is_finite() && self.col_bin.is_finite() {
            Ok(())
        } else {
            Err(MapError::MalformedTensor(format!(
                "class {} has non-finite bins ({}, {})",
                self.class_id, self.row_bin, self.col_bin
            )))
        }
    }

    /// Formats the report line for this row; bins print as truncated integers.
    pub fn report_line(&self, frame_id: i64, class_name: &str) -> String {
        format!(
            "{} {} {} {} {:.4}\n",
            frame_id,
            class_name,
            self.row_bin as i64,
            self.col_bin as i64,
            self.confidence
        )
    }
}

/// Splits a `max_dets x 4` detection tensor into rows, in table order.
pub fn rows_from_tensor(tensor: ArrayView2<f64>) -> MapResult<Vec<DetectionRow>> {
    if tensor.ncols() != DETECTION_COLUMNS {
        return Err(MapError::MalformedTensor(format!(
            "expected {} columns, got {}",
            DETECTION_COLUMNS,
            tensor.ncols()
        )));
    }

    tensor
        .rows()
        .into_iter()
        .enumerate()
        .map(|(idx, row)| {
            if !row[0].is_finite() {
                return Err(MapError::MalformedTensor(format!(
                    "row {} has non-finite class id {}",
                    idx, row[0]
                )));
            }
            let detection = DetectionRow::new(row[0] as i64, row[1], row[2], row[3]);
            if !detection.is_placeholder() && !(row[1].is_finite() && row[2].is_finite()) {
                return Err(MapError::MalformedTensor(format!(
                    "row {} has non-finite bins ({}, {})",
                    idx, row[1], row[2]
                )));
            }
            Ok(detection)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn tensor_rows_keep_table_order() {
        let tensor = array![
            [-1.0, 0.0, 0.0, 0.0],
            [2.0, 10.0, 20.0, 0.8765],
            [-1000.0, 5.0, 5.0, 0.5]
        ];
        let rows = rows_from_tensor(tensor.view()).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_placeholder());
        assert_eq!(rows[1], DetectionRow::new(2, 10.0, 20.0, 0.8765));
        assert_eq!(rows[2].class_id, -1000);
    }

    #[test]
    fn wrong_column_count_is_rejected() {
        let tensor = Array2::<f64>::zeros((3, 5));
        assert!(matches!(
            rows_from_tensor(tensor.view()),
            Err(MapError::MalformedTensor(_))
        ));
    }

    #[test]
    fn nan_class_id_is_rejected() {
        let tensor = array![[f64::NAN, 1.0, 1.0, 0.3]];
        assert!(rows_from_tensor(tensor.view()).is_err());
    }

    #[test]
    fn non_finite_bins_are_rejected() {
        let tensor = array![[0.0, f64::NAN, 1.0, 0.3]];
        assert!(matches!(
            rows_from_tensor(tensor.view()),
            Err(MapError::MalformedTensor(_))
        ));
        let tensor = array![[0.0, 1.0, f64::INFINITY, 0.3]];
        assert!(rows_from_tensor(tensor.view()).is_err());
        assert!(DetectionRow::new(0, 1.0, f64::NEG_INFINITY, 0.3)
            .check_bins()
            .is_err());
    }

    #[test]
    fn placeholder_rows_may_carry_nan_bins() {
        let tensor = array![[-1.0, f64::NAN, f64::NAN, 0.0], [1.0, 2.0, 3.0, 0.4]];
        let rows = rows_from_tensor(tensor.view()).unwrap();
        assert!(rows[0].is_placeholder());
        assert_eq!(rows[1].class_id, 1);
    }

    #[test]
    fn report_line_truncates_bins() {
        let row = DetectionRow::new(0, 10.9, 20.2, 0.5);
        assert_eq!(row.report_line(7, "car"), "7 car 10 20 0.5000\n");
    }
}

pub mod classes;
pub mod detection;
pub mod writer;

pub use classes::{resolve_class_name, ClassConfigCache, ClassTable, BACKGROUND_CLASS};
pub use detection::{rows_from_tensor, DetectionRow};
pub use writer::{write_frame_detections, DetectionWriter};

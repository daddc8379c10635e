//! Formatting helpers mapping session data to display strings.

use crate::backend::Shape;
use crate::dataset::DatasetPreview;

/// Accuracy fraction rendered as a percentage, e.g. `0.87` -> `"87.00%"`.
pub fn format_accuracy(accuracy: f64) -> String {
    format!("{:.2}%", accuracy * 100.0)
}

/// Status line for a completed split.
pub fn split_status(train_shape: &Shape, test_shape: &Shape) -> String {
    format!("Split done — Train {train_shape}, Test {test_shape}")
}

/// Status line for a locally parsed preview.
pub fn local_preview_status(rows: usize) -> String {
    format!("Preview loaded (local) {rows} rows")
}

/// Caption above the preview table, including the backend-reported shape
/// when known.
pub fn preview_caption(preview: &DatasetPreview) -> String {
    match preview.shape {
        Some((rows, cols)) => format!("Preview ({rows}x{cols})"),
        None => "Preview".to_string(),
    }
}

/// Label for the test-ratio slider, shown as a percentage.
pub fn ratio_percent_label(ratio: f32) -> String {
    format!("Test ratio: {}%", (ratio * 100.0).round() as i32)
}

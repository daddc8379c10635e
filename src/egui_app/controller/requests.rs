//! Launching backend requests, with local validation up front.

use std::path::Path;

use crate::backend::PreprocessMethod;
use crate::dataset;

use super::{StatusTone, StudioController};

impl StudioController {
    /// Pick a CSV via the native file dialog and upload it.
    pub fn upload_via_dialog(&mut self) {
        if let Some(path) = csv_dialog().pick_file() {
            self.upload_dataset(&path);
        }
    }

    /// Pick a CSV via the native file dialog and preview it locally.
    pub fn local_preview_via_dialog(&mut self) {
        if let Some(path) = csv_dialog().pick_file() {
            self.load_local_preview(&path);
        }
    }

    /// Read a dataset file and send it to the backend.
    pub fn upload_dataset(&mut self, path: &Path) {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "could not read dataset file");
                self.set_status("Upload error", StatusTone::Error);
                return;
            }
        };
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dataset.csv".to_string());
        self.set_status("Uploading...", StatusTone::Busy);
        self.jobs.begin_upload(self.base_url.clone(), file_name, bytes);
    }

    /// Parse a dataset file locally, never contacting the backend.
    pub fn load_local_preview(&mut self, path: &Path) {
        match std::fs::read_to_string(path) {
            Ok(text) => self.apply_local_preview(dataset::parse_csv(&text)),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "could not read dataset file");
                self.set_status("Upload error", StatusTone::Error);
            }
        }
    }

    /// Validate and launch `/preprocess`.
    pub fn run_preprocess(&mut self) {
        let session = &self.ui.session;
        if session.target_col.is_empty() {
            self.set_status("Please select target column first", StatusTone::Warning);
            return;
        }
        let method = if session.standardize {
            PreprocessMethod::Standardize
        } else if session.normalize {
            PreprocessMethod::Normalize
        } else {
            self.set_status("Select a preprocessing method", StatusTone::Warning);
            return;
        };
        let target_col = session.target_col.clone();
        self.set_status("Preprocessing...", StatusTone::Busy);
        self.jobs
            .begin_preprocess(self.base_url.clone(), target_col, method);
    }

    /// Validate and launch `/split`.
    pub fn run_split(&mut self) {
        let session = &self.ui.session;
        if session.target_col.is_empty() {
            self.set_status("Please select target column first", StatusTone::Warning);
            return;
        }
        let target_col = session.target_col.clone();
        let test_size = session.test_ratio;
        self.set_status("Splitting dataset...", StatusTone::Busy);
        self.jobs
            .begin_split(self.base_url.clone(), target_col, test_size);
    }

    /// Validate and launch `/train`.
    pub fn run_train(&mut self) {
        let session = &self.ui.session;
        if session.target_col.is_empty() {
            self.set_status("Please select target column first", StatusTone::Warning);
            return;
        }
        let target_col = session.target_col.clone();
        let model = session.model;
        self.set_status("Training model...", StatusTone::Busy);
        self.jobs.begin_train(self.base_url.clone(), target_col, model);
    }
}

fn csv_dialog() -> rfd::FileDialog {
    rfd::FileDialog::new().add_filter("CSV", &["csv"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn controller() -> StudioController {
        StudioController::new(&AppConfig::default())
    }

    #[test]
    fn preprocess_requires_a_target_column() {
        let mut controller = controller();
        controller.choose_standardize();
        controller.run_preprocess();
        assert_eq!(controller.ui.status.text, "Please select target column first");
        assert_eq!(controller.pending_requests(), 0);
    }

    #[test]
    fn preprocess_requires_a_method() {
        let mut controller = controller();
        controller.ui.session.all_columns = vec!["label".into()];
        controller.set_target_column("label");
        controller.run_preprocess();
        assert_eq!(controller.ui.status.text, "Select a preprocessing method");
        assert_eq!(controller.pending_requests(), 0);
    }

    #[test]
    fn split_and_train_require_a_target_column() {
        let mut controller = controller();
        controller.run_split();
        assert_eq!(controller.ui.status.text, "Please select target column first");
        controller.run_train();
        assert_eq!(controller.ui.status.text, "Please select target column first");
        assert_eq!(controller.pending_requests(), 0);
    }

    #[test]
    fn unreadable_upload_path_reports_upload_error() {
        let mut controller = controller();
        controller.upload_dataset(Path::new("/definitely/not/here.csv"));
        assert_eq!(controller.ui.status.text, "Upload error");
        assert_eq!(controller.pending_requests(), 0);
    }
}

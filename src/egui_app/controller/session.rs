//! Local session edits: selections that never touch the network.

use crate::backend::ModelKind;
use crate::dataset::DatasetPreview;
use crate::egui_app::view_model;

use super::{StatusTone, StudioController};

impl StudioController {
    /// Select the target column. Values outside the current column list are
    /// treated as clearing the selection.
    pub fn set_target_column(&mut self, column: &str) {
        let session = &mut self.ui.session;
        if column.is_empty() || session.all_columns.iter().any(|c| c == column) {
            session.target_col = column.to_string();
        } else {
            session.target_col.clear();
        }
    }

    /// Toggle z-score standardization, dropping normalization if set.
    pub fn choose_standardize(&mut self) {
        let session = &mut self.ui.session;
        session.standardize = !session.standardize;
        if session.standardize {
            session.normalize = false;
        }
    }

    /// Toggle min-max normalization, dropping standardization if set.
    pub fn choose_normalize(&mut self) {
        let session = &mut self.ui.session;
        session.normalize = !session.normalize;
        if session.normalize {
            session.standardize = false;
        }
    }

    /// Set the test partition fraction, clamped to the supported range.
    pub fn set_test_ratio(&mut self, ratio: f32) {
        self.ui.session.test_ratio = ratio.clamp(0.1, 0.5);
    }

    /// Pick the model to train.
    pub fn set_model(&mut self, model: ModelKind) {
        self.ui.session.model = model;
    }

    /// Open the model picker window.
    pub fn open_model_panel(&mut self) {
        self.ui.model_panel_open = true;
    }

    /// Close the picker and announce the chosen model.
    pub fn confirm_model_selection(&mut self) {
        self.ui.model_panel_open = false;
        let text = format!("Model selected: {}", self.ui.session.model.wire_name());
        self.set_status(text, StatusTone::Info);
    }

    /// Install a locally parsed preview without contacting the backend.
    pub fn apply_local_preview(&mut self, preview: DatasetPreview) {
        let rows = preview.rows.len();
        let session = &mut self.ui.session;
        session.all_columns = preview.headers.clone();
        if !session.target_col.is_empty() && !session.all_columns.contains(&session.target_col) {
            session.target_col.clear();
        }
        session.preview = Some(preview);
        self.set_status(view_model::local_preview_status(rows), StatusTone::Info);
    }
}

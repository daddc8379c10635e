//! Draining worker results into session state.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::backend::{BackendError, TrainOutcome, UploadOutcome};
use crate::egui_app::view_model;

use super::jobs::JobMessage;
use super::{StatusTone, StudioController};

impl StudioController {
    /// Drain every finished worker result. Called once per frame, before
    /// rendering, so state observed by the UI is settled.
    pub fn poll_background_jobs(&mut self) {
        while let Some(message) = self.jobs.try_recv_message() {
            self.jobs.note_finished();
            match message {
                JobMessage::Uploaded(Ok(outcome)) => apply_upload_outcome(self, outcome),
                JobMessage::Uploaded(Err(err)) => {
                    self.surface_backend_error(err, "Upload failed", "Upload error");
                }
                JobMessage::Preprocessed(Ok(())) => {
                    self.set_status("Preprocessing done", StatusTone::Info);
                }
                JobMessage::Preprocessed(Err(err)) => {
                    self.surface_backend_error(err, "Preprocess failed", "Preprocess error");
                }
                JobMessage::SplitDone(Ok(outcome)) => {
                    let text = view_model::split_status(&outcome.train_shape, &outcome.test_shape);
                    self.set_status(text, StatusTone::Info);
                }
                JobMessage::SplitDone(Err(err)) => {
                    self.surface_backend_error(err, "Split failed", "Split error");
                }
                JobMessage::Trained(Ok(outcome)) => apply_train_outcome(self, outcome),
                JobMessage::Trained(Err(err)) => {
                    self.surface_backend_error(err, "Training failed", "Train error");
                }
            }
        }
    }

    /// Map a failed call to its status line. Server-reported text is shown
    /// verbatim; transport and decode details go to the log only.
    fn surface_backend_error(&mut self, err: BackendError, failed_msg: &str, errored_msg: &str) {
        match err {
            BackendError::Server(message) => self.set_status(message, StatusTone::Error),
            BackendError::Status(code) => {
                tracing::warn!(code, "{failed_msg}");
                self.set_status(failed_msg, StatusTone::Error);
            }
            BackendError::Transport(detail) | BackendError::Json(detail) => {
                tracing::warn!(%detail, "{errored_msg}");
                self.set_status(errored_msg, StatusTone::Error);
            }
        }
    }
}

/// Merge a successful upload: preview and column list replaced together so
/// the selector never renders against a stale preview.
pub fn apply_upload_outcome(controller: &mut StudioController, mut outcome: UploadOutcome) {
    outcome.preview.sanitize();
    let session = &mut controller.ui.session;
    session.dataset_id = outcome.dataset_id;
    session.all_columns = outcome.preview.headers.clone();
    if !session.target_col.is_empty() && !session.all_columns.contains(&session.target_col) {
        session.target_col.clear();
    }
    session.preview = Some(outcome.preview);
    controller.set_status("Uploaded to backend", StatusTone::Info);
}

/// Merge a successful training run: accuracy plus the confusion chart.
///
/// The PNG is decoded here, off the render path, into a [`egui::ColorImage`]
/// the UI can upload as a texture. A payload that fails to decode keeps the
/// base64 text around and logs the reason. The revision is bumped on every
/// run, including decode failures, so the renderer drops any texture from an
/// earlier run instead of showing it next to the new accuracy.
pub fn apply_train_outcome(controller: &mut StudioController, outcome: TrainOutcome) {
    let session = &mut controller.ui.session;
    session.accuracy = Some(outcome.accuracy);
    session.confusion_revision = session.confusion_revision.wrapping_add(1);
    match decode_confusion_png(&outcome.confusion_png_base64) {
        Ok(image) => session.confusion_image = Some(image),
        Err(reason) => {
            tracing::warn!(%reason, "confusion matrix image did not decode");
            session.confusion_image = None;
        }
    }
    session.confusion_png_base64 = Some(outcome.confusion_png_base64);
    controller.set_status("Training complete", StatusTone::Info);
}

fn decode_confusion_png(encoded: &str) -> Result<egui::ColorImage, String> {
    let bytes = BASE64.decode(encoded).map_err(|err| err.to_string())?;
    let image = image::load_from_memory(&bytes).map_err(|err| err.to_string())?;
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, &rgba))
}

//! Controller owning session state and dispatching pipeline actions.
//!
//! All mutation of [`UiState`] happens here, on the UI thread. Remote calls
//! run on worker threads and report back through [`jobs::PipelineJobs`];
//! results are drained once per frame by `poll_background_jobs`.

mod background_jobs;
mod canvas;
mod jobs;
mod requests;
mod session;

use egui::Color32;

use crate::config::AppConfig;

use self::jobs::PipelineJobs;
use super::state::UiState;

pub use self::background_jobs::{apply_train_outcome, apply_upload_outcome};

/// Severity tone shown next to the status text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    /// Nothing in flight.
    Idle,
    /// A request is pending.
    Busy,
    /// A completed action or a hint.
    Info,
    /// Local validation stopped an action.
    Warning,
    /// A request failed.
    Error,
}

/// Badge label and color for a tone.
pub fn status_badge(tone: StatusTone) -> (&'static str, Color32) {
    match tone {
        StatusTone::Idle => ("Idle", Color32::from_rgb(42, 42, 42)),
        StatusTone::Busy => ("Busy", Color32::from_rgb(178, 132, 24)),
        StatusTone::Info => ("OK", Color32::from_rgb(46, 125, 50)),
        StatusTone::Warning => ("Warn", Color32::from_rgb(178, 132, 24)),
        StatusTone::Error => ("Error", Color32::from_rgb(162, 54, 54)),
    }
}

/// Owns all UI state and the worker-thread channel.
pub struct StudioController {
    /// State rendered by the egui layer.
    pub ui: UiState,
    jobs: PipelineJobs,
    base_url: String,
}

impl StudioController {
    /// Build a controller pointed at the configured backend.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            ui: UiState::default(),
            jobs: PipelineJobs::new(),
            base_url: config.api_base_url.clone(),
        }
    }

    /// Backend base URL the controller targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Number of worker requests still in flight.
    pub fn pending_requests(&self) -> usize {
        self.jobs.in_flight()
    }

    /// Replace the status line and badge.
    pub fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        let (label, color) = status_badge(tone);
        self.ui.status.text = text.into();
        self.ui.status.badge_label = label.to_string();
        self.ui.status.badge_color = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> StudioController {
        StudioController::new(&AppConfig::default())
    }

    #[test]
    fn starts_ready_with_no_pending_requests() {
        let controller = controller();
        assert_eq!(controller.ui.status.text, "Ready");
        assert_eq!(controller.pending_requests(), 0);
    }

    #[test]
    fn set_status_updates_badge_with_tone() {
        let mut controller = controller();
        controller.set_status("Training model...", StatusTone::Busy);
        assert_eq!(controller.ui.status.text, "Training model...");
        assert_eq!(controller.ui.status.badge_label, "Busy");
    }
}

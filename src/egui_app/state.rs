//! Shared state types for the egui UI.

use egui::Color32;

use crate::backend::ModelKind;
use crate::dataset::DatasetPreview;
use crate::pipeline_graph::{NodeKind, PipelineGraph};

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Default)]
pub struct UiState {
    /// Status badge and text shown in the footer.
    pub status: StatusBarState,
    /// All user selections and last-known results for this session.
    pub session: SessionState,
    /// Canvas graph plus in-progress interactions.
    pub canvas: CanvasState,
    /// Whether the model picker window is open.
    pub model_panel_open: bool,
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl Default for StatusBarState {
    fn default() -> Self {
        Self {
            text: "Ready".into(),
            badge_label: "Idle".into(),
            badge_color: Color32::from_rgb(42, 42, 42),
        }
    }
}

/// The single source of truth for the current pipeline session.
///
/// Created with defaults at startup, mutated by every control and every
/// backend response, gone when the app exits.
#[derive(Clone)]
pub struct SessionState {
    /// Identifier of the dataset held by the backend, once uploaded.
    pub dataset_id: Option<String>,
    /// Last known dataset preview (local fallback or backend-held).
    pub preview: Option<DatasetPreview>,
    /// Columns offered by the target selector. Replaced together with
    /// `preview` so the pair never renders mismatched.
    pub all_columns: Vec<String>,
    /// Selected target column; empty when unset.
    pub target_col: String,
    /// Z-score standardization selected. Exclusive with `normalize`.
    pub standardize: bool,
    /// Min-max normalization selected. Exclusive with `standardize`.
    pub normalize: bool,
    /// Test partition fraction, kept within [0.1, 0.5].
    pub test_ratio: f32,
    /// Model chosen for training.
    pub model: ModelKind,
    /// Last training accuracy, as a fraction.
    pub accuracy: Option<f64>,
    /// Last confusion-matrix chart, base64-encoded PNG as received.
    pub confusion_png_base64: Option<String>,
    /// Decoded confusion-matrix pixels ready for a texture upload.
    pub confusion_image: Option<egui::ColorImage>,
    /// Bumped whenever `confusion_image` changes so the renderer knows to
    /// refresh its texture.
    pub confusion_revision: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            dataset_id: None,
            preview: None,
            all_columns: Vec::new(),
            target_col: String::new(),
            standardize: false,
            normalize: false,
            test_ratio: 0.3,
            model: ModelKind::Logistic,
            accuracy: None,
            confusion_png_base64: None,
            confusion_image: None,
            confusion_revision: 0,
        }
    }
}

/// Canvas state: the decorative graph plus transient interactions.
#[derive(Clone, Debug, Default)]
pub struct CanvasState {
    /// Node/edge catalog being displayed.
    pub graph: PipelineGraph,
    /// Source node of a connection drag in progress.
    pub pending_connection: Option<NodeKind>,
}

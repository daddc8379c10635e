//! egui application: state, controller and renderer.
/// Controller bridging the pipeline backend to the UI.
pub mod controller;
/// Shared state types for the egui UI.
pub mod state;
/// egui renderer for the application UI.
pub mod ui;
/// Formatting helpers mapping session data to display strings.
pub mod view_model;

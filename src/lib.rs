//! Library exports for reuse in integration tests.
/// Application directory helpers.
pub mod app_dirs;
/// Remote pipeline backend client.
pub mod backend;
/// Application configuration.
pub mod config;
/// Dataset preview model and the local CSV fallback parser.
pub mod dataset;
/// Shared egui UI modules.
pub mod egui_app;
/// Shared HTTP client configuration.
pub mod http_client;
/// Logging setup.
pub mod logging;
/// Decorative pipeline graph shown on the canvas.
pub mod pipeline_graph;

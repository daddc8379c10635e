#![deny(missing_docs)]
#![deny(warnings)]

//! Entry point for the egui-based ML Studio UI.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use eframe::egui;
use mlstudio::config;
use mlstudio::egui_app::controller::StudioController;
use mlstudio::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use mlstudio::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let config = match config::load_or_default() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(%err, "config unreadable, falling back to defaults");
            config::AppConfig::default()
        }
    };
    tracing::info!(base_url = %config.api_base_url, "starting ML Studio");

    let viewport = egui::ViewportBuilder::default()
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size(MIN_VIEWPORT_SIZE);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "ML Studio",
        native_options,
        Box::new(move |_cc| Ok(Box::new(EguiApp::new(StudioController::new(&config))))),
    )?;
    Ok(())
}

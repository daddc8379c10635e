//! egui renderer for the application UI.

mod canvas;
mod inspector;
mod style;

use eframe::egui::{self, Frame, Margin, RichText, StrokeKind};

use super::controller::StudioController;

/// Minimum window size the layout was designed for.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(1100.0, 640.0);

/// Top-level eframe application.
pub struct EguiApp {
    controller: StudioController,
    visuals_set: bool,
    confusion_tex: Option<egui::TextureHandle>,
    confusion_tex_revision: u64,
}

impl EguiApp {
    /// Wrap a controller for rendering.
    pub fn new(controller: StudioController) -> Self {
        Self {
            controller,
            visuals_set: false,
            confusion_tex: None,
            confusion_tex_revision: 0,
        }
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("top_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .stroke(style::section_stroke())
                    .inner_margin(Margin::symmetric(8, 6)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("ML Studio")
                            .color(palette.accent)
                            .strong(),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(&self.controller.ui.status.text)
                                .color(palette.text_muted),
                        );
                    });
                });
            });
    }

    fn render_sidebar(&mut self, ctx: &egui::Context) {
        use super::controller::StatusTone;
        let palette = style::palette();
        egui::SidePanel::left("sidebar")
            .resizable(false)
            .default_width(170.0)
            .frame(
                Frame::new()
                    .fill(palette.bg_secondary)
                    .inner_margin(Margin::symmetric(10, 10)),
            )
            .show(ctx, |ui| {
                ui.label(RichText::new("Pipeline").color(palette.text_muted));
                ui.add_space(6.0);
                if ui.button("Upload Dataset").clicked() {
                    self.controller.upload_via_dialog();
                }
                if ui.button("Preprocess").clicked() {
                    self.controller
                        .set_status("Configure preprocessing on right panel", StatusTone::Info);
                }
                if ui.button("Split").clicked() {
                    self.controller
                        .set_status("Split controls below", StatusTone::Info);
                }
                if ui.button("Model").clicked() {
                    self.controller.open_model_panel();
                }
                if ui.button("Results").clicked() {
                    self.controller
                        .set_status("See results on right", StatusTone::Info);
                }
            });
    }

    fn render_model_panel(&mut self, ctx: &egui::Context) {
        use crate::backend::ModelKind;
        if !self.controller.ui.model_panel_open {
            return;
        }
        let mut open = true;
        egui::Window::new("Select Model")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                for model in [ModelKind::Logistic, ModelKind::Tree] {
                    if ui
                        .radio(self.controller.ui.session.model == model, model.label())
                        .clicked()
                    {
                        self.controller.set_model(model);
                    }
                }
                ui.add_space(8.0);
                if ui.button("Use this model").clicked() {
                    self.controller.confirm_model_selection();
                }
            });
        if !open {
            self.controller.ui.model_panel_open = false;
        }
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .stroke(style::section_stroke())
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                let status = self.controller.ui.status.clone();
                ui.horizontal(|ui| {
                    ui.add_space(6.0);
                    let (badge_rect, _) =
                        ui.allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::hover());
                    ui.painter().rect_filled(badge_rect, 0.0, status.badge_color);
                    ui.painter().rect_stroke(
                        badge_rect,
                        0.0,
                        style::inner_border(),
                        StrokeKind::Inside,
                    );
                    ui.add_space(8.0);
                    ui.label(RichText::new(&status.badge_label).color(palette.text_primary));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(palette.text_primary));
                });
            });
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.visuals_set {
            let mut visuals = egui::Visuals::dark();
            style::apply_visuals(&mut visuals);
            ctx.set_visuals(visuals);
            self.visuals_set = true;
        }
        self.controller.poll_background_jobs();
        self.render_top_bar(ctx);
        self.render_sidebar(ctx);
        inspector::render(self, ctx);
        egui::CentralPanel::default()
            .frame(Frame::new().fill(style::palette().bg_primary))
            .show(ctx, |ui| {
                canvas::render(&mut self.controller, ui);
            });
        self.render_model_panel(ctx);
        self.render_status(ctx);
        // Worker results arrive between frames; keep polling for them.
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

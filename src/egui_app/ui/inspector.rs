//! Right-hand inspector: pipeline controls, results, and the preview table.

use eframe::egui::{self, Frame, Margin, RichText, SliderClamping};

use crate::backend::ModelKind;
use crate::egui_app::view_model;

use super::{EguiApp, style};

pub(super) fn render(app: &mut EguiApp, ctx: &egui::Context) {
    let palette = style::palette();
    egui::SidePanel::right("inspector")
        .resizable(true)
        .default_width(340.0)
        .frame(
            Frame::new()
                .fill(palette.bg_secondary)
                .inner_margin(Margin::symmetric(10, 10)),
        )
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("inspector_scroll")
                .show(ui, |ui| {
                    target_section(app, ui);
                    ui.separator();
                    preprocess_section(app, ui);
                    ui.separator();
                    split_section(app, ui);
                    ui.separator();
                    train_section(app, ui);
                    ui.separator();
                    results_section(app, ui);
                    ui.separator();
                    preview_section(app, ui);
                });
        });
}

fn target_section(app: &mut EguiApp, ui: &mut egui::Ui) {
    let palette = style::palette();
    ui.label(RichText::new("Target column").color(palette.text_muted));
    let columns = app.controller.ui.session.all_columns.clone();
    if columns.is_empty() {
        ui.add_enabled_ui(false, |ui| {
            egui::ComboBox::from_id_salt("target_col")
                .selected_text("No columns")
                .show_ui(ui, |_ui| {});
        });
        return;
    }
    let current = app.controller.ui.session.target_col.clone();
    let selected_text = if current.is_empty() {
        "-- select target column --".to_string()
    } else {
        current.clone()
    };
    let mut picked = None;
    egui::ComboBox::from_id_salt("target_col")
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            for column in &columns {
                if ui.selectable_label(*column == current, column).clicked() {
                    picked = Some(column.clone());
                }
            }
        });
    if let Some(column) = picked {
        app.controller.set_target_column(&column);
    }
}

fn preprocess_section(app: &mut EguiApp, ui: &mut egui::Ui) {
    let palette = style::palette();
    ui.label(RichText::new("Preprocessing").color(palette.text_muted));
    let session = &app.controller.ui.session;
    let (standardize, normalize) = (session.standardize, session.normalize);
    if ui.radio(standardize, "Standardize (Z-score)").clicked() {
        app.controller.choose_standardize();
    }
    if ui.radio(normalize, "Normalize (MinMax)").clicked() {
        app.controller.choose_normalize();
    }
    if ui.button("Apply Preprocessing").clicked() {
        app.controller.run_preprocess();
    }
}

fn split_section(app: &mut EguiApp, ui: &mut egui::Ui) {
    let palette = style::palette();
    ui.label(RichText::new("Train/test split").color(palette.text_muted));
    let mut ratio = app.controller.ui.session.test_ratio;
    let response = ui.add(
        egui::Slider::new(&mut ratio, 0.1..=0.5)
            .step_by(0.05)
            .clamping(SliderClamping::Always)
            .show_value(false),
    );
    if response.changed() {
        app.controller.set_test_ratio(ratio);
    }
    ui.label(view_model::ratio_percent_label(
        app.controller.ui.session.test_ratio,
    ));
    if ui.button("Split Dataset").clicked() {
        app.controller.run_split();
    }
}

fn train_section(app: &mut EguiApp, ui: &mut egui::Ui) {
    let palette = style::palette();
    ui.label(RichText::new("Model").color(palette.text_muted));
    let current = app.controller.ui.session.model;
    let mut picked = None;
    egui::ComboBox::from_id_salt("model")
        .selected_text(current.label())
        .show_ui(ui, |ui| {
            for model in [ModelKind::Logistic, ModelKind::Tree] {
                if ui.selectable_label(current == model, model.label()).clicked() {
                    picked = Some(model);
                }
            }
        });
    if let Some(model) = picked {
        app.controller.set_model(model);
    }
    if ui.button("Train Model").clicked() {
        app.controller.run_train();
    }
}

fn results_section(app: &mut EguiApp, ui: &mut egui::Ui) {
    let palette = style::palette();
    ui.label(RichText::new("Results").color(palette.text_muted));
    let Some(accuracy) = app.controller.ui.session.accuracy else {
        ui.label(RichText::new("No training run yet").color(palette.text_muted));
        return;
    };
    ui.label(format!(
        "Accuracy: {}",
        view_model::format_accuracy(accuracy)
    ));
    refresh_confusion_texture(app, ui.ctx());
    if let Some(texture) = &app.confusion_tex {
        ui.add(egui::Image::new(texture).max_width(ui.available_width()));
    }
}

// Texture uploads are cached against the session revision so the image is
// only re-sent to the GPU when a new training run lands. A run without a
// decodable image clears the cached texture.
fn refresh_confusion_texture(app: &mut EguiApp, ctx: &egui::Context) {
    let session = &app.controller.ui.session;
    if app.confusion_tex_revision == session.confusion_revision {
        return;
    }
    app.confusion_tex = session.confusion_image.as_ref().map(|image| {
        ctx.load_texture(
            "confusion_matrix",
            image.clone(),
            egui::TextureOptions::LINEAR,
        )
    });
    app.confusion_tex_revision = session.confusion_revision;
}

fn preview_section(app: &mut EguiApp, ui: &mut egui::Ui) {
    let palette = style::palette();
    let Some(preview) = app.controller.ui.session.preview.clone() else {
        ui.label(RichText::new("No dataset preview").color(palette.text_muted));
        return;
    };
    ui.label(RichText::new(view_model::preview_caption(&preview)).color(palette.text_muted));
    egui::ScrollArea::horizontal()
        .id_salt("preview_table")
        .show(ui, |ui| {
            egui::Grid::new("preview_grid").striped(true).show(ui, |ui| {
                for header in &preview.headers {
                    ui.label(RichText::new(header).strong());
                }
                ui.end_row();
                for row in preview.display_rows() {
                    for header in &preview.headers {
                        ui.label(row.get(header).map(String::as_str).unwrap_or(""));
                    }
                    ui.end_row();
                }
            });
        });
}

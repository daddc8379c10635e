//! Dark palette and widget visuals for the studio shell.

use eframe::egui::{Color32, Stroke, Visuals};

#[derive(Clone, Copy)]
pub(super) struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub panel_outline: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent: Color32,
    pub node_fill: Color32,
    pub edge: Color32,
}

pub(super) fn palette() -> Palette {
    Palette {
        bg_primary: Color32::from_rgb(10, 10, 12),
        bg_secondary: Color32::from_rgb(26, 28, 30),
        panel_outline: Color32::from_rgb(38, 42, 48),
        text_primary: Color32::from_rgb(185, 192, 200),
        text_muted: Color32::from_rgb(140, 146, 155),
        accent: Color32::from_rgb(127, 255, 212),
        node_fill: Color32::from_rgb(42, 44, 48),
        edge: Color32::from_rgb(96, 102, 110),
    }
}

pub(super) fn section_stroke() -> Stroke {
    Stroke::new(1.0, palette().panel_outline)
}

pub(super) fn inner_border() -> Stroke {
    Stroke::new(1.0, palette().panel_outline)
}

pub(super) fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_primary;
    visuals.panel_fill = palette.bg_secondary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.extreme_bg_color = palette.bg_primary;
    visuals.faint_bg_color = palette.bg_secondary;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent);
}

//! Pipeline canvas: node boxes, ports, and edge wiring.

use eframe::egui::{self, Pos2, Rect, Sense, Stroke, StrokeKind, vec2};

use crate::egui_app::controller::StudioController;
use crate::pipeline_graph::NodeKind;

use super::style;

const NODE_SIZE: egui::Vec2 = vec2(170.0, 64.0);
const PORT_RADIUS: f32 = 5.0;
const EDGE_HIT_DISTANCE: f32 = 6.0;

pub(super) fn render(controller: &mut StudioController, ui: &mut egui::Ui) {
    let palette = style::palette();
    let origin = ui.max_rect().min.to_vec2();
    let node_kinds: Vec<NodeKind> = controller
        .ui
        .canvas
        .graph
        .nodes
        .iter()
        .map(|node| node.kind)
        .collect();

    draw_edges(controller, ui, origin);

    let mut hovered_node = None;
    for kind in node_kinds {
        let rect = node_rect(controller, kind, origin);
        let response = ui.interact(
            rect,
            ui.id().with(("node", kind)),
            Sense::click_and_drag(),
        );
        if response.dragged() {
            controller.drag_node(kind, response.drag_delta());
        }
        if response.clicked() && kind == NodeKind::Upload {
            controller.local_preview_via_dialog();
        }
        if response.hovered() {
            hovered_node = Some(kind);
        }
        draw_node(controller, ui, kind, origin);

        let port = output_port(rect);
        let port_response = ui.interact(
            Rect::from_center_size(port, vec2(PORT_RADIUS * 3.0, PORT_RADIUS * 3.0)),
            ui.id().with(("port", kind)),
            Sense::drag(),
        );
        if port_response.drag_started() {
            controller.begin_connection(kind);
        }
        let port_color = if controller.ui.canvas.pending_connection == Some(kind) {
            palette.accent
        } else {
            palette.edge
        };
        ui.painter().circle_filled(port, PORT_RADIUS, port_color);
        ui.painter()
            .circle_filled(input_port(rect), PORT_RADIUS, palette.edge);
    }

    finish_pending_connection(controller, ui, origin, hovered_node);
    handle_edge_clicks(controller, ui, origin, hovered_node);
}

fn node_rect(controller: &StudioController, kind: NodeKind, origin: egui::Vec2) -> Rect {
    let pos = controller
        .ui
        .canvas
        .graph
        .node(kind)
        .map(|node| node.pos)
        .unwrap_or_default();
    Rect::from_min_size(pos + origin, NODE_SIZE)
}

fn output_port(rect: Rect) -> Pos2 {
    rect.right_center()
}

fn input_port(rect: Rect) -> Pos2 {
    rect.left_center()
}

fn draw_node(controller: &StudioController, ui: &mut egui::Ui, kind: NodeKind, origin: egui::Vec2) {
    let palette = style::palette();
    let Some(node) = controller.ui.canvas.graph.node(kind) else {
        return;
    };
    let rect = Rect::from_min_size(node.pos + origin, NODE_SIZE);
    let painter = ui.painter();
    painter.rect_filled(rect, 4.0, palette.node_fill);
    painter.rect_stroke(rect, 4.0, style::section_stroke(), StrokeKind::Inside);
    painter.text(
        rect.min + vec2(10.0, 12.0),
        egui::Align2::LEFT_CENTER,
        node.label,
        egui::FontId::proportional(14.0),
        palette.text_primary,
    );
    painter.text(
        rect.min + vec2(10.0, 34.0),
        egui::Align2::LEFT_CENTER,
        node.subtitle,
        egui::FontId::proportional(11.0),
        palette.text_muted,
    );
}

fn draw_edges(controller: &StudioController, ui: &mut egui::Ui, origin: egui::Vec2) {
    let palette = style::palette();
    for edge in &controller.ui.canvas.graph.edges {
        let (Some(from), Some(to)) = (edge_endpoints(controller, edge, origin)) else {
            continue;
        };
        let color = if edge.animated {
            palette.accent
        } else {
            palette.edge
        };
        ui.painter().line_segment([from, to], Stroke::new(2.0, color));
    }
}

fn edge_endpoints(
    controller: &StudioController,
    edge: &crate::pipeline_graph::PipelineEdge,
    origin: egui::Vec2,
) -> (Option<Pos2>, Option<Pos2>) {
    let graph = &controller.ui.canvas.graph;
    let from = graph
        .node(edge.source)
        .map(|node| output_port(Rect::from_min_size(node.pos + origin, NODE_SIZE)));
    let to = graph
        .node(edge.target)
        .map(|node| input_port(Rect::from_min_size(node.pos + origin, NODE_SIZE)));
    (from, to)
}

fn finish_pending_connection(
    controller: &mut StudioController,
    ui: &egui::Ui,
    origin: egui::Vec2,
    hovered_node: Option<NodeKind>,
) {
    let Some(source) = controller.ui.canvas.pending_connection else {
        return;
    };
    if let Some(pointer) = ui.ctx().pointer_latest_pos() {
        let from = output_port(node_rect(controller, source, origin));
        ui.painter()
            .line_segment([from, pointer], Stroke::new(1.5, style::palette().accent));
    }
    if ui.input(|input| input.pointer.any_released()) {
        match hovered_node {
            Some(target) => controller.complete_connection(target),
            None => controller.cancel_connection(),
        }
    }
}

fn handle_edge_clicks(
    controller: &mut StudioController,
    ui: &egui::Ui,
    origin: egui::Vec2,
    hovered_node: Option<NodeKind>,
) {
    if hovered_node.is_some() {
        return;
    }
    let clicked = ui
        .input(|input| input.pointer.primary_clicked())
        .then(|| ui.ctx().pointer_latest_pos())
        .flatten();
    let Some(pointer) = clicked else {
        return;
    };
    let hit = controller
        .ui
        .canvas
        .graph
        .edges
        .iter()
        .enumerate()
        .find(|(_, edge)| {
            let (Some(from), Some(to)) = edge_endpoints(controller, edge, origin) else {
                return false;
            };
            distance_to_segment(pointer, from, to) <= EDGE_HIT_DISTANCE
        })
        .map(|(index, _)| index);
    if let Some(index) = hit {
        controller.remove_edge_at(index);
    }
}

/// Distance from a point to the segment `[a, b]`.
fn distance_to_segment(point: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let length_sq = ab.length_sq();
    if length_sq <= f32::EPSILON {
        return (point - a).length();
    }
    let t = ((point - a).dot(ab) / length_sq).clamp(0.0, 1.0);
    (point - (a + ab * t)).length()
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn segment_distance_handles_interior_and_endpoints() {
        let a = pos2(0.0, 0.0);
        let b = pos2(10.0, 0.0);
        assert_eq!(distance_to_segment(pos2(5.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_segment(pos2(-4.0, 0.0), a, b), 4.0);
        assert_eq!(distance_to_segment(pos2(13.0, 4.0), a, b), 5.0);
        assert_eq!(distance_to_segment(pos2(2.0, 2.0), a, a), pos2(2.0, 2.0).distance(a));
    }
}

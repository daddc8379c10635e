//! Canvas interactions routed through the controller.

use egui::Vec2;

use crate::pipeline_graph::NodeKind;

use super::StudioController;

impl StudioController {
    /// Move a node by a drag delta.
    pub fn drag_node(&mut self, kind: NodeKind, delta: Vec2) {
        self.ui.canvas.graph.drag_node(kind, delta);
    }

    /// Start dragging a connection from a node's output port.
    pub fn begin_connection(&mut self, source: NodeKind) {
        self.ui.canvas.pending_connection = Some(source);
    }

    /// Finish a connection drag over a node, if one is pending.
    pub fn complete_connection(&mut self, target: NodeKind) {
        if let Some(source) = self.ui.canvas.pending_connection.take() {
            self.ui.canvas.graph.connect(source, target);
        }
    }

    /// Drop a pending connection without wiring anything.
    pub fn cancel_connection(&mut self) {
        self.ui.canvas.pending_connection = None;
    }

    /// Remove the edge at `index`.
    pub fn remove_edge_at(&mut self, index: usize) {
        self.ui.canvas.graph.remove_edge(index);
    }
}

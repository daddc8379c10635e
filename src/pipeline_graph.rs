//! Decorative pipeline graph shown on the canvas.
//!
//! The graph illustrates the conceptual pipeline. Nodes can be rearranged and
//! edges rewired, but none of it drives the backend calls; execution order is
//! whatever the user triggers from the controls.

use egui::{Pos2, Vec2, pos2};

/// The five fixed pipeline stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Dataset upload entry point.
    Upload,
    /// Standardize / normalize stage.
    Preprocess,
    /// Train/test split stage.
    Split,
    /// Model selection and training stage.
    Model,
    /// Accuracy and chart display stage.
    Results,
}

/// A node on the canvas.
#[derive(Clone, Debug)]
pub struct PipelineNode {
    /// Stage this node represents; doubles as its identity.
    pub kind: NodeKind,
    /// Title shown on the node.
    pub label: &'static str,
    /// Secondary line shown under the title.
    pub subtitle: &'static str,
    /// Top-left position in canvas coordinates.
    pub pos: Pos2,
}

/// A directed edge between two nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineEdge {
    /// Node the edge leaves from.
    pub source: NodeKind,
    /// Node the edge points at.
    pub target: NodeKind,
    /// Drawn with the accent color when true.
    pub animated: bool,
}

/// The full node/edge catalog backing the canvas.
#[derive(Clone, Debug)]
pub struct PipelineGraph {
    /// Nodes in catalog order.
    pub nodes: Vec<PipelineNode>,
    /// Current edge set.
    pub edges: Vec<PipelineEdge>,
}

impl Default for PipelineGraph {
    fn default() -> Self {
        let nodes = vec![
            PipelineNode {
                kind: NodeKind::Upload,
                label: "Upload Dataset",
                subtitle: "CSV from disk",
                pos: pos2(50.0, 30.0),
            },
            PipelineNode {
                kind: NodeKind::Preprocess,
                label: "Preprocess",
                subtitle: "Standardize / Normalize",
                pos: pos2(320.0, 30.0),
            },
            PipelineNode {
                kind: NodeKind::Split,
                label: "Split",
                subtitle: "Train/Test",
                pos: pos2(620.0, 30.0),
            },
            PipelineNode {
                kind: NodeKind::Model,
                label: "Model",
                subtitle: "Select and Train",
                pos: pos2(920.0, 200.0),
            },
            PipelineNode {
                kind: NodeKind::Results,
                label: "Results",
                subtitle: "Accuracy / Charts",
                pos: pos2(920.0, 30.0),
            },
        ];
        let edges = vec![
            PipelineEdge {
                source: NodeKind::Upload,
                target: NodeKind::Preprocess,
                animated: true,
            },
            PipelineEdge {
                source: NodeKind::Preprocess,
                target: NodeKind::Split,
                animated: false,
            },
            PipelineEdge {
                source: NodeKind::Split,
                target: NodeKind::Model,
                animated: false,
            },
            PipelineEdge {
                source: NodeKind::Model,
                target: NodeKind::Results,
                animated: false,
            },
        ];
        Self { nodes, edges }
    }
}

impl PipelineGraph {
    /// Look up a node by stage.
    pub fn node(&self, kind: NodeKind) -> Option<&PipelineNode> {
        self.nodes.iter().find(|node| node.kind == kind)
    }

    /// Move a node by the given delta.
    pub fn drag_node(&mut self, kind: NodeKind, delta: Vec2) {
        if let Some(node) = self.nodes.iter_mut().find(|node| node.kind == kind) {
            node.pos += delta;
        }
    }

    /// Add an edge between two nodes. Self-loops and duplicates are ignored.
    /// Returns whether an edge was added.
    pub fn connect(&mut self, source: NodeKind, target: NodeKind) -> bool {
        if source == target {
            return false;
        }
        if self
            .edges
            .iter()
            .any(|edge| edge.source == source && edge.target == target)
        {
            return false;
        }
        self.edges.push(PipelineEdge {
            source,
            target,
            animated: false,
        });
        true
    }

    /// Remove the edge at `index`, if present.
    pub fn remove_edge(&mut self, index: usize) {
        if index < self.edges.len() {
            self.edges.remove(index);
        }
    }
}

//! Editor canvas - the graph as the user sees and edits it
//!
//! Owns the graph together with its view state and is the [`GraphAccess`]
//! host macros run against.

use super::interaction::InteractionManager;
use super::viewport::Viewport;
use crate::constants;
use crate::macros::executor::{GraphAccess, ParameterInfo};
use crate::nodes::{Node, NodeGraph, NodeId};
use egui::{Color32, Pos2, Rect, Sense, Stroke, Vec2};
use log::debug;
use serde_json::Value;

/// What changed while the canvas handled a frame of input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanvasResponse {
    /// Nodes were added or removed
    pub structure_changed: bool,
    /// Selection changed
    pub selection_changed: bool,
}

/// Graph plus view state
#[derive(Debug, Clone)]
pub struct EditorCanvas {
    pub graph: NodeGraph,
    pub viewport: Viewport,
    pub interaction: InteractionManager,
    /// Size of the canvas area, updated every frame it is shown
    pub view_size: Vec2,
    needs_redraw: bool,
}

impl EditorCanvas {
    pub fn new() -> Self {
        Self::with_graph(NodeGraph::new())
    }

    pub fn with_graph(graph: NodeGraph) -> Self {
        let [width, height] = constants::viewport::DEFAULT_VIEW_SIZE;
        Self {
            graph,
            viewport: Viewport::new(),
            interaction: InteractionManager::new(),
            view_size: Vec2::new(width, height),
            needs_redraw: false,
        }
    }

    /// Return and clear the pending redraw request
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Remove a node, dropping it from the selection
    pub fn remove_node(&mut self, node_id: NodeId) -> Result<Node, &'static str> {
        let node = self.graph.remove_node(node_id).ok_or("Node not found")?;
        self.interaction.selected_nodes.remove(&node_id);
        self.needs_redraw = true;
        Ok(node)
    }

    /// Draw the graph and handle pointer input
    pub fn show(&mut self, ui: &mut egui::Ui) -> CanvasResponse {
        let mut result = CanvasResponse::default();
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        self.view_size = rect.size();
        let origin = rect.min.to_vec2();

        // Pan with secondary/middle drag, zoom with scroll
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.viewport.pan(response.drag_delta());
        }
        if let Some(pointer) = response.hover_pos() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                self.viewport.zoom_at_point(pointer - origin, 1.0 + scroll * 0.001);
            }
        }

        let to_world =
            |viewport: &Viewport, screen: Pos2| viewport.screen_to_world(screen - origin);

        if response.clicked() {
            if let Some(pointer) = response.interact_pointer_pos() {
                let multi = ui.input(|i| i.modifiers.shift);
                match self.interaction.node_at(&self.graph, to_world(&self.viewport, pointer)) {
                    Some(node_id) => self.interaction.select_node(node_id, multi),
                    None if !multi => self.interaction.clear_selection(),
                    None => {}
                }
                result.selection_changed = true;
            }
        }

        if response.drag_started_by(egui::PointerButton::Primary) {
            if let Some(pointer) = response.interact_pointer_pos() {
                let world = to_world(&self.viewport, pointer);
                if let Some(node_id) = self.interaction.node_at(&self.graph, world) {
                    if !self.interaction.is_selected(node_id) {
                        self.interaction.select_node(node_id, false);
                        result.selection_changed = true;
                    }
                    self.interaction.start_drag(world, &self.graph);
                }
            }
        }
        if self.interaction.is_dragging() {
            if let Some(pointer) = response.interact_pointer_pos() {
                let world = to_world(&self.viewport, pointer);
                self.interaction.update_drag(world, &mut self.graph);
            }
            if response.drag_stopped() {
                self.interaction.end_drag();
            }
        }

        if response.hovered() && ui.input(|i| i.key_pressed(egui::Key::Delete)) {
            let removed = self.interaction.delete_selected(&mut self.graph);
            if !removed.is_empty() {
                debug!("Deleted nodes {:?}", removed);
                result.structure_changed = true;
                result.selection_changed = true;
            }
        }

        self.paint(ui.painter_at(rect), origin);
        result
    }

    fn paint(&self, painter: egui::Painter, origin: Vec2) {
        painter.rect_filled(painter.clip_rect(), 0.0, Color32::from_gray(28));

        let zoom = self.viewport.zoom;
        for node in self.graph.sorted_nodes() {
            let min = self.viewport.world_to_screen(node.position) + origin;
            let rect = Rect::from_min_size(min, node.size * zoom);
            let border = if self.interaction.is_selected(node.id) {
                Color32::from_rgb(100, 150, 255)
            } else {
                Color32::from_rgb(64, 64, 64)
            };
            painter.rect_filled(rect, 5.0 * zoom, node.color);
            painter.rect_stroke(
                rect,
                5.0 * zoom,
                Stroke::new(2.0, border),
                egui::StrokeKind::Outside,
            );
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                format!("{} [{}]", node.title, node.id),
                egui::FontId::proportional(12.0 * zoom),
                Color32::WHITE,
            );
        }
    }
}

impl Default for EditorCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphAccess for EditorCanvas {
    fn has_node(&self, node_id: NodeId) -> bool {
        self.graph.nodes.contains_key(&node_id)
    }

    fn parameter(&self, node_id: NodeId, name: &str) -> Option<ParameterInfo> {
        let widget = self.graph.node(node_id)?.widget(name)?;
        Some(ParameterInfo {
            kind: widget.kind.clone(),
            value: widget.value.clone(),
            options: widget.options.clone(),
        })
    }

    fn set_parameter(&mut self, node_id: NodeId, name: &str, value: Value) -> bool {
        match self.graph.node_mut(node_id).and_then(|node| node.widget_mut(name)) {
            Some(widget) => {
                widget.value = value;
                true
            }
            None => false,
        }
    }

    fn select_node(&mut self, node_id: NodeId) {
        self.interaction.select_node(node_id, false);
    }

    fn center_on_node(&mut self, node_id: NodeId) {
        if let Some(center) = self.graph.node(node_id).map(|node| node.center()) {
            self.viewport.center_on(center, self.view_size);
        }
    }

    fn mark_canvas_dirty(&mut self) {
        self.needs_redraw = true;
    }
}

//! Node interaction handling (selection, dragging)

use crate::nodes::{NodeGraph, NodeId};
use egui::{Pos2, Vec2};
use std::collections::{HashMap, HashSet};

/// Manages node interactions and selections
#[derive(Debug, Clone, Default)]
pub struct InteractionManager {
    pub selected_nodes: HashSet<NodeId>,
    pub drag_offsets: HashMap<NodeId, Vec2>,
}

impl InteractionManager {
    /// Creates a new interaction manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a single node, optionally keeping existing selection
    pub fn select_node(&mut self, node_id: NodeId, multi_select: bool) {
        if multi_select {
            if self.selected_nodes.contains(&node_id) {
                self.selected_nodes.remove(&node_id);
            } else {
                self.selected_nodes.insert(node_id);
            }
        } else {
            self.selected_nodes.clear();
            self.selected_nodes.insert(node_id);
        }
    }

    /// Clear all selections
    pub fn clear_selection(&mut self) {
        self.selected_nodes.clear();
    }

    pub fn is_selected(&self, node_id: NodeId) -> bool {
        self.selected_nodes.contains(&node_id)
    }

    /// The selected node, if exactly one is selected
    pub fn single_selection(&self) -> Option<NodeId> {
        match self.selected_nodes.len() {
            1 => self.selected_nodes.iter().next().copied(),
            _ => None,
        }
    }

    /// Topmost node under a world position
    pub fn node_at(&self, graph: &NodeGraph, world_pos: Pos2) -> Option<NodeId> {
        graph
            .sorted_nodes()
            .filter(|node| node.get_rect().contains(world_pos))
            .map(|node| node.id)
            .last()
    }

    /// Start dragging selected nodes
    pub fn start_drag(&mut self, drag_start: Pos2, graph: &NodeGraph) {
        self.drag_offsets.clear();
        for &node_id in &self.selected_nodes {
            if let Some(node) = graph.nodes.get(&node_id) {
                self.drag_offsets.insert(node_id, node.position - drag_start);
            }
        }
    }

    /// Update node positions during drag
    pub fn update_drag(&mut self, current_pos: Pos2, graph: &mut NodeGraph) {
        for (&node_id, &offset) in &self.drag_offsets {
            if let Some(node) = graph.nodes.get_mut(&node_id) {
                node.position = current_pos + offset;
            }
        }
    }

    /// End dragging
    pub fn end_drag(&mut self) {
        self.drag_offsets.clear();
    }

    pub fn is_dragging(&self) -> bool {
        !self.drag_offsets.is_empty()
    }

    /// Delete selected nodes and return their ids
    pub fn delete_selected(&mut self, graph: &mut NodeGraph) -> Vec<NodeId> {
        let mut removed: Vec<NodeId> = self
            .selected_nodes
            .drain()
            .filter(|id| graph.remove_node(*id).is_some())
            .collect();
        removed.sort_unstable();
        self.drag_offsets.clear();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::Node;

    fn graph_with_two_nodes() -> NodeGraph {
        let mut graph = NodeGraph::new();
        graph.add_node(Node::new(0, "A", Pos2::new(0.0, 0.0)));
        graph.add_node(Node::new(0, "B", Pos2::new(100.0, 0.0)));
        graph
    }

    #[test]
    fn test_select_single_and_multi() {
        let mut interaction = InteractionManager::new();
        interaction.select_node(1, false);
        interaction.select_node(2, false);
        assert_eq!(interaction.single_selection(), Some(2));

        interaction.select_node(1, true);
        assert!(interaction.is_selected(1) && interaction.is_selected(2));
        interaction.select_node(1, true);
        assert!(!interaction.is_selected(1));

        interaction.clear_selection();
        assert!(interaction.selected_nodes.is_empty());
    }

    #[test]
    fn test_node_at() {
        let graph = graph_with_two_nodes();
        let interaction = InteractionManager::new();
        assert_eq!(interaction.node_at(&graph, Pos2::new(110.0, 10.0)), Some(1));
        assert_eq!(interaction.node_at(&graph, Pos2::new(-50.0, -50.0)), None);
    }

    #[test]
    fn test_drag_moves_selection() {
        let mut graph = graph_with_two_nodes();
        let mut interaction = InteractionManager::new();
        interaction.select_node(0, false);
        interaction.start_drag(Pos2::new(10.0, 10.0), &graph);
        interaction.update_drag(Pos2::new(30.0, 15.0), &mut graph);
        interaction.end_drag();

        assert_eq!(graph.node(0).map(|n| n.position), Some(Pos2::new(20.0, 5.0)));
        assert_eq!(graph.node(1).map(|n| n.position), Some(Pos2::new(100.0, 0.0)));
        assert!(!interaction.is_dragging());
    }

    #[test]
    fn test_delete_selected() {
        let mut graph = graph_with_two_nodes();
        let mut interaction = InteractionManager::new();
        interaction.select_node(1, false);
        interaction.select_node(7, true);
        assert_eq!(interaction.delete_selected(&mut graph), vec![1]);
        assert_eq!(graph.sorted_ids(), vec![0]);
    }
}

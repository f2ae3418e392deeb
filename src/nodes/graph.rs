//! Node graph data structures and operations

use super::node::{Node, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A graph containing nodes keyed by id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeGraph {
    pub nodes: HashMap<NodeId, Node>,
    next_node_id: NodeId,
}

impl NodeGraph {
    /// Creates a new empty node graph
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            next_node_id: 0,
        }
    }

    /// Adds a node to the graph and returns its ID
    pub fn add_node(&mut self, mut node: Node) -> NodeId {
        let id = self.next_node_id;
        node.id = id;
        self.nodes.insert(id, node);
        self.next_node_id += 1;
        id
    }

    /// Adds a node to the graph with a specific ID (for loading and testing)
    pub fn add_node_with_id(&mut self, id: NodeId, mut node: Node) -> NodeId {
        node.id = id;
        self.nodes.insert(id, node);
        // Update next_node_id to avoid conflicts
        if id >= self.next_node_id {
            self.next_node_id = id + 1;
        }
        id
    }

    /// Removes a node
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        self.nodes.remove(&node_id)
    }

    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// All node ids in ascending order
    pub fn sorted_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Nodes in ascending id order
    pub fn sorted_nodes(&self) -> impl Iterator<Item = &Node> {
        self.sorted_ids().into_iter().filter_map(move |id| self.nodes.get(&id))
    }

    /// Macro hub nodes in ascending id order
    pub fn macro_hubs(&self) -> impl Iterator<Item = &Node> {
        self.sorted_nodes().filter(|node| node.is_macro_hub())
    }
}

impl Default for NodeGraph {
    fn default() -> Self {
        Self::new()
    }
}

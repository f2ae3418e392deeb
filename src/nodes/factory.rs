//! Node factory system with self-registration and metadata

use crate::constants;
use crate::nodes::widget::Widget;
use crate::nodes::{Node, NodeGraph, NodeId};
use egui::{Color32, Pos2, Vec2};
use log::debug;
use std::collections::BTreeMap;

/// Hierarchical category system for organizing nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeCategory {
    path: Vec<String>,
}

impl NodeCategory {
    pub fn new(path: &[&str]) -> Self {
        Self {
            path: path.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Slash-separated form, e.g. "Utility/Macros"
    pub fn display_string(&self) -> String {
        self.path.join("/")
    }
}

/// Metadata describing a node type
#[derive(Debug, Clone)]
pub struct NodeMetadata {
    pub node_type: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub category: NodeCategory,
    pub color: Color32,
    pub size_hint: Vec2,
    /// Widgets every new instance starts with
    pub widgets: Vec<Widget>,
    /// Output names, in port order
    pub outputs: Vec<&'static str>,
}

impl NodeMetadata {
    /// Create node metadata with sensible defaults
    pub fn new(
        node_type: &'static str,
        display_name: &'static str,
        category: NodeCategory,
        description: &'static str,
    ) -> Self {
        let [width, height] = constants::node::DEFAULT_SIZE;
        let [r, g, b] = constants::node::DEFAULT_COLOR;
        Self {
            node_type,
            display_name,
            description,
            category,
            color: Color32::from_rgb(r, g, b),
            size_hint: Vec2::new(width, height),
            widgets: vec![],
            outputs: vec![],
        }
    }

    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }

    pub fn with_size_hint(mut self, size: Vec2) -> Self {
        self.size_hint = size;
        self
    }

    pub fn with_widgets(mut self, widgets: Vec<Widget>) -> Self {
        self.widgets = widgets;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<&'static str>) -> Self {
        self.outputs = outputs;
        self
    }

    /// Description plus output names, for menu tooltips
    pub fn summary(&self) -> String {
        if self.outputs.is_empty() {
            return self.description.to_string();
        }
        format!("{}\nOutputs: {}", self.description, self.outputs.join(", "))
    }
}

/// Node factory trait
pub trait NodeFactory: Send + Sync {
    /// Get node metadata
    fn metadata() -> NodeMetadata
    where
        Self: Sized;

    /// Create a node instance at the given position
    fn create(position: Pos2) -> Node
    where
        Self: Sized,
    {
        let meta = Self::metadata();
        let mut node = Node::new(0, meta.node_type, position)
            .with_title(meta.display_name)
            .with_color(meta.color)
            .with_size(meta.size_hint);
        for widget in meta.widgets {
            node.add_widget(widget);
        }
        node
    }

    /// Add this node to a graph
    fn add_to_graph(graph: &mut NodeGraph, position: Pos2) -> NodeId
    where
        Self: Sized,
    {
        graph.add_node(Self::create(position))
    }
}

type NodeCreator = fn(Pos2) -> Node;
type MetadataProvider = fn() -> NodeMetadata;

/// Registry for managing node factories
#[derive(Default)]
pub struct NodeRegistry {
    creators: BTreeMap<String, NodeCreator>,
    metadata_providers: BTreeMap<String, MetadataProvider>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in node type
    pub fn with_builtin_nodes() -> Self {
        let mut registry = Self::new();
        registry.register::<crate::nodes::macro_hub::MacroHubNodeFactory>();
        registry.register::<crate::nodes::data::constant::ConstantNodeFactory>();
        registry
    }

    /// Register a node factory
    pub fn register<T: NodeFactory + 'static>(&mut self) {
        let metadata = T::metadata();
        let node_type = metadata.node_type.to_string();
        debug!("Registering node type {} ({})", node_type, metadata.category.display_string());
        self.creators.insert(node_type.clone(), T::create);
        self.metadata_providers.insert(node_type, T::metadata);
    }

    /// Create a node by type name
    pub fn create_node(&self, node_type: &str, position: Pos2) -> Option<Node> {
        self.creators.get(node_type).map(|creator| creator(position))
    }

    pub fn get_metadata(&self, node_type: &str) -> Option<NodeMetadata> {
        self.metadata_providers.get(node_type).map(|provider| provider())
    }

    /// Registered type names in sorted order
    pub fn node_types(&self) -> Vec<&str> {
        self.creators.keys().map(|s| s.as_str()).collect()
    }
}

//! Node system - Core data structures and node implementations

// Core node system modules
pub mod execution_engine;
pub mod factory;
pub mod graph;
pub mod node;
pub mod widget;

// Node implementations
pub mod data;
pub mod macro_hub;

// Re-export core types
pub use graph::NodeGraph;
pub use node::{Node, NodeId};
pub use widget::{Widget, WidgetKind};

// Re-export factory types
pub use factory::{NodeCategory, NodeFactory, NodeMetadata, NodeRegistry};

// Re-export execution engine types
pub use execution_engine::{ExecutionReport, ExecutionStats, NodeGraphEngine};

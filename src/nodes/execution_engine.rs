//! Node graph execution
//!
//! Evaluation runs the macro override pass first, then computes every node's
//! output in ascending id order.

use crate::editor::EditorCanvas;
use crate::macros::executor::MacroOutcome;
use crate::nodes::data::constant;
use crate::nodes::macro_hub::MacroHubLogic;
use crate::nodes::{Node, NodeId};
use log::info;
use serde_json::Value;
use std::collections::BTreeMap;

/// Result of one evaluation
#[derive(Debug, Clone, Default)]
pub struct ExecutionReport {
    /// Override macros applied before evaluation, in order
    pub overrides: Vec<MacroOutcome>,
    pub outputs: BTreeMap<NodeId, Value>,
}

/// Execution statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionStats {
    pub executions: usize,
    pub nodes_evaluated: usize,
    pub overrides_applied: usize,
}

#[derive(Debug, Default)]
pub struct NodeGraphEngine {
    stats: ExecutionStats,
}

impl NodeGraphEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate the whole graph
    pub fn execute(&mut self, canvas: &mut EditorCanvas) -> ExecutionReport {
        let overrides = MacroHubLogic::apply_all_overrides(canvas);
        let outputs: BTreeMap<NodeId, Value> = canvas
            .graph
            .sorted_nodes()
            .map(|node| (node.id, Self::node_output(node)))
            .collect();

        self.stats.executions += 1;
        self.stats.nodes_evaluated += outputs.len();
        self.stats.overrides_applied += overrides.iter().filter(|o| o.changed()).count();
        info!(
            "Evaluated {} nodes ({} overrides)",
            outputs.len(),
            overrides.len()
        );

        ExecutionReport { overrides, outputs }
    }

    fn node_output(node: &Node) -> Value {
        if node.is_macro_hub() {
            return Value::String(MacroHubLogic::process(node));
        }
        match node.node_type.as_str() {
            "Data_Constant" => constant::process(node),
            _ => Value::Null,
        }
    }

    pub fn get_stats(&self) -> ExecutionStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::macro_hub;
    use crate::macros::model::{Macro, MacroMode};
    use crate::macros::store::MacroStore;
    use crate::nodes::data::constant::ConstantNodeFactory;
    use crate::nodes::macro_hub::MacroHubNodeFactory;
    use crate::nodes::NodeFactory;
    use egui::Pos2;
    use serde_json::json;

    #[test]
    fn test_execute_applies_overrides_first() {
        let mut canvas = EditorCanvas::new();
        let constant = ConstantNodeFactory::add_to_graph(&mut canvas.graph, Pos2::ZERO);
        let hub = MacroHubNodeFactory::add_to_graph(&mut canvas.graph, Pos2::ZERO);
        if let Some(node) = canvas.graph.node_mut(hub) {
            if let Some(w) = node.widget_mut(macro_hub::APPLY_OVERRIDES_FIELD) {
                w.value = json!(macro_hub::OVERRIDES_ON_EXECUTION);
            }
            MacroStore::new(node)
                .add(Macro::new(MacroMode::SetStatic, constant, "value").with_value("4.5"));
        }

        let mut engine = NodeGraphEngine::new();
        let report = engine.execute(&mut canvas);

        assert_eq!(report.overrides.len(), 1);
        assert_eq!(report.outputs.get(&constant), Some(&json!(4.5)));
        assert!(matches!(report.outputs.get(&hub), Some(Value::String(s)) if s.starts_with('[')));
        assert_eq!(
            engine.get_stats(),
            ExecutionStats {
                executions: 1,
                nodes_evaluated: 2,
                overrides_applied: 1,
            }
        );
    }

    #[test]
    fn test_unknown_node_outputs_null() {
        let mut canvas = EditorCanvas::new();
        let id = canvas.graph.add_node(Node::new(0, "Mystery", Pos2::ZERO));
        let report = NodeGraphEngine::new().execute(&mut canvas);
        assert_eq!(report.outputs.get(&id), Some(&Value::Null));
        assert!(report.overrides.is_empty());
    }
}

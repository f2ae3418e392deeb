//! Parameter candidates offered as macro targets

use crate::nodes::{NodeGraph, NodeId, Widget, WidgetKind};
use serde::Serialize;

/// One node parameter a macro may target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterCandidate {
    pub node_id: NodeId,
    pub node_title: String,
    pub widget_name: String,
    pub widget_type: String,
}

impl ParameterCandidate {
    /// Picker label, e.g. `[3] Sampler :: steps`
    pub fn label(&self) -> String {
        format!("[{}] {} :: {}", self.node_id, self.node_title, self.widget_name)
    }
}

fn is_modifiable(widget: &Widget) -> bool {
    matches!(
        widget.kind,
        WidgetKind::Number | WidgetKind::Combo | WidgetKind::Text | WidgetKind::Boolean
    ) || widget.options.is_some()
}

/// Every modifiable parameter in the graph, by node id then widget order
pub fn parameter_candidates(graph: &NodeGraph) -> Vec<ParameterCandidate> {
    graph
        .sorted_nodes()
        .flat_map(|node| {
            node.widgets
                .iter()
                .filter(|w| is_modifiable(w))
                .map(move |w| ParameterCandidate {
                    node_id: node.id,
                    node_title: node.title.clone(),
                    widget_name: w.name.clone(),
                    widget_type: w.kind.type_name().to_string(),
                })
        })
        .collect()
}

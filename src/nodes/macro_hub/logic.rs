//! Macro Hub behavior: node output, override pass and panel actions

use super::parameters::MacroPanelAction;
use crate::constants::macro_hub;
use crate::editor::EditorCanvas;
use crate::macros::executor::{execute, GraphAccess, MacroOutcome};
use crate::macros::model::{Macro, MacroMode};
use crate::macros::store::{read_macros, MacroHost, MacroStore};
use crate::nodes::{Node, NodeGraph, NodeId};
use log::{debug, info};
use serde_json::Value;

/// What a panel action changed
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEffect {
    /// The hub's macro list changed; hotkey bindings must be rebuilt
    Edited,
    /// A macro ran
    Ran(MacroOutcome),
    /// Nothing matched
    Unchanged,
}

pub struct MacroHubLogic;

impl MacroHubLogic {
    /// Output value: the stored list re-emitted as compact JSON
    ///
    /// Unknown fields survive; unparseable text becomes an empty list.
    pub fn process(hub: &Node) -> String {
        let text = hub.macros_text().unwrap_or(macro_hub::EMPTY_LIST);
        match serde_json::from_str::<Value>(text) {
            Ok(value) => value.to_string(),
            Err(_) => macro_hub::EMPTY_LIST.to_string(),
        }
    }

    /// Whether the hub applies its overrides before evaluation
    pub fn applies_overrides(hub: &Node) -> bool {
        hub.widget(macro_hub::APPLY_OVERRIDES_FIELD).and_then(|w| w.as_str())
            == Some(macro_hub::OVERRIDES_ON_EXECUTION)
    }

    /// Active set_static macros of every overriding hub, hubs in ascending id order
    pub fn override_macros(graph: &NodeGraph) -> Vec<Macro> {
        graph
            .macro_hubs()
            .filter(|hub| Self::applies_overrides(hub))
            .flat_map(|hub| read_macros(hub))
            .filter(|m| m.active && m.mode == MacroMode::SetStatic)
            .collect()
    }

    /// Run override macros in order
    pub fn apply_overrides<G: GraphAccess + ?Sized>(
        macros: &[Macro],
        graph: &mut G,
    ) -> Vec<MacroOutcome> {
        macros.iter().map(|m| execute(m, graph)).collect()
    }

    /// Override pass over the whole canvas, run before graph evaluation
    pub fn apply_all_overrides(canvas: &mut EditorCanvas) -> Vec<MacroOutcome> {
        let macros = Self::override_macros(&canvas.graph);
        if !macros.is_empty() {
            debug!("Applying {} override macros", macros.len());
        }
        Self::apply_overrides(&macros, canvas)
    }

    /// Apply an action from a hub's panel
    pub fn apply_action(
        canvas: &mut EditorCanvas,
        hub_id: NodeId,
        action: MacroPanelAction,
    ) -> PanelEffect {
        let Some(hub) = canvas.graph.node_mut(hub_id) else {
            return PanelEffect::Unchanged;
        };
        let mut store = MacroStore::new(hub);

        match action {
            MacroPanelAction::Save(macro_def) => {
                let saved = store.update(macro_def);
                info!("Saved macro {} '{}' on hub {}", saved.id, saved.display_label(), hub_id);
                PanelEffect::Edited
            }
            MacroPanelAction::Remove(id) => {
                if store.remove(&id) {
                    info!("Removed macro {} from hub {}", id, hub_id);
                    PanelEffect::Edited
                } else {
                    PanelEffect::Unchanged
                }
            }
            MacroPanelAction::SetActive { id, active } => match store.get(&id) {
                Some(existing) => {
                    store.update(existing.with_active(active));
                    PanelEffect::Edited
                }
                None => PanelEffect::Unchanged,
            },
            MacroPanelAction::Run(id) => match store.get(&id) {
                // Inactive macros still run from the panel; only dispatch skips them
                Some(macro_def) => PanelEffect::Ran(execute(&macro_def, canvas)),
                None => PanelEffect::Unchanged,
            },
        }
    }
}

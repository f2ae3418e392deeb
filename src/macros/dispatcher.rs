//! Keyboard dispatch - the single entry point from key events to macros
//!
//! Runs before any other input handler. A bound combo consumes its event and
//! runs the macro synchronously; unbound combos are left for the rest of the
//! UI. One macro per key-down, auto-repeat included.

use super::executor::{execute, GraphAccess, MacroOutcome};
use super::hotkey::{normalize, KeyEvent};
use super::model::Macro;
use super::registry::{self, SharedRegistry};
use crate::nodes::NodeGraph;
use log::{debug, info};

/// What the dispatcher did with one key event
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchResult {
    /// Bare modifier press
    Ignored,
    /// Valid combo with no macro bound
    Unbound(String),
    /// A bound macro ran
    Fired {
        combo: String,
        macro_id: String,
        outcome: MacroOutcome,
    },
}

impl DispatchResult {
    /// Whether the host should suppress default handling of the event
    pub fn consumed(&self) -> bool {
        matches!(self, DispatchResult::Fired { .. })
    }
}

/// Routes key events through a hotkey registry
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    registry: SharedRegistry,
}

impl Dispatcher {
    pub fn new(registry: SharedRegistry) -> Self {
        Self { registry }
    }

    /// Dispatcher over the process-wide registry
    pub fn global() -> Self {
        Self::new(registry::global().clone())
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    /// Rebuild bindings from every macro hub in the graph
    ///
    /// Call after any macro list edit, hub creation or graph load.
    pub fn rebuild(&self, graph: &NodeGraph) -> usize {
        let count = self.registry.rebuild_from_graph(graph);
        info!("Hotkey bindings rebuilt: {} active", count);
        count
    }

    /// Handle one key-down event
    pub fn handle_key<G: GraphAccess + ?Sized>(
        &self,
        event: &KeyEvent,
        graph: &mut G,
    ) -> DispatchResult {
        let combo = normalize(event);
        if combo.is_empty() {
            return DispatchResult::Ignored;
        }
        match self.registry.lookup(&combo) {
            Some(macro_def) => fire(combo, &macro_def, graph),
            None => DispatchResult::Unbound(combo),
        }
    }

    /// Drain this frame's bound key presses from egui and run their macros
    ///
    /// Call at the start of the frame, before any widget reads input. Matched
    /// key presses are removed from egui's queue together with the text event
    /// that follows them, so a bound printable key never reaches a focused
    /// text field. Everything else is left alone. Returns one `Fired` result
    /// per consumed key press, in event order.
    pub fn dispatch_egui<G: GraphAccess + ?Sized>(
        &self,
        ctx: &egui::Context,
        graph: &mut G,
    ) -> Vec<DispatchResult> {
        let mut matched: Vec<(String, Macro)> = Vec::new();
        ctx.input_mut(|input| {
            // Set right after a consumed press; only the next event may be its text
            let mut swallow_text = false;
            input.events.retain(|event| {
                if let egui::Event::Text(_) = event {
                    return !std::mem::take(&mut swallow_text);
                }
                swallow_text = false;
                let egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } = event
                else {
                    return true;
                };
                let combo = normalize(&KeyEvent::from_egui(*key, *modifiers));
                if combo.is_empty() {
                    return true;
                }
                match self.registry.lookup(&combo) {
                    Some(macro_def) => {
                        matched.push((combo, macro_def));
                        swallow_text = true;
                        false
                    }
                    None => true,
                }
            });
        });

        // Macros run outside the input lock; they may touch the graph freely
        matched
            .into_iter()
            .map(|(combo, macro_def)| fire(combo, &macro_def, graph))
            .collect()
    }
}

fn fire<G: GraphAccess + ?Sized>(
    combo: String,
    macro_def: &Macro,
    graph: &mut G,
) -> DispatchResult {
    debug!("{} -> macro {} '{}'", combo, macro_def.id, macro_def.display_label());
    let outcome = execute(macro_def, graph);
    DispatchResult::Fired {
        combo,
        macro_id: macro_def.id.clone(),
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditorCanvas;
    use crate::macros::model::MacroMode;
    use crate::macros::registry::HotkeyRegistry;
    use crate::macros::store::MacroStore;
    use crate::nodes::data::constant::ConstantNodeFactory;
    use crate::nodes::macro_hub::MacroHubNodeFactory;
    use crate::nodes::NodeFactory;
    use egui::Pos2;
    use serde_json::json;

    /// Canvas with one constant node (id 0) and one hub (id 1)
    fn canvas_with_hub(macros: &[Macro]) -> EditorCanvas {
        let mut canvas = EditorCanvas::new();
        ConstantNodeFactory::add_to_graph(&mut canvas.graph, Pos2::new(0.0, 0.0));
        let hub_id = MacroHubNodeFactory::add_to_graph(&mut canvas.graph, Pos2::new(200.0, 0.0));
        if let Some(hub) = canvas.graph.node_mut(hub_id) {
            let mut store = MacroStore::new(hub);
            for macro_def in macros {
                store.add(macro_def.clone());
            }
        }
        canvas
    }

    #[test]
    fn test_bare_modifier_is_ignored() {
        let dispatcher = Dispatcher::default();
        let mut canvas = EditorCanvas::new();
        let result = dispatcher.handle_key(&KeyEvent::new("Shift").with_shift(), &mut canvas);
        assert_eq!(result, DispatchResult::Ignored);
        assert!(!result.consumed());
    }

    #[test]
    fn test_unbound_combo_is_not_consumed() {
        let dispatcher = Dispatcher::default();
        let mut canvas = EditorCanvas::new();
        let result = dispatcher.handle_key(&KeyEvent::new("g").with_ctrl(), &mut canvas);
        assert_eq!(result, DispatchResult::Unbound("ctrl+g".to_string()));
        assert!(!result.consumed());
    }

    #[test]
    fn test_bound_combo_fires_every_press() {
        let toggle = Macro::new(MacroMode::Toggle, 0, "enabled").with_id("t").with_hotkey("alt+t");
        let mut canvas = canvas_with_hub(&[toggle]);
        let dispatcher = Dispatcher::default();
        assert_eq!(dispatcher.rebuild(&canvas.graph), 1);

        let press = KeyEvent::new("T").with_alt();
        let first = dispatcher.handle_key(&press, &mut canvas);
        assert!(first.consumed());
        let second = dispatcher.handle_key(&press, &mut canvas);
        assert!(second.consumed());

        // Two presses flip the flag back to where it started
        let enabled = canvas
            .graph
            .node(0)
            .and_then(|n| n.widget("enabled"))
            .map(|w| w.value.clone());
        assert_eq!(enabled, Some(json!(true)));
    }

    #[test]
    fn test_rebuild_picks_up_store_edits() {
        let mut canvas = canvas_with_hub(&[]);
        let dispatcher = Dispatcher::default();
        assert_eq!(dispatcher.rebuild(&canvas.graph), 0);

        if let Some(hub) = canvas.graph.node_mut(1) {
            MacroStore::new(hub).add(Macro::new(MacroMode::Jump, 0, "").with_hotkey("alt+1"));
        }
        let press = KeyEvent::new("1").with_alt();
        assert!(!dispatcher.handle_key(&press, &mut canvas).consumed());

        dispatcher.rebuild(&canvas.graph);
        match dispatcher.handle_key(&press, &mut canvas) {
            DispatchResult::Fired { combo, outcome, .. } => {
                assert_eq!(combo, "alt+1");
                assert_eq!(outcome, MacroOutcome::Focused(0));
            }
            other => panic!("expected Fired, got {:?}", other),
        }
        assert!(canvas.interaction.is_selected(0));
    }

    #[test]
    fn test_dangling_target_still_consumes() {
        let dispatcher = Dispatcher::default();
        let orphan = Macro::new(MacroMode::SetStatic, 99, "value")
            .with_value("1")
            .with_hotkey("alt+9");
        dispatcher.registry().replace(HotkeyRegistry::rebuild([&orphan]));

        let mut canvas = EditorCanvas::new();
        let result = dispatcher.handle_key(&KeyEvent::new("9").with_alt(), &mut canvas);
        assert!(result.consumed());
        assert!(!canvas.take_redraw());
    }

    #[test]
    fn test_dispatch_egui_consumes_only_bound_presses() {
        let set = Macro::new(MacroMode::SetStatic, 0, "value").with_value("7").with_hotkey("alt+1");
        let mut canvas = canvas_with_hub(&[set]);
        let dispatcher = Dispatcher::default();
        dispatcher.rebuild(&canvas.graph);

        let alt = egui::Modifiers {
            alt: true,
            ..Default::default()
        };
        let key = |key: egui::Key, pressed: bool, modifiers: egui::Modifiers| egui::Event::Key {
            key,
            physical_key: None,
            pressed,
            repeat: false,
            modifiers,
        };

        let ctx = egui::Context::default();
        let mut raw = egui::RawInput::default();
        raw.events = vec![
            key(egui::Key::Num1, true, alt),
            key(egui::Key::Num1, false, alt),
            key(egui::Key::Num2, true, alt),
        ];

        let mut results = Vec::new();
        let mut remaining = 0;
        let _ = ctx.run(raw, |ctx| {
            results = dispatcher.dispatch_egui(ctx, &mut canvas);
            remaining = ctx.input(|i| i.events.len());
        });

        assert_eq!(results.len(), 1);
        assert!(results[0].consumed());
        assert_eq!(remaining, 2);
        let value = canvas.graph.node(0).and_then(|n| n.widget("value")).map(|w| w.value.clone());
        assert_eq!(value, Some(json!(7)));
    }

    #[test]
    fn test_dispatch_egui_swallows_text_of_bound_key() {
        let jump = Macro::new(MacroMode::Jump, 0, "").with_hotkey("g");
        let mut canvas = canvas_with_hub(&[jump]);
        let dispatcher = Dispatcher::default();
        dispatcher.rebuild(&canvas.graph);

        let press = |key: egui::Key| egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        };

        let ctx = egui::Context::default();
        let mut raw = egui::RawInput::default();
        raw.events = vec![
            press(egui::Key::G),
            egui::Event::Text("g".to_string()),
            press(egui::Key::H),
            egui::Event::Text("h".to_string()),
        ];

        let mut results = Vec::new();
        let mut remaining = Vec::new();
        let _ = ctx.run(raw, |ctx| {
            results = dispatcher.dispatch_egui(ctx, &mut canvas);
            remaining = ctx.input(|i| i.events.clone());
        });

        assert_eq!(results.len(), 1);
        assert!(canvas.interaction.is_selected(0));
        assert_eq!(remaining, vec![press(egui::Key::H), egui::Event::Text("h".to_string())]);
    }
}

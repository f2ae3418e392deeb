//! Macro Hub interface panel
//!
//! `build_interface` renders the hub's macro list and an editor form, and
//! returns the actions the user took. It never writes to the hub itself;
//! callers apply actions through `MacroHubLogic::apply_action`.

use crate::constants::panel::MACRO_LIST_MAX_HEIGHT;
use crate::macros::candidates::ParameterCandidate;
use crate::macros::model::{Macro, MacroMode};
use crate::macros::registry::HotkeyRegistry;
use crate::macros::store::read_macros;
use crate::nodes::{Node, NodeId};

/// A user action taken in the hub panel
#[derive(Debug, Clone, PartialEq)]
pub enum MacroPanelAction {
    /// Insert or replace a macro
    Save(Macro),
    Remove(String),
    SetActive { id: String, active: bool },
    /// Execute a macro now, regardless of its hotkey
    Run(String),
}

/// Editor form state, kept by the host between frames
#[derive(Debug, Clone, PartialEq)]
pub struct MacroEditorForm {
    /// Id of the macro being edited, `None` for a new one
    pub editing: Option<String>,
    pub label: String,
    pub mode: MacroMode,
    pub target: Option<(NodeId, String)>,
    pub raw_value: String,
    pub hotkey: String,
    pub active: bool,
}

impl Default for MacroEditorForm {
    fn default() -> Self {
        Self {
            editing: None,
            label: String::new(),
            mode: MacroMode::Jump,
            target: None,
            raw_value: String::new(),
            hotkey: String::new(),
            active: true,
        }
    }
}

impl MacroEditorForm {
    /// Start editing an existing macro
    pub fn load(macro_def: &Macro) -> Self {
        Self {
            editing: Some(macro_def.id.clone()),
            label: macro_def.label.clone(),
            mode: macro_def.mode,
            target: Some((macro_def.target_node_id, macro_def.target_param.clone())),
            raw_value: macro_def.raw_value.clone(),
            hotkey: macro_def.hotkey.clone(),
            active: macro_def.active,
        }
    }

    /// The macro this form describes, once a target is chosen
    pub fn to_macro(&self) -> Option<Macro> {
        let (node_id, param) = self.target.clone()?;
        Some(
            Macro::new(self.mode, node_id, param)
                .with_id(self.editing.clone().unwrap_or_default())
                .with_label(self.label.clone())
                .with_value(self.raw_value.clone())
                .with_hotkey(self.hotkey.clone())
                .with_active(self.active),
        )
    }

    fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Macro"
        } else {
            "New Macro"
        }
    }
}

/// List row text: `label → node:param`
pub fn row_label(macro_def: &Macro) -> String {
    format!(
        "{} → {}:{}",
        macro_def.display_label(),
        macro_def.target_node_id,
        macro_def.target_param
    )
}

fn target_label(target: &Option<(NodeId, String)>, candidates: &[ParameterCandidate]) -> String {
    match target {
        Some((node_id, param)) => candidates
            .iter()
            .find(|c| c.node_id == *node_id && c.widget_name == *param)
            .map(|c| c.label())
            .unwrap_or_else(|| format!("[{}] ? :: {}", node_id, param)),
        None => "Select a parameter".to_string(),
    }
}

pub struct MacroHubPanel;

impl MacroHubPanel {
    /// Render the macro list and editor for a hub node
    pub fn build_interface(
        hub: &Node,
        candidates: &[ParameterCandidate],
        form: &mut MacroEditorForm,
        ui: &mut egui::Ui,
    ) -> Vec<MacroPanelAction> {
        let mut actions = Vec::new();
        let macros = read_macros(hub);

        ui.heading("Macros");
        ui.separator();

        egui::ScrollArea::vertical()
            .max_height(MACRO_LIST_MAX_HEIGHT)
            .id_salt(("macro_list", hub.id))
            .show(ui, |ui| {
                if macros.is_empty() {
                    ui.label(egui::RichText::new("No macros defined.").italics());
                }
                for macro_def in &macros {
                    ui.horizontal(|ui| {
                        let mut active = macro_def.active;
                        if ui.checkbox(&mut active, "").changed() {
                            actions.push(MacroPanelAction::SetActive {
                                id: macro_def.id.clone(),
                                active,
                            });
                        }
                        ui.label(row_label(macro_def));
                        ui.code(macro_def.hotkey.as_str());
                        if ui.small_button("▶").on_hover_text("Run").clicked() {
                            actions.push(MacroPanelAction::Run(macro_def.id.clone()));
                        }
                        if ui.small_button("E").on_hover_text("Edit").clicked() {
                            *form = MacroEditorForm::load(macro_def);
                        }
                        if ui.small_button("X").on_hover_text("Delete").clicked() {
                            actions.push(MacroPanelAction::Remove(macro_def.id.clone()));
                        }
                    });
                }
            });

        for conflict in HotkeyRegistry::conflicts(&macros) {
            ui.colored_label(
                egui::Color32::from_rgb(230, 180, 60),
                format!(
                    "{} is bound {} times; the last one wins",
                    conflict.combo,
                    conflict.macro_ids.len()
                ),
            );
        }

        ui.separator();
        ui.label(egui::RichText::new(form.title()).strong());

        egui::Grid::new(("macro_form", hub.id)).num_columns(2).show(ui, |ui| {
            ui.label("Label");
            ui.text_edit_singleline(&mut form.label);
            ui.end_row();

            ui.label("Mode");
            egui::ComboBox::from_id_salt(("macro_mode", hub.id))
                .selected_text(form.mode.as_str())
                .show_ui(ui, |ui| {
                    for mode in MacroMode::ALL {
                        ui.selectable_value(&mut form.mode, mode, mode.as_str());
                    }
                });
            ui.end_row();

            ui.label("Target Parameter");
            egui::ComboBox::from_id_salt(("macro_target", hub.id))
                .selected_text(target_label(&form.target, candidates))
                .width(220.0)
                .show_ui(ui, |ui| {
                    for candidate in candidates {
                        let value = Some((candidate.node_id, candidate.widget_name.clone()));
                        ui.selectable_value(&mut form.target, value, candidate.label());
                    }
                });
            ui.end_row();

            ui.label("Value / Presets");
            ui.add(
                egui::TextEdit::multiline(&mut form.raw_value)
                    .desired_rows(3)
                    .hint_text(
                        "set_static: single value\npreset_cycle: JSON array\nignored for jump",
                    ),
            );
            ui.end_row();

            ui.label("Hotkey");
            ui.add(egui::TextEdit::singleline(&mut form.hotkey).hint_text("e.g. Alt+1"));
            ui.end_row();

            ui.label("Active");
            ui.checkbox(&mut form.active, "");
            ui.end_row();
        });

        ui.horizontal(|ui| {
            let draft = form.to_macro();
            if ui.add_enabled(draft.is_some(), egui::Button::new("Save")).clicked() {
                if let Some(macro_def) = draft {
                    actions.push(MacroPanelAction::Save(macro_def));
                    *form = MacroEditorForm::default();
                }
            }
            if ui.button("Clear").clicked() {
                *form = MacroEditorForm::default();
            }
        });

        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_label() {
        let named = Macro::new(MacroMode::Toggle, 4, "enabled").with_label("Bypass");
        assert_eq!(row_label(&named), "Bypass → 4:enabled");
        let unnamed = Macro::new(MacroMode::Jump, 2, "");
        assert_eq!(row_label(&unnamed), "(unnamed) → 2:");
    }

    #[test]
    fn test_form_needs_target() {
        let mut form = MacroEditorForm::default();
        assert!(form.to_macro().is_none());

        form.target = Some((3, "steps".to_string()));
        form.mode = MacroMode::SetStatic;
        form.raw_value = "25".to_string();
        let draft = form.to_macro().expect("target chosen");
        assert!(draft.id.is_empty());
        assert_eq!(draft.target_param, "steps");
        assert_eq!(draft.raw_value, "25");
    }

    #[test]
    fn test_form_load_round_trip() {
        let saved = Macro::new(MacroMode::PresetCycle, 1, "cfg")
            .with_id("m1")
            .with_label("CFG")
            .with_value("[5,7]")
            .with_hotkey("alt+c")
            .with_active(false);
        let form = MacroEditorForm::load(&saved);
        assert_eq!(form.title(), "Edit Macro");
        assert_eq!(form.to_macro(), Some(saved));
    }

    #[test]
    fn test_target_label() {
        let candidates = vec![ParameterCandidate {
            node_id: 1,
            node_title: "Sampler".to_string(),
            widget_name: "steps".to_string(),
            widget_type: "number".to_string(),
        }];
        assert_eq!(target_label(&Some((1, "steps".into())), &candidates), "[1] Sampler :: steps");
        assert_eq!(target_label(&Some((9, "gone".into())), &candidates), "[9] ? :: gone");
        assert_eq!(target_label(&None, &candidates), "Select a parameter");
    }
}

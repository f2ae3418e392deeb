//! Persisted macro definitions

use crate::nodes::NodeId;
use serde::{Deserialize, Serialize};

/// What a macro does when triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacroMode {
    /// Select the target node and center the view on it
    Jump,
    /// Assign `raw_value`, coerced to the parameter's kind
    SetStatic,
    /// Flip a boolean or advance an enumerated parameter
    Toggle,
    /// Advance through the JSON array held in `raw_value`
    PresetCycle,
}

impl MacroMode {
    pub const ALL: [MacroMode; 4] = [
        MacroMode::Jump,
        MacroMode::SetStatic,
        MacroMode::Toggle,
        MacroMode::PresetCycle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MacroMode::Jump => "jump",
            MacroMode::SetStatic => "set_static",
            MacroMode::Toggle => "toggle",
            MacroMode::PresetCycle => "preset_cycle",
        }
    }
}

impl std::fmt::Display for MacroMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One persisted macro definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Macro {
    /// Identity within the owning hub's list; empty until the store assigns one
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub mode: MacroMode,
    pub target_node_id: NodeId,
    #[serde(default)]
    pub target_param: String,
    /// Literal for set_static, JSON array for preset_cycle, ignored otherwise
    #[serde(default)]
    pub raw_value: String,
    /// Combo text such as `alt+1`; empty means keyboard-unreachable
    #[serde(default)]
    pub hotkey: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Macro {
    /// A new active macro without id, label, value or hotkey
    pub fn new(mode: MacroMode, target_node_id: NodeId, target_param: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            label: String::new(),
            mode,
            target_node_id,
            target_param: target_param.into(),
            raw_value: String::new(),
            hotkey: String::new(),
            active: true,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_value(mut self, raw_value: impl Into<String>) -> Self {
        self.raw_value = raw_value.into();
        self
    }

    pub fn with_hotkey(mut self, hotkey: impl Into<String>) -> Self {
        self.hotkey = hotkey.into();
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Whether this macro takes part in keyboard dispatch
    pub fn is_bound(&self) -> bool {
        self.active && !self.hotkey.is_empty()
    }

    /// Label for lists, falling back to a placeholder
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            "(unnamed)"
        } else {
            &self.label
        }
    }
}

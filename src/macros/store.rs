//! Macro store - CRUD over a hub node's macro list
//!
//! The list lives in a text field on its host node as a pretty-printed JSON
//! array and is re-serialized after every mutation. Reads fail soft: a
//! missing, empty or malformed field is an empty list, and an entry that
//! does not describe a macro is skipped without losing its neighbours.
//!
//! The store does not touch the hotkey registry. Callers rebuild it after
//! every mutation (see `Dispatcher::rebuild`).

use super::model::Macro;
use crate::constants::macro_hub;
use crate::error::{MacroError, Result, ResultExt};
use crate::nodes::Node;
use serde_json::Value;

/// Something that owns a persisted macro list
pub trait MacroHost {
    /// Current persisted text, if the host has a field for it
    fn macros_text(&self) -> Option<&str>;
    /// Replace the persisted text
    fn set_macros_text(&mut self, text: String);
}

impl MacroHost for Node {
    fn macros_text(&self) -> Option<&str> {
        self.widget(macro_hub::MACROS_FIELD).and_then(|w| w.as_str())
    }

    fn set_macros_text(&mut self, text: String) {
        match self.widget_mut(macro_hub::MACROS_FIELD) {
            Some(widget) => widget.value = Value::String(text),
            None => log::warn!(
                "Node {} has no {} field; macros not saved",
                self.id,
                macro_hub::MACROS_FIELD
            ),
        }
    }
}

/// Bare text field, for hosts that keep the list outside a node
impl MacroHost for String {
    fn macros_text(&self) -> Option<&str> {
        Some(self.as_str())
    }

    fn set_macros_text(&mut self, text: String) {
        *self = text;
    }
}

/// Parse a persisted macro list
///
/// Fails only when the text is not a JSON array. Entries that do not
/// deserialize as a macro are logged and dropped.
pub fn parse_macros(text: &str) -> Result<Vec<Macro>> {
    let entries: Vec<Value> = serde_json::from_str(text).map_err(MacroError::InvalidMacroList)?;
    Ok(entries
        .into_iter()
        .filter_map(|entry| {
            serde_json::from_value::<Macro>(entry)
                .map_err(MacroError::InvalidMacroList)
                .warn_on_err()
        })
        .collect())
}

/// Canonical persisted form of a macro list
pub fn serialize_macros(macros: &[Macro]) -> Result<String> {
    serde_json::to_string_pretty(macros).map_err(MacroError::Serialize)
}

/// Read a host's macro list, treating anything unreadable as empty
pub fn read_macros<H: MacroHost + ?Sized>(host: &H) -> Vec<Macro> {
    match host.macros_text() {
        Some(text) if !text.trim().is_empty() => {
            parse_macros(text).warn_on_err().unwrap_or_default()
        }
        _ => Vec::new(),
    }
}

fn fresh_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// CRUD view over one host's macro list
pub struct MacroStore<'a, H: MacroHost + ?Sized> {
    host: &'a mut H,
}

impl<'a, H: MacroHost + ?Sized> MacroStore<'a, H> {
    pub fn new(host: &'a mut H) -> Self {
        Self { host }
    }

    /// All macros in insertion order
    pub fn list(&self) -> Vec<Macro> {
        read_macros(&*self.host)
    }

    pub fn get(&self, id: &str) -> Option<Macro> {
        self.list().into_iter().find(|m| m.id == id)
    }

    /// Append a macro and return it as stored
    ///
    /// A missing id, or one already used in this list, is replaced by a fresh one.
    pub fn add(&mut self, macro_def: Macro) -> Macro {
        let mut macros = self.list();
        let mut macro_def = tidy(macro_def);
        if macro_def.id.is_empty() || macros.iter().any(|m| m.id == macro_def.id) {
            macro_def.id = fresh_id();
        }
        macros.push(macro_def.clone());
        self.write(&macros);
        macro_def
    }

    /// Replace the macro with the same id in place, or append it if none matches
    pub fn update(&mut self, macro_def: Macro) -> Macro {
        let mut macros = self.list();
        let mut macro_def = tidy(macro_def);
        if macro_def.id.is_empty() {
            macro_def.id = fresh_id();
        }
        match macros.iter_mut().find(|m| m.id == macro_def.id) {
            Some(existing) => *existing = macro_def.clone(),
            None => macros.push(macro_def.clone()),
        }
        self.write(&macros);
        macro_def
    }

    /// Remove a macro by id; returns whether one was removed
    pub fn remove(&mut self, id: &str) -> bool {
        let mut macros = self.list();
        let before = macros.len();
        macros.retain(|m| m.id != id);
        let removed = macros.len() != before;
        if removed {
            self.write(&macros);
        }
        removed
    }

    fn write(&mut self, macros: &[Macro]) {
        if let Some(text) = serialize_macros(macros).log_err() {
            self.host.set_macros_text(text);
        }
    }
}

/// Editor-form normalization applied on save
fn tidy(mut macro_def: Macro) -> Macro {
    macro_def.label = macro_def.label.trim().to_string();
    macro_def.hotkey = macro_def.hotkey.trim().to_string();
    macro_def
}

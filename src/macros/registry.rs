//! Hotkey registry - combo to macro lookup
//!
//! The registry is a derived cache: it is rebuilt from scratch whenever any
//! hub's macro list changes and is never patched in place. When several
//! active macros claim the same combo, the one visited last wins. Hosts rely
//! on that ordering to override a shortcut by adding a later macro, so it is
//! kept as is.

use super::hotkey::combo_key;
use super::model::Macro;
use super::store::read_macros;
use crate::nodes::NodeGraph;
use log::debug;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Combo → macro lookup table
#[derive(Debug, Clone, Default)]
pub struct HotkeyRegistry {
    bindings: HashMap<String, Macro>,
}

/// A combo claimed by more than one active macro
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyConflict {
    pub combo: String,
    /// Ids of every claimant in visit order; the last one is bound
    pub macro_ids: Vec<String>,
}

impl HotkeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from macros in visit order
    pub fn rebuild<'a, I>(macros: I) -> Self
    where
        I: IntoIterator<Item = &'a Macro>,
    {
        let mut bindings = HashMap::new();
        for macro_def in macros.into_iter().filter(|m| m.is_bound()) {
            bindings.insert(combo_key(&macro_def.hotkey), macro_def.clone());
        }
        Self { bindings }
    }

    /// Build one registry from every macro hub, hubs in ascending node id order
    pub fn rebuild_from_graph(graph: &NodeGraph) -> Self {
        let macros: Vec<Macro> = graph.macro_hubs().flat_map(|hub| read_macros(hub)).collect();
        let registry = Self::rebuild(&macros);
        debug!(
            "Rebuilt hotkey registry: {} bindings from {} macros",
            registry.len(),
            macros.len()
        );
        registry
    }

    pub fn lookup(&self, combo: &str) -> Option<&Macro> {
        self.bindings.get(combo)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bound combos in sorted order
    pub fn combos(&self) -> Vec<&str> {
        let mut combos: Vec<&str> = self.bindings.keys().map(|k| k.as_str()).collect();
        combos.sort_unstable();
        combos
    }

    /// Combos claimed by more than one active macro, sorted by combo
    ///
    /// Reporting only; the binding is still decided by visit order.
    pub fn conflicts<'a, I>(macros: I) -> Vec<HotkeyConflict>
    where
        I: IntoIterator<Item = &'a Macro>,
    {
        let mut claims: HashMap<String, Vec<String>> = HashMap::new();
        for macro_def in macros.into_iter().filter(|m| m.is_bound()) {
            claims
                .entry(combo_key(&macro_def.hotkey))
                .or_default()
                .push(macro_def.id.clone());
        }

        let mut conflicts: Vec<HotkeyConflict> = claims
            .into_iter()
            .filter(|(_, ids)| ids.len() > 1)
            .map(|(combo, macro_ids)| HotkeyConflict { combo, macro_ids })
            .collect();
        conflicts.sort_by(|a, b| a.combo.cmp(&b.combo));
        conflicts
    }
}

/// Registry shared between the rebuild path and the key handler
///
/// Readers take the read lock for a single lookup; a rebuild swaps the whole
/// table under the write lock, so a key event sees either the old or the new
/// table and never a mix.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<HotkeyRegistry>>,
}

impl SharedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the table wholesale
    pub fn replace(&self, registry: HotkeyRegistry) {
        match self.inner.write() {
            Ok(mut guard) => *guard = registry,
            Err(poisoned) => *poisoned.into_inner() = registry,
        }
    }

    /// Rebuild from the graph and swap in the result; returns the binding count
    pub fn rebuild_from_graph(&self, graph: &NodeGraph) -> usize {
        let registry = HotkeyRegistry::rebuild_from_graph(graph);
        let count = registry.len();
        self.replace(registry);
        count
    }

    pub fn lookup(&self, combo: &str) -> Option<Macro> {
        match self.inner.read() {
            Ok(guard) => guard.lookup(combo).cloned(),
            Err(poisoned) => poisoned.into_inner().lookup(combo).cloned(),
        }
    }

    /// Copy of the current table
    pub fn snapshot(&self) -> HotkeyRegistry {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

/// Process-wide registry used by the default dispatcher
static GLOBAL_REGISTRY: Lazy<SharedRegistry> = Lazy::new(SharedRegistry::new);

pub fn global() -> &'static SharedRegistry {
    &GLOBAL_REGISTRY
}

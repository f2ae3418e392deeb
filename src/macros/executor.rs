//! Macro execution against the node graph
//!
//! The executor only sees the graph through [`GraphAccess`]. It keeps no
//! state between invocations, never panics on bad input and reports what
//! happened as a [`MacroOutcome`]. Only a successful change marks the canvas
//! dirty.

use super::coerce::{coerce, next_in_cycle};
use super::model::{Macro, MacroMode};
use crate::error::{MacroError, Result};
use crate::nodes::{NodeId, WidgetKind};
use log::{log, Level};
use serde_json::Value;

/// Snapshot of one parameter as the executor needs it
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterInfo {
    pub kind: WidgetKind,
    pub value: Value,
    /// Fixed set of allowed values, if declared
    pub options: Option<Vec<Value>>,
}

/// Capabilities the executor needs from the host graph
pub trait GraphAccess {
    fn has_node(&self, node_id: NodeId) -> bool;

    /// Look up a named parameter on a node
    fn parameter(&self, node_id: NodeId, name: &str) -> Option<ParameterInfo>;

    /// Write a parameter value; returns false if the parameter does not exist
    fn set_parameter(&mut self, node_id: NodeId, name: &str, value: Value) -> bool;

    fn select_node(&mut self, node_id: NodeId);

    fn center_on_node(&mut self, node_id: NodeId);

    /// Request a redraw of the canvas
    fn mark_canvas_dirty(&mut self);
}

/// Which reference failed to resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingTarget {
    Node(NodeId),
    Parameter { node_id: NodeId, param: String },
}

/// Why a resolved macro did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// set_static with no value configured
    EmptyValue,
    /// set_static text that is not a number, aimed at a numeric parameter
    NotNumeric,
    /// toggle on a parameter that is neither boolean nor enumerated
    NotCyclable,
    /// preset_cycle text that is not a JSON array
    InvalidPresets,
    /// preset_cycle with an empty array
    EmptyPresets,
}

/// Result of one macro invocation
#[derive(Debug, Clone, PartialEq)]
pub enum MacroOutcome {
    /// Target node selected and centered
    Focused(NodeId),
    /// Parameter written
    Assigned { node_id: NodeId, param: String, value: Value },
    /// Target node or parameter does not exist
    Unresolved(MissingTarget),
    /// Target resolved but nothing was written
    Skipped(SkipReason),
}

impl MacroOutcome {
    /// Whether the invocation changed anything visible
    pub fn changed(&self) -> bool {
        matches!(self, MacroOutcome::Focused(_) | MacroOutcome::Assigned { .. })
    }
}

/// Map an internal failure to the outcome reported to callers
fn failure_outcome(err: MacroError) -> MacroOutcome {
    match err {
        MacroError::MissingNode(node_id) => MacroOutcome::Unresolved(MissingTarget::Node(node_id)),
        MacroError::MissingParameter { node_id, param } => {
            MacroOutcome::Unresolved(MissingTarget::Parameter { node_id, param })
        }
        MacroError::EmptyPresets => MacroOutcome::Skipped(SkipReason::EmptyPresets),
        _ => MacroOutcome::Skipped(SkipReason::InvalidPresets),
    }
}

/// Log level for an outcome; a resolved macro that did nothing is worth a warning
fn log_level(outcome: &MacroOutcome) -> Level {
    match outcome {
        MacroOutcome::Skipped(_) => Level::Warn,
        _ => Level::Debug,
    }
}

/// Execute a macro against the graph
pub fn execute<G: GraphAccess + ?Sized>(macro_def: &Macro, graph: &mut G) -> MacroOutcome {
    let outcome = run(macro_def, graph).unwrap_or_else(failure_outcome);
    if outcome.changed() {
        graph.mark_canvas_dirty();
    }
    log!(
        log_level(&outcome),
        "Macro {} ({}) -> {:?}",
        macro_def.id,
        macro_def.mode,
        outcome
    );
    outcome
}

fn run<G: GraphAccess + ?Sized>(macro_def: &Macro, graph: &mut G) -> Result<MacroOutcome> {
    let node_id = macro_def.target_node_id;
    if !graph.has_node(node_id) {
        return Err(MacroError::MissingNode(node_id));
    }

    let next = match macro_def.mode {
        MacroMode::Jump => {
            graph.select_node(node_id);
            graph.center_on_node(node_id);
            return Ok(MacroOutcome::Focused(node_id));
        }
        MacroMode::SetStatic => {
            static_value(&macro_def.raw_value, &resolve_parameter(graph, macro_def)?)
        }
        MacroMode::Toggle => toggled_value(&resolve_parameter(graph, macro_def)?),
        MacroMode::PresetCycle => {
            let param = resolve_parameter(graph, macro_def)?;
            Ok(next_preset(&macro_def.raw_value, &param.value)?)
        }
    };

    let value = match next {
        Ok(value) => value,
        Err(reason) => return Ok(MacroOutcome::Skipped(reason)),
    };

    if !graph.set_parameter(node_id, &macro_def.target_param, value.clone()) {
        return Err(missing_parameter(macro_def));
    }

    Ok(MacroOutcome::Assigned {
        node_id,
        param: macro_def.target_param.clone(),
        value,
    })
}

fn resolve_parameter<G: GraphAccess + ?Sized>(
    graph: &G,
    macro_def: &Macro,
) -> Result<ParameterInfo> {
    graph
        .parameter(macro_def.target_node_id, &macro_def.target_param)
        .ok_or_else(|| missing_parameter(macro_def))
}

fn missing_parameter(macro_def: &Macro) -> MacroError {
    MacroError::MissingParameter {
        node_id: macro_def.target_node_id,
        param: macro_def.target_param.clone(),
    }
}

fn static_value(raw: &str, param: &ParameterInfo) -> std::result::Result<Value, SkipReason> {
    // Empty means "no value configured", not "assign the empty string"
    if raw.is_empty() {
        return Err(SkipReason::EmptyValue);
    }
    coerce(raw, &param.kind).ok_or(SkipReason::NotNumeric)
}

fn toggled_value(param: &ParameterInfo) -> std::result::Result<Value, SkipReason> {
    if let Value::Bool(current) = param.value {
        return Ok(Value::Bool(!current));
    }
    param
        .options
        .as_deref()
        .and_then(|options| next_in_cycle(options, &param.value))
        .cloned()
        .ok_or(SkipReason::NotCyclable)
}

fn next_preset(raw: &str, current: &Value) -> Result<Value> {
    let presets = parse_presets(raw)?;
    next_in_cycle(&presets, current).cloned().ok_or(MacroError::EmptyPresets)
}

/// Parse a preset_cycle value into its list of presets
pub fn parse_presets(raw: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(raw).map_err(MacroError::InvalidPresets)? {
        Value::Array(values) if values.is_empty() => Err(MacroError::EmptyPresets),
        Value::Array(values) => Ok(values),
        _ => Err(MacroError::PresetsNotArray),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    /// Minimal in-memory graph recording every side effect
    #[derive(Default)]
    struct FakeGraph {
        params: HashMap<(NodeId, String), ParameterInfo>,
        nodes: Vec<NodeId>,
        selected: Vec<NodeId>,
        centered: Vec<NodeId>,
        dirty: usize,
    }

    impl FakeGraph {
        fn with_param(
            mut self,
            node_id: NodeId,
            name: &str,
            kind: WidgetKind,
            value: Value,
        ) -> Self {
            if !self.nodes.contains(&node_id) {
                self.nodes.push(node_id);
            }
            self.params.insert(
                (node_id, name.to_string()),
                ParameterInfo { kind, value, options: None },
            );
            self
        }

        fn with_options(mut self, node_id: NodeId, name: &str, options: Vec<Value>) -> Self {
            if let Some(param) = self.params.get_mut(&(node_id, name.to_string())) {
                param.options = Some(options);
            }
            self
        }

        fn value(&self, node_id: NodeId, name: &str) -> Option<&Value> {
            self.params.get(&(node_id, name.to_string())).map(|p| &p.value)
        }
    }

    impl GraphAccess for FakeGraph {
        fn has_node(&self, node_id: NodeId) -> bool {
            self.nodes.contains(&node_id)
        }

        fn parameter(&self, node_id: NodeId, name: &str) -> Option<ParameterInfo> {
            self.params.get(&(node_id, name.to_string())).cloned()
        }

        fn set_parameter(&mut self, node_id: NodeId, name: &str, value: Value) -> bool {
            match self.params.get_mut(&(node_id, name.to_string())) {
                Some(param) => {
                    param.value = value;
                    true
                }
                None => false,
            }
        }

        fn select_node(&mut self, node_id: NodeId) {
            self.selected.push(node_id);
        }

        fn center_on_node(&mut self, node_id: NodeId) {
            self.centered.push(node_id);
        }

        fn mark_canvas_dirty(&mut self) {
            self.dirty += 1;
        }
    }

    fn graph() -> FakeGraph {
        FakeGraph::default()
            .with_param(1, "steps", WidgetKind::Number, json!(20))
            .with_param(1, "enabled", WidgetKind::Boolean, json!(false))
            .with_param(1, "sampler", WidgetKind::Combo, json!("c"))
            .with_options(1, "sampler", vec![json!("a"), json!("b"), json!("c")])
            .with_param(1, "notes", WidgetKind::Text, json!("hello"))
    }

    #[test]
    fn test_jump_selects_and_centers_without_writes() {
        let mut g = graph();
        let before = g.params.clone();
        let outcome = execute(&Macro::new(MacroMode::Jump, 1, "does_not_matter"), &mut g);
        assert_eq!(outcome, MacroOutcome::Focused(1));
        assert_eq!(g.selected, vec![1]);
        assert_eq!(g.centered, vec![1]);
        assert_eq!(g.params, before);
        assert_eq!(g.dirty, 1);
    }

    #[test]
    fn test_dangling_node_is_silent_for_every_mode() {
        for mode in MacroMode::ALL {
            let mut g = graph();
            let m = Macro::new(mode, 42, "steps").with_value("[1,2]");
            assert_eq!(execute(&m, &mut g), MacroOutcome::Unresolved(MissingTarget::Node(42)));
            assert_eq!(g.dirty, 0);
            assert!(g.selected.is_empty());
        }
    }

    #[test]
    fn test_missing_parameter() {
        let mut g = graph();
        let m = Macro::new(MacroMode::Toggle, 1, "cfg");
        assert_eq!(
            execute(&m, &mut g),
            MacroOutcome::Unresolved(MissingTarget::Parameter {
                node_id: 1,
                param: "cfg".to_string()
            })
        );
        assert_eq!(g.dirty, 0);
    }

    #[test]
    fn test_set_static_numeric() {
        let mut g = graph();
        let m = Macro::new(MacroMode::SetStatic, 1, "steps").with_value("35");
        assert!(execute(&m, &mut g).changed());
        assert_eq!(g.value(1, "steps"), Some(&json!(35)));
        assert_eq!(g.dirty, 1);
    }

    #[test]
    fn test_set_static_rejects_non_numeric() {
        let mut g = graph();
        let m = Macro::new(MacroMode::SetStatic, 1, "steps").with_value("abc");
        assert_eq!(execute(&m, &mut g), MacroOutcome::Skipped(SkipReason::NotNumeric));
        assert_eq!(g.value(1, "steps"), Some(&json!(20)));
        assert_eq!(g.dirty, 0);
    }

    #[test]
    fn test_set_static_empty_value_is_skipped() {
        let mut g = graph();
        let m = Macro::new(MacroMode::SetStatic, 1, "notes");
        assert_eq!(execute(&m, &mut g), MacroOutcome::Skipped(SkipReason::EmptyValue));
        assert_eq!(g.value(1, "notes"), Some(&json!("hello")));
    }

    #[test]
    fn test_set_static_structured_text() {
        let mut g = graph();
        let m = Macro::new(MacroMode::SetStatic, 1, "notes").with_value("[1,2]");
        execute(&m, &mut g);
        assert_eq!(g.value(1, "notes"), Some(&json!([1, 2])));

        let literal = Macro::new(MacroMode::SetStatic, 1, "notes").with_value("plain words");
        execute(&literal, &mut g);
        assert_eq!(g.value(1, "notes"), Some(&json!("plain words")));
    }

    #[test]
    fn test_toggle_boolean() {
        let mut g = graph();
        let m = Macro::new(MacroMode::Toggle, 1, "enabled");
        execute(&m, &mut g);
        assert_eq!(g.value(1, "enabled"), Some(&json!(true)));
        execute(&m, &mut g);
        assert_eq!(g.value(1, "enabled"), Some(&json!(false)));
    }

    #[test]
    fn test_toggle_enumeration_wraps() {
        let mut g = graph();
        let m = Macro::new(MacroMode::Toggle, 1, "sampler");
        execute(&m, &mut g);
        assert_eq!(g.value(1, "sampler"), Some(&json!("a")));
        execute(&m, &mut g);
        assert_eq!(g.value(1, "sampler"), Some(&json!("b")));
    }

    #[test]
    fn test_toggle_unknown_current_starts_at_first() {
        let mut g = graph().with_param(2, "mode", WidgetKind::Combo, json!("zzz"));
        g = g.with_options(2, "mode", vec![json!("x"), json!("y")]);
        execute(&Macro::new(MacroMode::Toggle, 2, "mode"), &mut g);
        assert_eq!(g.value(2, "mode"), Some(&json!("x")));
    }

    #[test]
    fn test_toggle_plain_parameter_is_noop() {
        let mut g = graph();
        let outcome = execute(&Macro::new(MacroMode::Toggle, 1, "notes"), &mut g);
        assert_eq!(outcome, MacroOutcome::Skipped(SkipReason::NotCyclable));

        let mut g = graph().with_options(1, "notes", vec![]);
        let outcome = execute(&Macro::new(MacroMode::Toggle, 1, "notes"), &mut g);
        assert_eq!(outcome, MacroOutcome::Skipped(SkipReason::NotCyclable));
        assert_eq!(g.dirty, 0);
    }

    #[test]
    fn test_preset_cycle() {
        let mut g = graph().with_param(3, "cfg", WidgetKind::Number, json!(2));
        let m = Macro::new(MacroMode::PresetCycle, 3, "cfg").with_value("[1,2,3]");
        execute(&m, &mut g);
        assert_eq!(g.value(3, "cfg"), Some(&json!(3)));
        execute(&m, &mut g);
        assert_eq!(g.value(3, "cfg"), Some(&json!(1)));

        let mut g = graph().with_param(3, "cfg", WidgetKind::Number, json!(7.5));
        execute(&m, &mut g);
        assert_eq!(g.value(3, "cfg"), Some(&json!(1)));
    }

    #[test]
    fn test_preset_cycle_matches_float_current() {
        let mut g = graph().with_param(3, "cfg", WidgetKind::Number, json!(2.0));
        let m = Macro::new(MacroMode::PresetCycle, 3, "cfg").with_value("[1,2,3]");
        execute(&m, &mut g);
        assert_eq!(g.value(3, "cfg"), Some(&json!(3)));
    }

    #[test]
    fn test_preset_cycle_bad_input_is_noop() {
        for (raw, reason) in [
            ("", SkipReason::InvalidPresets),
            ("[1,", SkipReason::InvalidPresets),
            ("{\"a\":1}", SkipReason::InvalidPresets),
            ("[]", SkipReason::EmptyPresets),
        ] {
            let mut g = graph();
            let m = Macro::new(MacroMode::PresetCycle, 1, "steps").with_value(raw);
            assert_eq!(execute(&m, &mut g), MacroOutcome::Skipped(reason), "{:?}", raw);
            assert_eq!(g.value(1, "steps"), Some(&json!(20)));
            assert_eq!(g.dirty, 0);
        }
    }

    #[test]
    fn test_only_skips_log_as_warnings() {
        assert_eq!(log_level(&MacroOutcome::Skipped(SkipReason::InvalidPresets)), Level::Warn);
        assert_eq!(log_level(&MacroOutcome::Focused(1)), Level::Debug);
        assert_eq!(
            log_level(&MacroOutcome::Unresolved(MissingTarget::Node(9))),
            Level::Debug
        );
    }

    #[test]
    fn test_parse_presets() {
        assert_eq!(parse_presets("[\"a\", 1]").expect("array"), vec![json!("a"), json!(1)]);
        assert!(matches!(parse_presets("3"), Err(MacroError::PresetsNotArray)));
        assert!(matches!(parse_presets("[]"), Err(MacroError::EmptyPresets)));
        assert!(matches!(parse_presets("nope"), Err(MacroError::InvalidPresets(_))));
    }
}

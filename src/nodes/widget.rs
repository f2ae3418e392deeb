//! Named node parameters ("widgets") and their interface rendering

use egui::{ComboBox, DragValue, Ui};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared kind of a widget
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    /// Numeric slider/drag value
    Number,
    /// Selection from a fixed list of options
    Combo,
    /// Free-form text
    Text,
    /// Boolean checkbox
    Boolean,
    /// Anything else a node chooses to expose
    Other(String),
}

impl WidgetKind {
    /// Type name as exposed to macro editors
    pub fn type_name(&self) -> &str {
        match self {
            WidgetKind::Number => "number",
            WidgetKind::Combo => "combo",
            WidgetKind::Text => "text",
            WidgetKind::Boolean => "checkbox",
            WidgetKind::Other(name) => name,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, WidgetKind::Number)
    }
}

/// A named, typed, mutable value exposed by a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub name: String,
    pub kind: WidgetKind,
    pub value: Value,
    /// Fixed set of allowed values, if the widget declares one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<Value>>,
    /// Render text widgets as a multi-line editor
    #[serde(default)]
    pub multiline: bool,
}

impl Widget {
    pub fn new(name: impl Into<String>, kind: WidgetKind, value: Value) -> Self {
        Self {
            name: name.into(),
            kind,
            value,
            options: None,
            multiline: false,
        }
    }

    pub fn number(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, WidgetKind::Number, Value::from(value))
    }

    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, WidgetKind::Text, Value::String(value.into()))
    }

    pub fn multiline_text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            multiline: true,
            ..Self::text(name, value)
        }
    }

    pub fn boolean(name: impl Into<String>, value: bool) -> Self {
        Self::new(name, WidgetKind::Boolean, Value::Bool(value))
    }

    /// Combo widget over string options; `selected` need not be one of them
    pub fn combo(name: impl Into<String>, options: &[&str], selected: &str) -> Self {
        Self {
            options: Some(options.iter().map(|o| Value::String(o.to_string())).collect()),
            ..Self::new(name, WidgetKind::Combo, Value::String(selected.to_string()))
        }
    }

    /// Attach a fixed option list to any widget kind
    pub fn with_options(mut self, options: Vec<Value>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.value.as_bool()
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.value.as_f64()
    }

    /// Render the widget in the UI and return if it changed
    pub fn render(&mut self, ui: &mut Ui) -> bool {
        let label = self.name.clone();
        match self.kind {
            WidgetKind::Number => {
                let mut number = self.value.as_f64().unwrap_or(0.0);
                let changed = ui
                    .add(DragValue::new(&mut number).prefix(format!("{}: ", label)))
                    .changed();
                if changed {
                    self.value = Value::from(number);
                }
                changed
            }
            WidgetKind::Boolean => {
                let mut checked = self.value.as_bool().unwrap_or(false);
                let changed = ui.checkbox(&mut checked, label).changed();
                if changed {
                    self.value = Value::Bool(checked);
                }
                changed
            }
            WidgetKind::Text if self.multiline => {
                let mut text = display_text(&self.value);
                ui.label(label);
                let changed = ui.text_edit_multiline(&mut text).changed();
                if changed {
                    self.value = Value::String(text);
                }
                changed
            }
            WidgetKind::Text => {
                let mut text = display_text(&self.value);
                let changed = ui
                    .horizontal(|ui| {
                        ui.label(label);
                        ui.text_edit_singleline(&mut text)
                    })
                    .inner
                    .changed();
                if changed {
                    self.value = Value::String(text);
                }
                changed
            }
            WidgetKind::Combo | WidgetKind::Other(_) => self.render_options(ui, &label),
        }
    }

    fn render_options(&mut self, ui: &mut Ui, label: &str) -> bool {
        let Some(options) = self.options.clone() else {
            ui.label(format!("{}: {}", label, display_text(&self.value)));
            return false;
        };

        let mut changed = false;
        ComboBox::from_label(label)
            .selected_text(display_text(&self.value))
            .show_ui(ui, |ui| {
                for option in options {
                    let text = display_text(&option);
                    if ui.selectable_value(&mut self.value, option, text).changed() {
                        changed = true;
                    }
                }
            });
        changed
    }
}

/// Strings without quotes, everything else as compact JSON
pub fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

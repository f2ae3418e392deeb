//! Constant node computation functions

use crate::nodes::Node;
use serde_json::Value;

/// Output of a Constant node: its value converted to the selected output type
///
/// A disabled node outputs `null`.
pub fn process(node: &Node) -> Value {
    if !node.widget("enabled").and_then(|w| w.as_bool()).unwrap_or(true) {
        return Value::Null;
    }

    let value = node.widget("value").and_then(|w| w.as_f64()).unwrap_or(0.0);
    match node.widget("output_type").and_then(|w| w.as_str()).unwrap_or("float") {
        "integer" => Value::from(value.round() as i64),
        "text" => Value::String(value.to_string()),
        _ => Value::from(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::data::constant::ConstantNodeFactory;
    use crate::nodes::NodeFactory;
    use egui::Pos2;
    use serde_json::json;

    fn constant(value: f64, output_type: &str) -> Node {
        let mut node = ConstantNodeFactory::create(Pos2::ZERO);
        if let Some(w) = node.widget_mut("value") {
            w.value = json!(value);
        }
        if let Some(w) = node.widget_mut("output_type") {
            w.value = json!(output_type);
        }
        node
    }

    #[test]
    fn test_constant_float() {
        assert_eq!(process(&constant(3.5, "float")), json!(3.5));
    }

    #[test]
    fn test_constant_integer() {
        assert_eq!(process(&constant(2.6, "integer")), json!(3));
    }

    #[test]
    fn test_constant_text() {
        assert_eq!(process(&constant(1.5, "text")), json!("1.5"));
    }

    #[test]
    fn test_constant_disabled() {
        let mut node = constant(1.0, "float");
        if let Some(w) = node.widget_mut("enabled") {
            w.value = json!(false);
        }
        assert_eq!(process(&node), Value::Null);
    }

    #[test]
    fn test_constant_defaults() {
        let node = ConstantNodeFactory::create(Pos2::ZERO);
        assert_eq!(node.title, "Constant");
        assert_eq!(process(&node), json!(0.0));
    }
}

//! Constant node implementation
//!
//! - mod.rs: node metadata and factory implementation
//! - functions.rs: output computation

mod functions;

pub use functions::*;

use crate::nodes::widget::Widget;
use crate::nodes::{NodeCategory, NodeFactory, NodeMetadata};
use egui::Color32;

/// Output type options for the `output_type` combo
pub const OUTPUT_TYPES: [&str; 3] = ["float", "integer", "text"];

/// Constant node that outputs a fixed value
#[derive(Default)]
pub struct ConstantNodeFactory;

impl NodeFactory for ConstantNodeFactory {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            "Data_Constant",
            "Constant",
            NodeCategory::new(&["Data", "Source"]),
            "Outputs a constant value with interface panel controls",
        )
        .with_color(Color32::from_rgb(55, 45, 65))
        .with_widgets(vec![
            Widget::number("value", 0.0),
            Widget::text("label", ""),
            Widget::boolean("enabled", true),
            Widget::combo("output_type", &OUTPUT_TYPES, OUTPUT_TYPES[0]),
        ])
        .with_outputs(vec!["Value"])
    }
}

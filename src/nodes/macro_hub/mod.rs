//! Macro Hub node implementation
//!
//! - mod.rs: node metadata and factory implementation
//! - logic.rs: output, override pass and panel action handling
//! - parameters.rs: interface panel for listing and editing macros

pub mod logic;
pub mod parameters;

pub use logic::{MacroHubLogic, PanelEffect};
pub use parameters::{MacroEditorForm, MacroHubPanel, MacroPanelAction};

use crate::constants::macro_hub;
use crate::nodes::widget::Widget;
use crate::nodes::{NodeCategory, NodeFactory, NodeMetadata};
use egui::{Color32, Vec2};

/// Hub node that stores keyboard macros for the whole graph
#[derive(Default)]
pub struct MacroHubNodeFactory;

impl NodeFactory for MacroHubNodeFactory {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            macro_hub::CLASS_NAME,
            macro_hub::DISPLAY_NAME,
            NodeCategory::new(macro_hub::CATEGORY),
            "Stores macro definitions and binds them to hotkeys",
        )
        .with_color(Color32::from_rgb(70, 55, 40))
        .with_size_hint(Vec2::new(180.0, 40.0))
        .with_widgets(vec![
            Widget::multiline_text(macro_hub::MACROS_FIELD, macro_hub::EMPTY_LIST),
            Widget::combo(
                macro_hub::APPLY_OVERRIDES_FIELD,
                &[macro_hub::OVERRIDES_DISABLED, macro_hub::OVERRIDES_ON_EXECUTION],
                macro_hub::OVERRIDES_DISABLED,
            ),
        ])
        .with_outputs(vec![macro_hub::OUTPUT_NAME])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Pos2;
    use serde_json::json;

    #[test]
    fn test_hub_defaults() {
        let hub = MacroHubNodeFactory::create(Pos2::ZERO);
        assert!(hub.is_macro_hub());
        assert_eq!(hub.widget(macro_hub::MACROS_FIELD).map(|w| w.multiline), Some(true));
        assert_eq!(hub.widget(macro_hub::MACROS_FIELD).and_then(|w| w.as_str()), Some("[]"));

        let overrides = hub.widget(macro_hub::APPLY_OVERRIDES_FIELD).expect("overrides widget");
        assert_eq!(overrides.value, json!("disabled"));
        assert_eq!(overrides.options, Some(vec![json!("disabled"), json!("on_execution")]));
    }
}

//! Application-wide constants and default values
//!
//! Centralized location for all hard-coded values to improve maintainability

/// Macro hub node identity and persisted field names
pub mod macro_hub {
    /// Node type name of the hub node
    pub const CLASS_NAME: &str = "MacroHub";

    /// Display name shown in menus and on the node
    pub const DISPLAY_NAME: &str = "Macro Hub";

    /// Menu category path
    pub const CATEGORY: &[&str] = &["Utility", "Macros"];

    /// Text widget holding the serialized macro list
    pub const MACROS_FIELD: &str = "macros_json";

    /// Combo widget selecting when overrides are applied
    pub const APPLY_OVERRIDES_FIELD: &str = "apply_overrides";

    /// Name of the hub's single output
    pub const OUTPUT_NAME: &str = "macros_json_out";

    /// Serialized form of an empty macro list
    pub const EMPTY_LIST: &str = "[]";

    /// `apply_overrides` option: never apply
    pub const OVERRIDES_DISABLED: &str = "disabled";

    /// `apply_overrides` option: apply active set_static macros before evaluation
    pub const OVERRIDES_ON_EXECUTION: &str = "on_execution";
}

/// Node system constants
pub mod node {
    /// Default node size in world units
    pub const DEFAULT_SIZE: [f32; 2] = [150.0, 30.0];

    /// Default node body color
    pub const DEFAULT_COLOR: [u8; 3] = [60, 60, 60];
}

/// Canvas view constants
pub mod viewport {
    /// Zoom clamp range
    pub const MIN_ZOOM: f32 = 0.1;
    pub const MAX_ZOOM: f32 = 5.0;

    /// Assumed canvas size before the first frame reports a real one
    pub const DEFAULT_VIEW_SIZE: [f32; 2] = [1280.0, 720.0];
}

/// Panel sizing constants
pub mod panel {
    /// Maximum height of the macro list before it scrolls
    pub const MACRO_LIST_MAX_HEIGHT: f32 = 180.0;

    /// Default side panel width in the demo application
    pub const SIDE_PANEL_WIDTH: f32 = 380.0;
}

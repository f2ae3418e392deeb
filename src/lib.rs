//! Nodle macros library
//!
//! Keyboard macros for a node graph editor: macro definitions stored on
//! Macro Hub nodes, a hotkey registry, a keyboard dispatcher and an executor
//! that jumps to nodes or rewrites their parameters.

pub mod constants;
pub mod editor;
pub mod error;
pub mod macros;
pub mod nodes;

// Re-export commonly used types
pub use error::{MacroError, Result, ResultExt};
pub use macros::{DispatchResult, Dispatcher, KeyEvent, Macro, MacroMode, MacroOutcome};

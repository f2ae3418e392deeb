//! Node editor - canvas, view state and file handling

pub mod canvas;
pub mod file_manager;
pub mod interaction;
pub mod viewport;

pub use canvas::{CanvasResponse, EditorCanvas};
pub use file_manager::FileManager;
pub use interaction::InteractionManager;
pub use viewport::Viewport;

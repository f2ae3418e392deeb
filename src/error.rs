//! Error types for the macro engine
//!
//! Nothing in the macro core is fatal. Internal helpers return [`Result`] and
//! propagate with `?`; the public surface turns failures into soft results
//! through [`ResultExt`], which logs and moves on.

use crate::nodes::NodeId;
use thiserror::Error;

/// Recoverable failures inside the macro engine
#[derive(Error, Debug)]
pub enum MacroError {
    #[error("macro list is not valid JSON: {0}")]
    InvalidMacroList(#[source] serde_json::Error),

    #[error("preset list is not valid JSON: {0}")]
    InvalidPresets(#[source] serde_json::Error),

    #[error("preset list must be a JSON array")]
    PresetsNotArray,

    #[error("preset list is empty")]
    EmptyPresets,

    #[error("node {0} does not exist")]
    MissingNode(NodeId),

    #[error("node {node_id} has no parameter '{param}'")]
    MissingParameter { node_id: NodeId, param: String },

    #[error("failed to serialize macro list: {0}")]
    Serialize(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MacroError>;

/// Log-and-continue conversion for recoverable results
pub trait ResultExt<T> {
    /// Log the error at error level and return `None`
    fn log_err(self) -> Option<T>;
    /// Log the error at warn level and return `None`
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(e) => {
                let caller = std::panic::Location::caller();
                log::error!("{} ({}:{})", e, caller.file(), caller.line());
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(e) => {
                let caller = std::panic::Location::caller();
                log::warn!("{} ({}:{})", e, caller.file(), caller.line());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MacroError::MissingParameter { node_id: 3, param: "seed".to_string() };
        assert_eq!(err.to_string(), "node 3 has no parameter 'seed'");
        assert_eq!(MacroError::MissingNode(7).to_string(), "node 7 does not exist");
    }

    #[test]
    fn test_result_ext_swallows_errors() {
        let ok: Result<u8> = Ok(4);
        assert_eq!(ok.warn_on_err(), Some(4));

        let err: Result<u8> = Err(MacroError::PresetsNotArray);
        assert_eq!(err.log_err(), None);
    }
}

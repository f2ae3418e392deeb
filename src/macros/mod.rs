//! Keyboard macros over the node graph
//!
//! Macros live on Macro Hub nodes ([`store`]), are indexed by combo in the
//! [`registry`], routed from key events by the [`dispatcher`] and applied by
//! the [`executor`].

pub mod candidates;
pub mod coerce;
pub mod dispatcher;
pub mod executor;
pub mod hotkey;
pub mod model;
pub mod registry;
pub mod store;

pub use candidates::{parameter_candidates, ParameterCandidate};
pub use coerce::coerce;
pub use dispatcher::{DispatchResult, Dispatcher};
pub use executor::{execute, GraphAccess, MacroOutcome, MissingTarget, ParameterInfo, SkipReason};
pub use hotkey::{normalize, KeyEvent};
pub use model::{Macro, MacroMode};
pub use registry::{HotkeyConflict, HotkeyRegistry, SharedRegistry};
pub use store::{read_macros, MacroHost, MacroStore};

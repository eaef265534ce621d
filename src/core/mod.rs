//! Core value types shared by the graph and the orchestrator.
//!
//! - States via the `State` trait
//! - Transition keys naming a single edge
//! - Immutable history of committed edges

mod history;
mod key;
mod state;

pub use history::{StateHistory, StateTransition};
pub use key::{TransitionKey, SEPARATOR};
pub use state::State;

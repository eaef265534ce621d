//! Errors raised while routing and executing transitions.

use thiserror::Error;

/// Failure signalled by a guard.
///
/// Guards are free to use any error type; the orchestrator only halts on it
/// and hands it back untouched.
pub type GuardError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur during `transition` and `next`.
#[derive(Debug, Error)]
pub enum MachineError {
    /// Raised by path search on a strict graph when no route exists.
    #[error("No transition path found from '{from}' to '{to}'")]
    NoTransitionFound { from: String, to: String },

    /// Raised by `next` when no automatic edge leaves the current state.
    #[error("Entity is in a final state: {state}")]
    EntityInFinalState { state: String },

    /// A guard vetoed an edge. Display and source are the guard's own.
    #[error(transparent)]
    GuardRejected(GuardError),
}

impl MachineError {
    /// Returns the guard's failure if this error came from a guard.
    pub fn guard_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            MachineError::GuardRejected(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

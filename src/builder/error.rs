//! Build errors for state machine construction.

use crate::graph::ConfigError;
use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Graph configuration not specified. Call .graph(config) before .build()")]
    MissingGraph,

    #[error("State field accessor not specified. Call .field(accessor) or .stateful() before .build()")]
    MissingField,

    #[error("A guard is already bound to transition '{key}'")]
    DuplicateGuard { key: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

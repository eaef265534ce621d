//! Core State trait for graph states.
//!
//! States are plain values. Two states are the same state when they compare
//! equal; nothing else about them matters to the engine.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for values an entity's state field can hold.
///
/// # Required Traits
///
/// - `Clone`: states are copied into paths and history records
/// - `Eq` + `Hash`: states key the adjacency list and the manual set
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: graph configurations and history can be
///   loaded and stored
///
/// # Example
///
/// ```rust
/// use waypoint::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum OrderState {
///     Created,
///     Processing,
///     Fulfilled,
/// }
///
/// impl State for OrderState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Created => "CREATED",
///             Self::Processing => "PROCESSING",
///             Self::Fulfilled => "FULFILLED",
///         }
///     }
/// }
///
/// assert_eq!(OrderState::Created.name(), "CREATED");
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// The state's name, used for transition keys, diagrams and errors.
    ///
    /// Names must be unique across the states of one graph and must not
    /// contain [`SEPARATOR`](crate::core::SEPARATOR).
    fn name(&self) -> &str;
}

/// Strings are states, so graphs can come straight out of configuration.
impl State for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Pending,
        Processed,
        Fulfilled,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Pending => "pending",
                Self::Processed => "processed",
                Self::Fulfilled => "fulfilled",
            }
        }
    }

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(TestState::Pending.name(), "pending");
        assert_eq!(TestState::Processed.name(), "processed");
        assert_eq!(TestState::Fulfilled.name(), "fulfilled");
    }

    #[test]
    fn string_state_is_named_by_its_contents() {
        let state = String::from("SYNCHRONIZED");
        assert_eq!(state.name(), "SYNCHRONIZED");
    }

    #[test]
    fn state_equality_is_by_value() {
        let a = String::from("CREATED");
        let b = "CREATED".to_string();
        assert_eq!(a, b);
        assert_ne!(TestState::Pending, TestState::Processed);
    }

    #[test]
    fn state_serializes_correctly() {
        let state = TestState::Processed;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}

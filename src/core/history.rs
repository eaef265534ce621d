//! Transition history.
//!
//! Every orchestrator run returns the edges it committed, in order, as an
//! immutable [`StateHistory`].

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single committed edge.
///
/// # Example
///
/// ```rust
/// use waypoint::core::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: "pending".to_string(),
///     to: "processed".to_string(),
///     timestamp: Utc::now(),
///     guarded: true,
/// };
/// assert!(transition.guarded);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// When the state field was assigned
    pub timestamp: DateTime<Utc>,
    /// Whether a guard approved this edge (false when none was bound)
    pub guarded: bool,
}

/// Ordered history of committed edges.
///
/// History is immutable - [`record`](Self::record) returns a new history
/// with the transition appended.
///
/// # Example
///
/// ```rust
/// use waypoint::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: "CREATED".to_string(),
///         to: "SYNCHRONIZED".to_string(),
///         timestamp: Utc::now(),
///         guarded: false,
///     })
///     .record(StateTransition {
///         from: "SYNCHRONIZED".to_string(),
///         to: "FULFILLED".to_string(),
///         timestamp: Utc::now(),
///         guarded: false,
///     });
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3); // CREATED -> SYNCHRONIZED -> FULFILLED
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is left untouched.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the starting state followed by the `to` state of each
    /// transition. Empty when nothing was committed.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// State reached by the last committed edge.
    pub fn last_state(&self) -> Option<&S> {
        self.transitions.last().map(|t| &t.to)
    }

    /// Time between the first and last committed edge.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Get all transitions in commit order.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: &str, to: &str) -> StateTransition<String> {
        StateTransition {
            from: from.to_string(),
            to: to.to_string(),
            timestamp: Utc::now(),
            guarded: false,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<String> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last_state().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let new_history = history.record(edge("pending", "processed"));

        assert_eq!(history.len(), 0);
        assert_eq!(new_history.len(), 1);
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let history = StateHistory::new()
            .record(edge("pending", "processed"))
            .record(edge("processed", "synchronized"));

        let path = history.get_path();
        assert_eq!(path, vec!["pending", "processed", "synchronized"]);
        assert_eq!(history.last_state().map(String::as_str), Some("synchronized"));
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let history = StateHistory::new().record(edge("a", "b"));

        std::thread::sleep(std::time::Duration::from_millis(10));

        let history = history.record(edge("b", "c"));

        let duration = history.duration();
        assert!(duration.is_some());
        assert!(duration.unwrap() >= std::time::Duration::from_millis(10));
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let history = StateHistory::new().record(edge("a", "b"));
        assert_eq!(history.duration(), Some(std::time::Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::new().record(StateTransition {
            guarded: true,
            ..edge("failed", "fulfilled")
        });

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<String> = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}

//! Declarative transition trees and graph configuration.
//!
//! A graph is declared as a tree rooted at the initial state. Each node lists
//! the states reachable from it; a child is either a bare state or a nested
//! node that declares further edges of its own.
//!
//! ```json
//! {
//!   "root": {
//!     "state": "pending",
//!     "next": [
//!       { "state": "processed", "next": ["synchronized", "cancelled"] },
//!       "cancelled"
//!     ]
//!   },
//!   "manual": ["cancelled"],
//!   "strict": true
//! }
//! ```
//!
//! `next` may also be a single entry instead of a list, or omitted.

use crate::core::State;
use crate::graph::validation::ConfigError;
use serde::{Deserialize, Deserializer, Serialize};

/// One node of a declarative transition tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionSpec<S: State> {
    pub state: S,
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub next: Vec<NextState<S>>,
}

/// A child of a [`TransitionSpec`] node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged, bound = "")]
pub enum NextState<S: State> {
    /// A nested node declaring further edges.
    Node(TransitionSpec<S>),
    /// A bare target state.
    State(S),
}

impl<S: State> NextState<S> {
    /// The target state of the edge leading to this child.
    pub fn state(&self) -> &S {
        match self {
            NextState::Node(node) => &node.state,
            NextState::State(state) => state,
        }
    }
}

impl<S: State> TransitionSpec<S> {
    /// Create a node with no outgoing edges.
    pub fn new(state: S) -> Self {
        Self {
            state,
            next: Vec::new(),
        }
    }

    /// Add an edge to a bare state.
    pub fn to(mut self, state: S) -> Self {
        self.next.push(NextState::State(state));
        self
    }

    /// Add an edge to a nested node.
    pub fn then(mut self, node: TransitionSpec<S>) -> Self {
        self.next.push(NextState::Node(node));
        self
    }

    /// Every state mentioned in the tree, depth-first, repeats included.
    pub fn states(&self) -> Vec<&S> {
        fn walk<'a, S: State>(node: &'a TransitionSpec<S>, out: &mut Vec<&'a S>) {
            out.push(&node.state);
            for child in &node.next {
                match child {
                    NextState::Node(nested) => walk(nested, out),
                    NextState::State(state) => out.push(state),
                }
            }
        }

        let mut out = Vec::new();
        walk(self, &mut out);
        out
    }
}

#[derive(Deserialize)]
#[serde(untagged, bound = "")]
enum OneOrMany<S: State> {
    Many(Vec<NextState<S>>),
    One(NextState<S>),
}

fn one_or_many<'de, D, S>(deserializer: D) -> Result<Vec<NextState<S>>, D::Error>
where
    D: Deserializer<'de>,
    S: State,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(next) => next,
        OneOrMany::One(next) => vec![next],
    })
}

/// Construction-time input for a [`StateGraph`](crate::graph::StateGraph).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct GraphConfig<S: State> {
    /// Root of the declarative tree.
    pub root: TransitionSpec<S>,

    /// States reachable only through explicit transitions.
    #[serde(default)]
    pub manual: Vec<S>,

    /// Fail path searches that find no route instead of returning an empty path.
    #[serde(default)]
    pub strict: bool,
}

impl<S: State> GraphConfig<S> {
    pub fn new(root: TransitionSpec<S>) -> Self {
        Self {
            root,
            manual: Vec::new(),
            strict: false,
        }
    }

    /// Flag states as manual.
    pub fn manual(mut self, states: impl IntoIterator<Item = S>) -> Self {
        self.manual.extend(states);
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

//! Transition graphs.
//!
//! A [`StateGraph`] is compiled once from a declarative [`TransitionSpec`]
//! tree into an adjacency list and is read-only afterwards. It answers
//! next-state, final-state and shortest-path queries and renders itself as
//! a text diagram.
//!
//! # Example
//!
//! ```rust
//! use waypoint::graph::{GraphConfig, StateGraph, TransitionSpec};
//!
//! let s = |name: &str| name.to_string();
//! let graph = StateGraph::new(
//!     GraphConfig::new(
//!         TransitionSpec::new(s("CREATED"))
//!             .then(TransitionSpec::new(s("PROCESSING")).to(s("SYNCHRONIZED")))
//!             .then(TransitionSpec::new(s("SYNCHRONIZED")).to(s("FULFILLED")))
//!             .to(s("CANCELLED")),
//!     )
//!     .manual([s("CANCELLED")]),
//! );
//!
//! assert_eq!(graph.next_states(&s("CREATED"), false), vec![s("PROCESSING"), s("SYNCHRONIZED")]);
//! assert_eq!(
//!     graph.transitions(&s("CREATED"), &s("FULFILLED")).unwrap(),
//!     vec![s("SYNCHRONIZED"), s("FULFILLED")]
//! );
//! assert!(graph.is_final_state(&s("FULFILLED")));
//! ```

mod diagram;
pub mod spec;
pub mod validation;

pub use spec::{GraphConfig, NextState, TransitionSpec};
pub use validation::{ConfigError, ConfigViolation};

use crate::core::State;
use crate::error::MachineError;
use std::collections::{HashMap, HashSet, VecDeque};

/// Compiled, immutable transition graph.
#[derive(Clone, Debug)]
pub struct StateGraph<S: State> {
    root: S,
    adjacency: HashMap<S, Vec<S>>,
    manual: HashSet<S>,
    strict: bool,
}

impl<S: State> StateGraph<S> {
    /// Compile a configuration without validating it.
    pub fn new(config: GraphConfig<S>) -> Self {
        let adjacency = Self::build(&config.root);
        Self {
            root: config.root.state,
            adjacency,
            manual: config.manual.into_iter().collect(),
            strict: config.strict,
        }
    }

    /// Validate a configuration, then compile it.
    ///
    /// Every violation found is reported in the returned error.
    pub fn try_new(config: GraphConfig<S>) -> Result<Self, ConfigError> {
        validation::into_result(validation::validate(&config, std::iter::empty()))?;
        Ok(Self::new(config))
    }

    /// Compile a tree into an adjacency list.
    ///
    /// Children are appended to their parent's list in declaration order and
    /// nested nodes are compiled recursively. Lists accumulate across every
    /// occurrence of a state and are not deduplicated. A node without
    /// children adds no entry.
    pub fn build(root: &TransitionSpec<S>) -> HashMap<S, Vec<S>> {
        fn reduce<S: State>(node: &TransitionSpec<S>, map: &mut HashMap<S, Vec<S>>) {
            for child in &node.next {
                map.entry(node.state.clone())
                    .or_default()
                    .push(child.state().clone());
                if let NextState::Node(nested) = child {
                    reduce(nested, map);
                }
            }
        }

        let mut map = HashMap::new();
        reduce(root, &mut map);
        map
    }

    pub fn root(&self) -> &S {
        &self.root
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn is_manual(&self, state: &S) -> bool {
        self.manual.contains(state)
    }

    /// States directly reachable from `state`, in declaration order.
    ///
    /// With `include_manual == false`, manual states are left out. Unknown
    /// states have no next states.
    pub fn next_states(&self, state: &S, include_manual: bool) -> Vec<S> {
        self.adjacency
            .get(state)
            .map(|targets| {
                targets
                    .iter()
                    .filter(|to| include_manual || !self.is_manual(to))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// A state is final when no edge leaves it.
    pub fn is_final_state(&self, state: &S) -> bool {
        !self.adjacency.contains_key(state)
    }

    /// Shortest path from `from` to `to`, excluding `from`.
    ///
    /// Breadth-first over every edge, manual ones included. Among paths of
    /// equal length the one following earlier-declared edges wins. Asking
    /// for `from == to` yields an empty path.
    ///
    /// When no path exists a strict graph fails with
    /// [`MachineError::NoTransitionFound`]; a lenient one returns an empty
    /// path.
    pub fn transitions(&self, from: &S, to: &S) -> Result<Vec<S>, MachineError> {
        let mut parents: HashMap<&S, &S> = HashMap::new();
        let mut visited: HashSet<&S> = HashSet::from([from]);
        let mut queue: VecDeque<&S> = VecDeque::from([from]);

        while let Some(current) = queue.pop_front() {
            if current == to {
                let mut path = Vec::new();
                let mut step = current;
                while step != from {
                    path.push(step.clone());
                    step = parents[step];
                }
                path.reverse();
                return Ok(path);
            }

            for next in self.adjacency.get(current).into_iter().flatten() {
                if visited.insert(next) {
                    parents.insert(next, current);
                    queue.push_back(next);
                }
            }
        }

        if self.strict {
            return Err(MachineError::NoTransitionFound {
                from: from.name().to_string(),
                to: to.name().to_string(),
            });
        }

        tracing::debug!(
            from = from.name(),
            to = to.name(),
            "no transition path, leaving state unchanged"
        );
        Ok(Vec::new())
    }

    /// Every state of the graph, root first, in depth-first declaration order.
    pub fn states(&self) -> Vec<&S> {
        let mut seen: HashSet<&S> = HashSet::new();
        let mut ordered = Vec::new();
        let mut stack = vec![&self.root];

        while let Some(state) = stack.pop() {
            if !seen.insert(state) {
                continue;
            }
            ordered.push(state);
            if let Some(targets) = self.adjacency.get(state) {
                stack.extend(targets.iter().rev());
            }
        }

        ordered
    }

    /// Every declared edge, grouped by source in [`states`](Self::states) order.
    pub fn edges(&self) -> Vec<(&S, &S)> {
        self.states()
            .into_iter()
            .flat_map(|from| {
                self.adjacency
                    .get(from)
                    .into_iter()
                    .flatten()
                    .map(move |to| (from, to))
            })
            .collect()
    }
}

//! Waypoint: a graph-driven state transition engine
//!
//! Waypoint moves an entity's state field through a declared graph of legal
//! transitions. Ask for a target state and it finds the shortest route,
//! then crosses each edge in order, running the guard bound to that edge if
//! there is one.
//!
//! # Core Concepts
//!
//! - **State**: any comparable value, via the `State` trait
//! - **Graph**: adjacency list compiled once from a declarative tree, with
//!   manual-only states and a strict/lenient path-search mode
//! - **Guards**: async per-edge checks that may veto or adjust the entity
//! - **StateMachine**: walks computed paths through the guards
//!
//! # Example
//!
//! ```rust
//! use waypoint::entity::StateField;
//! use waypoint::graph::{GraphConfig, StateGraph, TransitionSpec};
//! use waypoint::guard::GuardTable;
//! use waypoint::StateMachine;
//!
//! struct Order {
//!     status: String,
//! }
//!
//! let s = |name: &str| name.to_string();
//! let graph = StateGraph::new(GraphConfig::new(
//!     TransitionSpec::new(s("pending"))
//!         .then(TransitionSpec::new(s("processed")).to(s("fulfilled"))),
//! ));
//! let machine = StateMachine::new(
//!     graph,
//!     GuardTable::new(),
//!     StateField::new(|o: &Order| &o.status, |o: &mut Order, s| o.status = s),
//! );
//!
//! let mut order = Order { status: s("pending") };
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let history = runtime
//!     .block_on(machine.transition(&mut order, &s("fulfilled")))
//!     .unwrap();
//!
//! assert_eq!(order.status, "fulfilled");
//! assert_eq!(history.len(), 2);
//! ```

pub mod builder;
pub mod core;
pub mod entity;
pub mod error;
pub mod graph;
pub mod guard;
pub mod machine;

// Re-export commonly used types
pub use crate::core::{State, StateHistory, StateTransition, TransitionKey};
pub use error::{GuardError, MachineError};
pub use graph::{GraphConfig, StateGraph, TransitionSpec};
pub use guard::{GuardTable, TransitionGuard};
pub use machine::StateMachine;

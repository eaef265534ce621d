//! Builder API for ergonomic state machine construction.
//!
//! This module provides a fluent builder plus macros for declaring state
//! enums and transition trees with minimal boilerplate.
//!
//! # Example
//!
//! ```
//! use waypoint::builder::StateMachineBuilder;
//! use waypoint::entity::Stateful;
//! use waypoint::graph::GraphConfig;
//! use waypoint::guard::guard_fn;
//! use waypoint::{state_enum, transitions, GuardError};
//!
//! state_enum! {
//!     enum Ticket {
//!         Open,
//!         InProgress,
//!         Closed,
//!     }
//! }
//!
//! struct Issue {
//!     status: Ticket,
//!     assignee: Option<String>,
//! }
//!
//! impl Stateful for Issue {
//!     type State = Ticket;
//!     fn state(&self) -> &Ticket { &self.status }
//!     fn set_state(&mut self, state: Ticket) { self.status = state; }
//! }
//!
//! use Ticket::*;
//!
//! let machine = StateMachineBuilder::<Issue, Ticket>::new()
//!     .graph(GraphConfig::new(transitions! { Open => [InProgress => [Closed]] }))
//!     .stateful()
//!     .guard(Open, InProgress, guard_fn(|issue: &mut Issue| -> Result<(), GuardError> {
//!         issue.assignee.as_ref().map(|_| ()).ok_or_else(|| "unassigned".into())
//!     }))
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(machine.graph().next_states(&Open, false), vec![InProgress]);
//! ```

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::StateMachineBuilder;

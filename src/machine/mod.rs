//! Transition orchestration.
//!
//! [`StateMachine`] ties a [`StateGraph`](crate::graph::StateGraph), a
//! [`GuardTable`](crate::guard::GuardTable) and a
//! [`StateField`](crate::entity::StateField) together. A run goes
//!
//! ```text
//! Idle -> PathComputed -> ApplyingEdge* -> Done | Aborted
//! ```
//!
//! and each edge goes `GuardLookup -> GuardInvoked? -> StateAssigned`.
//! Guards are awaited one after another; the next edge never starts before
//! the previous guard has resolved.

mod orchestrator;

pub use orchestrator::StateMachine;

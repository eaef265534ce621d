//! Per-edge transition guards.
//!
//! A guard is bound to exactly one edge. When the orchestrator crosses that
//! edge it hands the entity to the guard, which may inspect it, adjust it,
//! do I/O, and then approve or veto the move. Edges without a guard are
//! approved automatically.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use waypoint::guard::TransitionGuard;
//! use waypoint::GuardError;
//!
//! struct Order {
//!     status: String,
//!     paid: bool,
//! }
//!
//! struct RequirePayment;
//!
//! #[async_trait]
//! impl TransitionGuard<Order> for RequirePayment {
//!     async fn can_transition(&self, order: &mut Order) -> Result<(), GuardError> {
//!         if order.paid {
//!             Ok(())
//!         } else {
//!             Err("order is not paid".into())
//!         }
//!     }
//! }
//! ```

mod table;

pub use table::GuardTable;

use crate::error::GuardError;
use async_trait::async_trait;

/// Capability bound to one transition key.
///
/// Returning `Ok(())` approves the edge; any changes made to the entity are
/// kept. Returning an error aborts the whole transition before the state
/// field of the entity is touched for this edge.
#[async_trait]
pub trait TransitionGuard<E>: Send + Sync {
    async fn can_transition(&self, entity: &mut E) -> Result<(), GuardError>;
}

/// Guard backed by a synchronous closure. Built with [`guard_fn`].
pub struct FnGuard<F> {
    check: F,
}

#[async_trait]
impl<E, F> TransitionGuard<E> for FnGuard<F>
where
    E: Send,
    F: Fn(&mut E) -> Result<(), GuardError> + Send + Sync,
{
    async fn can_transition(&self, entity: &mut E) -> Result<(), GuardError> {
        (self.check)(entity)
    }
}

/// Wrap a closure as a guard.
///
/// ```rust
/// use waypoint::guard::guard_fn;
/// use waypoint::GuardError;
///
/// struct Task {
///     retries: u32,
/// }
///
/// let limit = guard_fn(|task: &mut Task| -> Result<(), GuardError> {
///     task.retries += 1;
///     if task.retries <= 3 {
///         Ok(())
///     } else {
///         Err("retry budget exhausted".into())
///     }
/// });
/// ```
pub fn guard_fn<E, F>(check: F) -> FnGuard<F>
where
    F: Fn(&mut E) -> Result<(), GuardError> + Send + Sync,
{
    FnGuard { check }
}

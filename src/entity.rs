//! Access to an entity's state field.
//!
//! The engine never looks at an entity beyond its state field. It reads the
//! field through a [`StateField`] and writes it back after each committed
//! edge.

use crate::core::State;

/// Entities that expose their state field directly.
///
/// # Example
///
/// ```rust
/// use waypoint::entity::Stateful;
///
/// struct Order {
///     id: u64,
///     status: String,
/// }
///
/// impl Stateful for Order {
///     type State = String;
///
///     fn state(&self) -> &String {
///         &self.status
///     }
///
///     fn set_state(&mut self, state: String) {
///         self.status = state;
///     }
/// }
/// ```
pub trait Stateful {
    type State: State;

    fn state(&self) -> &Self::State;

    fn set_state(&mut self, state: Self::State);
}

/// Getter and setter for the state field of `E`.
pub struct StateField<E, S> {
    get: fn(&E) -> &S,
    set: fn(&mut E, S),
}

impl<E, S: State> StateField<E, S> {
    /// Build an accessor from a getter and a setter.
    ///
    /// ```rust
    /// use waypoint::entity::StateField;
    ///
    /// struct Ticket {
    ///     status: String,
    /// }
    ///
    /// let field = StateField::new(
    ///     |t: &Ticket| &t.status,
    ///     |t: &mut Ticket, s| t.status = s,
    /// );
    ///
    /// let mut ticket = Ticket { status: "open".to_string() };
    /// field.set(&mut ticket, "closed".to_string());
    /// assert_eq!(field.get(&ticket), "closed");
    /// ```
    pub fn new(get: fn(&E) -> &S, set: fn(&mut E, S)) -> Self {
        Self { get, set }
    }

    pub fn get<'a>(&self, entity: &'a E) -> &'a S {
        (self.get)(entity)
    }

    pub fn set(&self, entity: &mut E, state: S) {
        (self.set)(entity, state)
    }
}

impl<E: Stateful> StateField<E, E::State> {
    /// Accessor for an entity implementing [`Stateful`].
    pub fn stateful() -> Self {
        Self {
            get: E::state,
            set: E::set_state,
        }
    }
}

impl<E, S> Clone for StateField<E, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, S> Copy for StateField<E, S> {}

impl<E, S> std::fmt::Debug for StateField<E, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateField").finish_non_exhaustive()
    }
}

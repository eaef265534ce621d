//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::core::State;
use crate::entity::{StateField, Stateful};
use crate::graph::{validation, GraphConfig, StateGraph};
use crate::guard::{GuardTable, TransitionGuard};
use crate::machine::StateMachine;

/// Builder for constructing state machines with a fluent API.
///
/// `build` validates the graph configuration together with the guard
/// bindings and reports every problem at once.
pub struct StateMachineBuilder<E, S: State> {
    graph: Option<GraphConfig<S>>,
    field: Option<StateField<E, S>>,
    guards: GuardTable<E>,
}

impl<E: Send, S: State> StateMachineBuilder<E, S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            graph: None,
            field: None,
            guards: GuardTable::new(),
        }
    }

    /// Set the graph configuration (required).
    pub fn graph(mut self, config: GraphConfig<S>) -> Self {
        self.graph = Some(config);
        self
    }

    /// Set the state field accessor (required).
    pub fn field(mut self, field: StateField<E, S>) -> Self {
        self.field = Some(field);
        self
    }

    /// Bind a guard to the edge `from -> to`.
    /// Returns an error if that edge already has a guard.
    pub fn guard<G>(mut self, from: S, to: S, guard: G) -> Result<Self, BuildError>
    where
        G: TransitionGuard<E> + 'static,
    {
        self.guards.bind(&from, &to, guard)?;
        Ok(self)
    }

    /// Use a prepared guard table, replacing any guards bound so far.
    pub fn guards(mut self, guards: GuardTable<E>) -> Self {
        self.guards = guards;
        self
    }

    /// Build the state machine.
    /// Returns an error if required fields are missing or the configuration
    /// is invalid.
    pub fn build(self) -> Result<StateMachine<E, S>, BuildError> {
        let config = self.graph.ok_or(BuildError::MissingGraph)?;
        let field = self.field.ok_or(BuildError::MissingField)?;

        validation::into_result(validation::validate(&config, self.guards.keys()))?;

        Ok(StateMachine::new(StateGraph::new(config), self.guards, field))
    }
}

impl<E: Stateful + Send> StateMachineBuilder<E, E::State> {
    /// Read and write the state field through the entity's [`Stateful`] impl.
    pub fn stateful(self) -> Self {
        self.field(StateField::stateful())
    }
}

impl<E: Send, S: State> Default for StateMachineBuilder<E, S> {
    fn default() -> Self {
        Self::new()
    }
}

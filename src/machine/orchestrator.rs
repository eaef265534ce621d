//! State machine that walks graph paths through guarded edges.

use crate::core::{State, StateHistory, StateTransition, TransitionKey};
use crate::entity::StateField;
use crate::error::MachineError;
use crate::graph::StateGraph;
use crate::guard::GuardTable;
use chrono::Utc;

/// Executes transitions on entities of type `E` whose state field holds `S`.
///
/// The machine holds no per-entity data. One instance can serve any number
/// of entities, from any number of tasks; each call borrows the entity it
/// works on mutably, so one entity is never driven by two calls at once.
pub struct StateMachine<E, S: State> {
    graph: StateGraph<S>,
    guards: GuardTable<E>,
    field: StateField<E, S>,
}

impl<E: Send, S: State> StateMachine<E, S> {
    pub fn new(graph: StateGraph<S>, guards: GuardTable<E>, field: StateField<E, S>) -> Self {
        Self {
            graph,
            guards,
            field,
        }
    }

    pub fn graph(&self) -> &StateGraph<S> {
        &self.graph
    }

    pub fn guards(&self) -> &GuardTable<E> {
        &self.guards
    }

    /// Current state of `entity`.
    pub fn state_of<'a>(&self, entity: &'a E) -> &'a S {
        self.field.get(entity)
    }

    /// Move `entity` to `target` along the shortest path.
    ///
    /// Edges are applied one at a time, in path order, each through its
    /// guard if one is bound. An empty path (already at `target`, or no
    /// route on a lenient graph) leaves the entity untouched and returns an
    /// empty history.
    ///
    /// On failure nothing further runs. Edges committed before the failing
    /// one stay applied to `entity`; nothing is rolled back.
    pub async fn transition(
        &self,
        entity: &mut E,
        target: &S,
    ) -> Result<StateHistory<S>, MachineError> {
        let current = self.field.get(entity).clone();
        let path = self.graph.transitions(&current, target)?;

        let mut history = StateHistory::new();
        if path.is_empty() {
            return Ok(history);
        }

        tracing::debug!(
            from = current.name(),
            to = target.name(),
            edges = path.len(),
            "transition path computed"
        );

        for to in path {
            let committed = self.apply_edge(entity, to).await?;
            history = history.record(committed);
        }

        Ok(history)
    }

    /// Advance `entity` by exactly one automatic edge.
    ///
    /// Takes the first non-manual next state in declaration order. Fails
    /// with [`MachineError::EntityInFinalState`] when there is none.
    pub async fn next(&self, entity: &mut E) -> Result<S, MachineError> {
        let current = self.field.get(entity);
        let Some(to) = self.graph.next_states(current, false).into_iter().next() else {
            return Err(MachineError::EntityInFinalState {
                state: current.name().to_string(),
            });
        };

        self.apply_edge(entity, to.clone()).await?;
        Ok(to)
    }

    /// Whether `entity` has no outgoing edge at all.
    pub fn is_final(&self, entity: &E) -> bool {
        self.graph.is_final_state(self.field.get(entity))
    }

    /// Whether a non-empty path leads from the entity's state to `target`.
    ///
    /// Guards are not consulted.
    pub fn can_reach(&self, entity: &E, target: &S) -> bool {
        self.graph
            .transitions(self.field.get(entity), target)
            .is_ok_and(|path| !path.is_empty())
    }

    async fn apply_edge(&self, entity: &mut E, to: S) -> Result<StateTransition<S>, MachineError> {
        let from = self.field.get(entity).clone();
        let key = TransitionKey::encode(&from, &to);

        let guarded = match self.guards.get(&key) {
            Some(guard) => {
                if let Err(error) = guard.can_transition(entity).await {
                    tracing::warn!(transition = %key, %error, "guard rejected transition");
                    return Err(MachineError::GuardRejected(error));
                }
                true
            }
            None => false,
        };

        self.field.set(entity, to.clone());
        tracing::debug!(from = from.name(), to = to.name(), guarded, "transition committed");

        Ok(StateTransition {
            from,
            to,
            timestamp: Utc::now(),
            guarded,
        })
    }
}

impl<E, S: State> std::fmt::Debug for StateMachine<E, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("graph", &self.graph)
            .field("guards", &self.guards)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GuardError;
    use crate::graph::{GraphConfig, TransitionSpec};
    use crate::guard::{guard_fn, TransitionGuard};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq)]
    struct Entity {
        status: String,
        notes: Vec<String>,
    }

    impl Entity {
        fn at(status: &str) -> Self {
            Self {
                status: status.to_string(),
                notes: Vec::new(),
            }
        }
    }

    fn s(name: &str) -> String {
        name.to_string()
    }

    fn field() -> StateField<Entity, String> {
        StateField::new(|e: &Entity| &e.status, |e: &mut Entity, s| e.status = s)
    }

    fn config() -> GraphConfig<String> {
        GraphConfig::new(
            TransitionSpec::new(s("pending"))
                .then(
                    TransitionSpec::new(s("processed"))
                        .then(
                            TransitionSpec::new(s("synchronized"))
                                .to(s("fulfilled"))
                                .then(TransitionSpec::new(s("failed")).to(s("fulfilled")))
                                .to(s("cancelled")),
                        )
                        .to(s("cancelled")),
                )
                .to(s("cancelled")),
        )
        .manual([s("cancelled"), s("failed")])
    }

    struct Counting {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl TransitionGuard<Entity> for Counting {
        async fn can_transition(&self, entity: &mut Entity) -> Result<(), GuardError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            entity.notes.push(format!("checked at {}", entity.status));
            Ok(())
        }
    }

    fn reject(message: &'static str) -> impl TransitionGuard<Entity> {
        guard_fn(move |_: &mut Entity| -> Result<(), GuardError> { Err(message.into()) })
    }

    fn machine(guards: GuardTable<Entity>, strict: bool) -> StateMachine<Entity, String> {
        StateMachine::new(StateGraph::new(config().strict(strict)), guards, field())
    }

    #[tokio::test]
    async fn transition_walks_every_edge_of_the_path() {
        let machine = machine(GuardTable::new(), true);
        let mut entity = Entity::at("pending");

        let history = machine.transition(&mut entity, &s("fulfilled")).await.unwrap();

        assert_eq!(entity.status, "fulfilled");
        assert_eq!(
            history.get_path(),
            vec!["pending", "processed", "synchronized", "fulfilled"]
        );
        assert!(history.transitions().iter().all(|t| !t.guarded));
    }

    #[tokio::test]
    async fn guard_runs_once_and_sees_entity_before_assignment() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut guards = GuardTable::new();
        guards
            .bind(&s("pending"), &s("processed"), Counting { calls: calls.clone() })
            .unwrap();
        let machine = machine(guards, true);
        let mut entity = Entity::at("pending");

        let history = machine.transition(&mut entity, &s("fulfilled")).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(entity.status, "fulfilled");
        assert_eq!(entity.notes, vec!["checked at pending"]);
        assert!(history.transitions()[0].guarded);
        assert!(!history.transitions()[1].guarded);
    }

    #[tokio::test]
    async fn rejecting_guard_leaves_state_and_surfaces_failure() {
        let mut guards = GuardTable::new();
        guards.bind(&s("failed"), &s("fulfilled"), reject("Failed")).unwrap();
        let machine = machine(guards, true);
        let mut entity = Entity::at("failed");

        let error = machine
            .transition(&mut entity, &s("fulfilled"))
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), "Failed");
        assert!(matches!(error, MachineError::GuardRejected(_)));
        assert_eq!(entity.status, "failed");
    }

    #[tokio::test]
    async fn failure_mid_path_keeps_committed_edges() {
        let mut guards = GuardTable::new();
        guards
            .bind(&s("processed"), &s("synchronized"), reject("sync unavailable"))
            .unwrap();
        let machine = machine(guards, true);
        let mut entity = Entity::at("pending");

        let error = machine
            .transition(&mut entity, &s("fulfilled"))
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), "sync unavailable");
        assert_eq!(entity.status, "processed");
    }

    #[tokio::test]
    async fn strict_graph_fails_without_touching_entity() {
        let machine = machine(GuardTable::new(), true);
        let mut entity = Entity::at("fulfilled");

        let error = machine
            .transition(&mut entity, &s("pending"))
            .await
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "No transition path found from 'fulfilled' to 'pending'"
        );
        assert_eq!(entity, Entity::at("fulfilled"));
    }

    #[tokio::test]
    async fn lenient_graph_returns_entity_unchanged() {
        let machine = machine(GuardTable::new(), false);
        let mut entity = Entity::at("fulfilled");

        let history = machine.transition(&mut entity, &s("pending")).await.unwrap();

        assert!(history.is_empty());
        assert_eq!(entity, Entity::at("fulfilled"));
    }

    #[tokio::test]
    async fn transition_to_current_state_is_a_no_op() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut guards = GuardTable::new();
        guards
            .bind(&s("pending"), &s("pending"), Counting { calls: calls.clone() })
            .unwrap();
        let machine = machine(guards, true);
        let mut entity = Entity::at("pending");

        let history = machine.transition(&mut entity, &s("pending")).await.unwrap();

        assert!(history.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn explicit_transition_may_target_manual_state() {
        let machine = machine(GuardTable::new(), true);
        let mut entity = Entity::at("processed");

        machine.transition(&mut entity, &s("failed")).await.unwrap();

        assert_eq!(entity.status, "failed");
    }

    #[tokio::test]
    async fn next_moves_to_first_automatic_state() {
        let machine = machine(GuardTable::new(), true);
        let mut entity = Entity::at("pending");

        let state = machine.next(&mut entity).await.unwrap();

        assert_eq!(state, "processed");
        assert_eq!(entity.status, "processed");
    }

    #[tokio::test]
    async fn next_is_single_step() {
        let machine = machine(GuardTable::new(), true);
        let mut entity = Entity::at("processed");

        machine.next(&mut entity).await.unwrap();
        assert_eq!(entity.status, "synchronized");

        machine.next(&mut entity).await.unwrap();
        assert_eq!(entity.status, "fulfilled");
    }

    #[tokio::test]
    async fn next_skips_manual_states() {
        let machine = machine(GuardTable::new(), true);
        let mut entity = Entity::at("synchronized");

        machine.next(&mut entity).await.unwrap();

        assert_eq!(entity.status, "fulfilled");
    }

    #[tokio::test]
    async fn next_fails_in_final_state() {
        let machine = machine(GuardTable::new(), true);
        let mut entity = Entity::at("fulfilled");

        let error = machine.next(&mut entity).await.unwrap_err();

        assert!(matches!(&error, MachineError::EntityInFinalState { state } if state == "fulfilled"));
        assert_eq!(error.to_string(), "Entity is in a final state: fulfilled");
    }

    #[tokio::test]
    async fn next_applies_the_edge_guard() {
        let mut guards = GuardTable::new();
        guards
            .bind(&s("pending"), &s("processed"), reject("not ready"))
            .unwrap();
        let machine = machine(guards, true);
        let mut entity = Entity::at("pending");

        let error = machine.next(&mut entity).await.unwrap_err();

        assert_eq!(error.to_string(), "not ready");
        assert_eq!(entity.status, "pending");
    }

    #[test]
    fn queries_delegate_to_graph() {
        let machine = machine(GuardTable::new(), true);

        assert!(machine.is_final(&Entity::at("fulfilled")));
        assert!(!machine.is_final(&Entity::at("failed")));
        assert!(machine.can_reach(&Entity::at("pending"), &s("fulfilled")));
        assert!(!machine.can_reach(&Entity::at("fulfilled"), &s("pending")));
        assert!(!machine.can_reach(&Entity::at("pending"), &s("pending")));
        assert_eq!(machine.state_of(&Entity::at("failed")), "failed");
    }

    #[tokio::test]
    async fn machine_is_shared_across_tasks() {
        let machine = Arc::new(machine(GuardTable::new(), true));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let machine = Arc::clone(&machine);
                tokio::spawn(async move {
                    let mut entity = Entity::at("pending");
                    let target = s("fulfilled");
                    let result = machine.transition(&mut entity, &target).await;
                    result.map(|_| entity)
                })
            })
            .collect();

        for handle in handles {
            let entity = handle.await.unwrap().unwrap();
            assert_eq!(entity.status, "fulfilled");
        }
    }
}

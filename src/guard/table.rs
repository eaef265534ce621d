//! Guard registry keyed by transition key.

use super::TransitionGuard;
use crate::builder::BuildError;
use crate::core::{State, TransitionKey};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Explicit table of guards, at most one per transition key.
///
/// Filled once while wiring the application and read-only afterwards.
pub struct GuardTable<E> {
    guards: HashMap<TransitionKey, Arc<dyn TransitionGuard<E>>>,
}

impl<E> GuardTable<E> {
    pub fn new() -> Self {
        Self {
            guards: HashMap::new(),
        }
    }

    /// Bind a guard to a key.
    ///
    /// Fails with [`BuildError::DuplicateGuard`] if the key is already bound.
    pub fn insert(
        &mut self,
        key: TransitionKey,
        guard: Arc<dyn TransitionGuard<E>>,
    ) -> Result<(), BuildError> {
        if self.guards.contains_key(&key) {
            return Err(BuildError::DuplicateGuard {
                key: key.to_string(),
            });
        }
        self.guards.insert(key, guard);
        Ok(())
    }

    /// Bind a guard to the edge `from -> to`.
    pub fn bind<S, G>(&mut self, from: &S, to: &S, guard: G) -> Result<(), BuildError>
    where
        S: State,
        G: TransitionGuard<E> + 'static,
    {
        self.insert(TransitionKey::encode(from, to), Arc::new(guard))
    }

    /// Guard bound to `key`, if any.
    pub fn get(&self, key: &TransitionKey) -> Option<&Arc<dyn TransitionGuard<E>>> {
        self.guards.get(key)
    }

    pub fn contains(&self, key: &TransitionKey) -> bool {
        self.guards.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &TransitionKey> {
        self.guards.keys()
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

impl<E> Default for GuardTable<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for GuardTable<E> {
    fn clone(&self) -> Self {
        Self {
            guards: self.guards.clone(),
        }
    }
}

impl<E> fmt::Debug for GuardTable<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.guards.keys().map(TransitionKey::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("GuardTable").field("keys", &keys).finish()
    }
}

//! Graph configuration checks.
//!
//! Checks accumulate: every violation in a configuration is reported at once
//! instead of stopping at the first.

use crate::core::{State, TransitionKey, SEPARATOR};
use crate::graph::spec::GraphConfig;
use crate::graph::StateGraph;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Outcome of a single check.
pub type ConfigCheck = Validation<(), NonEmptyVec<ConfigViolation>>;

/// A single problem found in a graph configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("manual state '{0}' does not appear in the transition tree")]
    UnknownManualState(String),

    #[error("state name '{0}' contains the transition key separator '->'")]
    SeparatorInStateName(String),

    #[error("guard bound to '{0}', which is not a declared edge")]
    UndeclaredGuardEdge(String),
}

/// Errors produced while loading or validating a graph configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid graph configuration: {}", describe(.violations))]
    Invalid { violations: Vec<ConfigViolation> },

    #[error("failed to parse graph configuration: {0}")]
    Json(#[from] serde_json::Error),
}

fn describe(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Check a configuration and the keys of the guards that will run on it.
///
/// Pass an empty iterator when no guards are bound.
pub fn validate<'a, S, I>(config: &GraphConfig<S>, guard_keys: I) -> ConfigCheck
where
    S: State,
    I: IntoIterator<Item = &'a TransitionKey>,
{
    let declared: HashSet<&S> = config.root.states().into_iter().collect();
    let mut checks: Vec<ConfigCheck> = Vec::new();

    for state in &config.manual {
        let check = if declared.contains(state) {
            Validation::success(())
        } else {
            Validation::fail(ConfigViolation::UnknownManualState(
                state.name().to_string(),
            ))
        };
        checks.push(check);
    }

    let mut seen = HashSet::new();
    for state in config.root.states() {
        if seen.insert(state) && state.name().contains(SEPARATOR) {
            checks.push(Validation::fail(ConfigViolation::SeparatorInStateName(
                state.name().to_string(),
            )));
        }
    }

    let edges: HashSet<TransitionKey> = StateGraph::build(&config.root)
        .iter()
        .flat_map(|(from, targets)| targets.iter().map(move |to| TransitionKey::encode(from, to)))
        .collect();
    for key in guard_keys {
        if !edges.contains(key) {
            checks.push(Validation::fail(ConfigViolation::UndeclaredGuardEdge(
                key.to_string(),
            )));
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Convert an accumulated check into a `Result`.
pub fn into_result(check: ConfigCheck) -> Result<(), ConfigError> {
    match check {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => Err(ConfigError::Invalid {
            violations: errors.iter().cloned().collect(),
        }),
    }
}

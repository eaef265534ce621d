//! Transition keys.
//!
//! A transition key names one directed edge of the graph. Guards are bound
//! to edges by key.

use super::state::State;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator placed between the two state names of a key.
///
/// State names must not contain it, otherwise distinct edges can encode to
/// the same key. [`TransitionKey::encode`] does not check this; graph
/// validation does.
pub const SEPARATOR: &str = "->";

/// Canonical, order-sensitive key for the edge `from -> to`.
///
/// # Example
///
/// ```rust
/// use waypoint::core::TransitionKey;
///
/// let key = TransitionKey::encode(&"failed".to_string(), &"fulfilled".to_string());
/// assert_eq!(key.as_str(), "failed->fulfilled");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionKey(String);

impl TransitionKey {
    /// Encode the edge `from -> to`.
    pub fn encode<S: State>(from: &S, to: &S) -> Self {
        Self(format!("{}{}{}", from.name(), SEPARATOR, to.name()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TransitionKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TransitionKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(name: &str) -> String {
        name.to_string()
    }

    #[test]
    fn encode_joins_names_with_separator() {
        let key = TransitionKey::encode(&s("pending"), &s("processed"));
        assert_eq!(key.as_str(), "pending->processed");
        assert_eq!(key.to_string(), "pending->processed");
    }

    #[test]
    fn encode_is_order_sensitive() {
        let forward = TransitionKey::encode(&s("a"), &s("b"));
        let backward = TransitionKey::encode(&s("b"), &s("a"));
        assert_ne!(forward, backward);
    }

    #[test]
    fn encode_is_deterministic() {
        assert_eq!(
            TransitionKey::encode(&s("x"), &s("y")),
            TransitionKey::encode(&s("x"), &s("y"))
        );
    }

    #[test]
    fn key_from_literal_matches_encoded_key() {
        assert_eq!(
            TransitionKey::from("failed->fulfilled"),
            TransitionKey::encode(&s("failed"), &s("fulfilled"))
        );
    }

    #[test]
    fn key_serializes_as_plain_string() {
        let key = TransitionKey::encode(&s("a"), &s("b"));
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"a->b\"");
    }
}

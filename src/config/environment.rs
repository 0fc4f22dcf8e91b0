// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Immutable snapshot of the process environment
//!
//! Request-issuing code never reads `std::env` directly. The environment is
//! captured once at session start and passed around explicitly.

use std::collections::HashMap;
use std::env;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Capture the current process environment, loading `.env` first if present
    pub fn capture() -> Self {
        if let Err(e) = dotenv::dotenv() {
            debug!("No .env file loaded: {}", e);
        }
        Self {
            vars: env::vars().collect(),
        }
    }

    /// Build an environment from explicit pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a variable; empty and whitespace-only values count as absent
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// First present variable among `keys`, in order
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values_are_absent() {
        let env = Environment::from_pairs([("A", ""), ("B", "  "), ("C", "value")]);
        assert_eq!(env.get("A"), None);
        assert_eq!(env.get("B"), None);
        assert_eq!(env.get("C"), Some("value"));
        assert_eq!(env.get("D"), None);
    }

    #[test]
    fn test_first_of_respects_order() {
        let env = Environment::from_pairs([("SECOND", "two"), ("THIRD", "three")]);
        assert_eq!(env.first_of(&["FIRST", "SECOND", "THIRD"]), Some("two"));
        assert_eq!(env.first_of(&["MISSING"]), None);
    }
}

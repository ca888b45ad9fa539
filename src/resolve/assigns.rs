//! Request-scoped assign storage.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::scope::AssignMap;

/// Key/value storage attached to a single request or connection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assigns(AssignMap);

impl Assigns {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> BTreeSet<String> {
        self.0.keys().cloned().collect()
    }

    pub fn as_map(&self) -> &AssignMap {
        &self.0
    }
}

impl From<AssignMap> for Assigns {
    fn from(map: AssignMap) -> Self {
        Self(map)
    }
}

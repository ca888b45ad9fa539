//! Linearized scope entries used at runtime.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Arbitrary per-scope settings bag.
pub type AssignMap = serde_json::Map<String, Value>;

/// Position of a scope in the canonical flat list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScopeId(pub usize);

impl From<usize> for ScopeId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One addressable scope: its full slug chain plus merged assigns.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FlatScope {
    /// Slug chain from the root to this scope. Empty for the root scope.
    #[serde(default, alias = "path")]
    pub path_segments: Vec<String>,

    #[serde(default)]
    pub assigns: AssignMap,
}

impl FlatScope {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path_segments: segments.into_iter().map(Into::into).collect(),
            assigns: AssignMap::new(),
        }
    }

    /// Set a single assign on this entry.
    pub fn assign(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.assigns.insert(key.into(), value.into());
        self
    }

    /// URL prefix for this scope: `""` for the root, `/en/us` otherwise.
    pub fn path(&self) -> String {
        let mut prefix = String::new();
        for segment in &self.path_segments {
            prefix.push('/');
            prefix.push_str(segment);
        }
        prefix
    }

    /// The innermost slug, if any.
    pub fn slug(&self) -> Option<&str> {
        self.path_segments.last().map(String::as_str)
    }

    pub fn depth(&self) -> usize {
        self.path_segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.path_segments.is_empty()
    }

    /// Key set of the assigns bag.
    pub fn assign_keys(&self) -> BTreeSet<String> {
        self.assigns.keys().cloned().collect()
    }

    /// Returns true if `segments` names this scope.
    pub fn is_addressed_by(&self, segments: &[&str]) -> bool {
        self.path_segments.len() == segments.len()
            && self.path_segments.iter().zip(segments).all(|(a, b)| a == b)
    }
}

//! Tree-shaped scope declaration.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::scope::AssignMap;

/// One node of a nested scope tree.
///
/// A child's assigns are layered on top of its parent's when the tree is
/// normalized, so shared defaults can live on an ancestor.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NestedScope {
    /// Path segment contributed by this node. Empty only on the root.
    #[serde(default)]
    pub slug: String,

    /// Per-scope settings (display name, gettext locale, ...).
    #[serde(default)]
    pub assigns: AssignMap,

    /// Child scopes, in priority order.
    #[serde(default)]
    pub children: Vec<NestedScope>,
}

impl NestedScope {
    /// Create a leaf node with no assigns.
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            assigns: AssignMap::new(),
            children: Vec::new(),
        }
    }

    /// Set a single assign on this node.
    pub fn assign(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.assigns.insert(key.into(), value.into());
        self
    }

    /// Append a child scope.
    pub fn child(mut self, child: NestedScope) -> Self {
        self.children.push(child);
        self
    }

    /// Total number of nodes in this subtree, this node included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(NestedScope::node_count).sum::<usize>()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

//! Scope model subsystem.
//!
//! # Data Flow
//! ```text
//! Operator declaration (TOML / code)
//!     → nested.rs (NestedScope tree)  or  flat.rs (Vec<FlatScope>)
//!     → normalize.rs (depth-first flattening, assigns inheritance)
//!     → Vec<FlatScope> (canonical order, unique path segments)
//! ```
//!
//! # Design Decisions
//! - The flat list is the only shape used at runtime
//! - Every tree node is emitted, intermediate nodes included
//! - Declaration order is preserved; nothing is sorted

pub mod flat;
pub mod nested;
pub mod normalize;

use serde::{Deserialize, Serialize};

pub use flat::{AssignMap, FlatScope, ScopeId};
pub use nested::NestedScope;
pub use normalize::{normalize, normalize_flat, ScopeError};

/// A scope declaration in either of its two accepted shapes.
///
/// In TOML a table deserializes as [`ScopesDecl::Nested`] and an array of
/// tables as [`ScopesDecl::Flat`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ScopesDecl {
    Flat(Vec<FlatScope>),
    Nested(NestedScope),
}

impl ScopesDecl {
    /// Flatten the declaration into the canonical scope list.
    pub fn flatten(&self) -> Result<Vec<FlatScope>, ScopeError> {
        match self {
            ScopesDecl::Nested(root) => normalize(root),
            ScopesDecl::Flat(list) => normalize_flat(list.clone()),
        }
    }
}

impl From<NestedScope> for ScopesDecl {
    fn from(root: NestedScope) -> Self {
        ScopesDecl::Nested(root)
    }
}

impl From<Vec<FlatScope>> for ScopesDecl {
    fn from(list: Vec<FlatScope>) -> Self {
        ScopesDecl::Flat(list)
    }
}

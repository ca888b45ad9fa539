//! Nested → flat scope normalization.
//!
//! # Responsibilities
//! - Walk a scope tree depth-first, pre-order
//! - Compose each node's path segments from its ancestors
//! - Layer child assigns over parent assigns
//! - Reject trees that cannot be addressed by path
//!
//! # Design Decisions
//! - Every node is emitted, including the root and intermediate nodes:
//!   `/en` stays addressable next to `/en/us`
//! - A root with an empty slug becomes the unprefixed scope (`/`)
//! - Pure and allocation-only: no I/O, no global state

use std::collections::HashSet;

use thiserror::Error;

use crate::scope::{AssignMap, FlatScope, NestedScope};

/// Characters that would collide with path separators or route pattern syntax.
const RESERVED_SLUG_CHARS: &[char] = &['/', '{', '}', '*', '?', '#'];

/// Structural errors in a scope declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// The tree root has neither a slug nor children, so nothing is addressable.
    #[error("scope tree root has no slug and no children")]
    MissingRootSlug,

    /// Two scopes resolve to the same path.
    #[error("duplicate scope path \"{path}\"")]
    DuplicateScope { path: String },

    /// A slug is empty below the root or contains reserved characters.
    #[error("invalid scope slug \"{slug}\"")]
    InvalidSlug { slug: String },
}

/// Flatten a scope tree into the canonical ordered list.
pub fn normalize(root: &NestedScope) -> Result<Vec<FlatScope>, ScopeError> {
    if root.slug.is_empty() && root.children.is_empty() {
        return Err(ScopeError::MissingRootSlug);
    }

    let mut flat = Vec::with_capacity(root.node_count());
    let mut seen = HashSet::new();
    let mut segments = Vec::new();

    if !root.slug.is_empty() {
        check_slug(&root.slug)?;
        segments.push(root.slug.clone());
    }
    visit(root, &mut segments, &AssignMap::new(), &mut flat, &mut seen)?;

    tracing::debug!(scopes = flat.len(), "Normalized nested scope tree");
    Ok(flat)
}

fn visit(
    node: &NestedScope,
    segments: &mut Vec<String>,
    inherited: &AssignMap,
    flat: &mut Vec<FlatScope>,
    seen: &mut HashSet<Vec<String>>,
) -> Result<(), ScopeError> {
    let mut assigns = inherited.clone();
    for (key, value) in &node.assigns {
        assigns.insert(key.clone(), value.clone());
    }

    if !seen.insert(segments.clone()) {
        return Err(ScopeError::DuplicateScope {
            path: join(segments),
        });
    }
    flat.push(FlatScope {
        path_segments: segments.clone(),
        assigns: assigns.clone(),
    });

    for child in &node.children {
        if child.slug.is_empty() {
            return Err(ScopeError::InvalidSlug {
                slug: child.slug.clone(),
            });
        }
        check_slug(&child.slug)?;

        segments.push(child.slug.clone());
        visit(child, segments, &assigns, flat, seen)?;
        segments.pop();
    }
    Ok(())
}

/// Validate an already-flat declaration. Order and content are kept as given.
pub fn normalize_flat(list: Vec<FlatScope>) -> Result<Vec<FlatScope>, ScopeError> {
    let mut seen = HashSet::with_capacity(list.len());
    for scope in &list {
        for segment in &scope.path_segments {
            if segment.is_empty() {
                return Err(ScopeError::InvalidSlug {
                    slug: segment.clone(),
                });
            }
            check_slug(segment)?;
        }
        if !seen.insert(scope.path_segments.as_slice()) {
            return Err(ScopeError::DuplicateScope { path: scope.path() });
        }
    }
    Ok(list)
}

fn check_slug(slug: &str) -> Result<(), ScopeError> {
    if slug.contains(RESERVED_SLUG_CHARS) {
        return Err(ScopeError::InvalidSlug {
            slug: slug.to_string(),
        });
    }
    Ok(())
}

fn join(segments: &[String]) -> String {
    format!("/{}", segments.join("/"))
}

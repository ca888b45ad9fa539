//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Expansion (at startup):
//!     Config (flat scopes)
//!     → expander.rs (one RouteBlock per scope, paths prefixed)
//!     → translate.rs (optional per-locale segment translation)
//!     → router.rs (RouteTable: entries tagged with ScopeId)
//!     → Freeze as immutable table inside the Localized context
//!
//! Incoming Request / Live mount:
//!     matched pattern  → router.rs (O(1) lookup by pattern)
//!     raw path         → router.rs (matchit, same rules as axum)
//!     → Return: tagged RouteEntry or no match
//! ```
//!
//! # Design Decisions
//! - Routes are expanded at startup, immutable at runtime
//! - Scope identity travels as explicit route metadata, never reparsed
//! - Deterministic: scopes declared earlier win on overlapping paths

pub mod expander;
pub mod matcher;
pub mod router;
pub mod translate;

pub use expander::{expand, ExpandedRoute, RouteBlock};
pub use matcher::{PathPattern, PathParams};
pub use router::{RouteEntry, RouteError, RouteId, RouteTable};
pub use translate::{CatalogTranslator, SegmentTranslator};

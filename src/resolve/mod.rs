//! Request scope resolution.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → axum route match (MatchedPath)
//!     → middleware.rs (route_layer, once per request)
//!     → resolver.rs (pattern → RouteEntry → ScopeId → FlatScope)
//!     → assigns.rs (request extensions: ResolvedScope + Assigns)
//!     → handler (extract.rs: ResolvedScope / AssignedValues)
//!     → middleware.rs post-assign check (strict mode only)
//! ```
//!
//! # Design Decisions
//! - Only request extensions are written; shared state is read-only
//! - Untagged routes pass through untouched
//! - A tag without a matching scope is an integrity failure (500)

pub mod assigns;
pub mod extract;
pub mod middleware;
pub mod resolver;

pub use assigns::Assigns;
pub use extract::AssignedValues;
pub use middleware::resolve_scope_middleware;
pub use resolver::{resolve_scope, ResolveError, ResolvedScope};

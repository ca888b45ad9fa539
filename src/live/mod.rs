//! Lifecycle assigns guard for persistent connections.
//!
//! # Data Flow
//! ```text
//! Connection opened with its initial URL
//!     → session.rs mount (replay resolution via RouteTable::match_path)
//!     → Resolved (assigns seeded) | Failed (MissingLocaleAssign)
//!
//! Every render
//!     → guard.rs verify_assigns (schema vs. render-visible keys)
//!     → Verified | Failed (AssignsMismatch)
//! ```
//!
//! # Design Decisions
//! - Persistent connections never pass through the request middleware,
//!   so the mount hook repeats the resolution itself
//! - The check is a pure set comparison, independent of key order
//! - Failed is terminal for the connection

pub mod guard;
pub mod session;

pub use guard::{verify_assigns, LifecycleError, RenderedAssigns};
pub use session::{LiveSession, ScopeState};

//! Localized route scopes for axum.
//!
//! Declare a tree of URL scopes (regions, languages, storefronts), register a
//! block of routes once, and get one copy of it per scope. Requests are tagged
//! with the scope their route belongs to, and handlers read the scope's
//! assigns from request storage.

pub mod config;
pub mod fixtures;
pub mod http;
pub mod lifecycle;
pub mod live;
pub mod localized;
pub mod observability;
pub mod resolve;
pub mod routing;
pub mod scope;

pub use config::{AppConfig, Config, LocalizationOptions};
pub use http::{HttpServer, LocalizedRouter};
pub use lifecycle::Shutdown;
pub use live::LiveSession;
pub use localized::Localized;
pub use resolve::{AssignedValues, ResolvedScope};
pub use routing::RouteBlock;
pub use scope::{FlatScope, NestedScope, ScopeId};

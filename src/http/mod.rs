//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → localize.rs (scoped route copies + resolver route_layer)
//!     → handler (ResolvedScope / AssignedValues extractors)
//!     → response.rs (Rendered pages, error mapping)
//!     → Send to client
//!
//! Live connections:
//!     /live/websocket?path=... → websocket.rs → LiveSession
//! ```

pub mod localize;
pub mod request;
pub mod response;
pub mod server;
pub mod websocket;

pub use localize::LocalizedRouter;
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use response::Rendered;
pub use server::HttpServer;

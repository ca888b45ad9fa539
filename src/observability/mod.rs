//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields, request-id spans)
//!     → metrics.rs (resolution / mount / assign-check counters)
//!
//! Consumers:
//!     → logging.rs (fmt subscriber, EnvFilter)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - Request ID flows through the HTTP span
//! - Metrics are cheap counters; without an installed recorder they are no-ops

pub mod logging;
pub mod metrics;

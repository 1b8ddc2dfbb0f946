//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Routers and dispatcher produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (resolution and failure counters)
//!
//! Consumers:
//!     → Log output (stderr)
//!     → Whatever metrics recorder the host application installs
//! ```
//!
//! # Design Decisions
//! - Every log event carries router, path and site fields
//! - Metrics are cheap (counter increments)

pub mod logging;
pub mod metrics;

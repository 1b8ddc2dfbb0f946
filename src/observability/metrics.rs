//! Metrics collection.
//!
//! # Metrics
//! - `router_resolutions_total` (counter): resolutions by router, outcome
//! - `router_facade_errors_total` (counter): facade failures by router
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; without an installed recorder
//!   these calls are no-ops
//! - The library installs no exporter

use crate::routing::RouteOutcome;

/// Record one router decision.
pub fn record_resolution(router: &'static str, outcome: &RouteOutcome) {
    metrics::counter!(
        "router_resolutions_total",
        "router" => router,
        "outcome" => outcome.label()
    )
    .increment(1);
}

/// Record a facade failure surfaced by a router.
pub fn record_facade_error(router: &'static str) {
    metrics::counter!("router_facade_errors_total", "router" => router).increment(1);
}

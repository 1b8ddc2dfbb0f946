//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (path, site id)
//!     → dispatcher.rs (configured order, default alias → start page → archive → page → post)
//!     → each router: path.rs segments → ContentApi lookups
//!     → Return: Route, Redirect, or NoMatch
//!
//! Router construction (at startup):
//!     RouterConfig + ContentApi + Clock
//!     → RouterContext (shared via Arc)
//!     → one instance per router, immutable
//! ```
//!
//! # Design Decisions
//! - Routers are stateless; concurrent resolutions share nothing mutable
//! - NoMatch is a value, facade failures are errors; the two never mix
//! - First match wins in the dispatcher; the page router keeps its own
//!   longest-prefix-first order

pub mod alias;
pub mod archive;
pub mod cache;
pub mod dispatcher;
pub mod outcome;
pub mod page;
pub mod path;
pub mod post;
pub mod start_page;

use std::sync::Arc;

use async_trait::async_trait;

use crate::clock::{Clock, SystemClock};
use crate::config::RouterConfig;
use crate::content::{ContentApi, ContentResult, SiteId};

pub use alias::AliasRouter;
pub use archive::{ArchiveQuery, ArchiveRouter};
pub use cache::CacheDescriptor;
pub use dispatcher::{DispatchOptions, Dispatcher};
pub use outcome::{QueryParams, RedirectOutcome, RouteOutcome, RouteTarget, HANDLED_PARAM};
pub use page::PageRouter;
pub use post::PostRouter;
pub use start_page::StartPageRouter;

/// A single resolution strategy.
#[async_trait]
pub trait Router: Send + Sync {
    /// Name used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Resolve `path` for `site_id`.
    ///
    /// Returns `Ok(RouteOutcome::NoMatch)` when the router does not claim the
    /// path, and `Err` only when the facade failed.
    async fn resolve(&self, path: &str, site_id: SiteId) -> ContentResult<RouteOutcome>;
}

/// Dependencies shared by all routers.
#[derive(Clone)]
pub struct RouterContext {
    pub content: Arc<dyn ContentApi>,
    pub config: Arc<RouterConfig>,
    pub clock: Arc<dyn Clock>,
}

impl RouterContext {
    /// Context using the system clock.
    pub fn new(content: Arc<dyn ContentApi>, config: Arc<RouterConfig>) -> Self {
        Self {
            content,
            config,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

impl std::fmt::Debug for RouterContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterContext")
            .field("config", &self.config)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

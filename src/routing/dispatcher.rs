//! Router composition.
//!
//! # Responsibilities
//! - Run the enabled routers in precedence order
//! - Apply the visibility policy to unpublished routes
//! - Record per-router outcomes and facade failures
//! - Expose sitemap construction next to resolution
//!
//! # Design Decisions
//! - Default order: alias → start page → archive → page → post; first
//!   match wins. `[routing] order` overrides it
//! - A facade failure stops dispatch immediately and is returned as-is
//! - Unpublished routes become NoMatch outside preview; redirects are
//!   never hidden

use std::sync::Arc;

use crate::config::RouterKind;
use crate::content::{ContentApi, ContentResult, SiteId};
use crate::observability::metrics;
use crate::routing::{
    AliasRouter, ArchiveRouter, PageRouter, PostRouter, RouteOutcome, Router, RouterContext,
    StartPageRouter,
};
use crate::sitemap::{Sitemap, SitemapBuilder};

/// Per-call dispatch settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchOptions {
    /// Return unpublished content instead of hiding it.
    pub preview: bool,
}

/// Resolves request paths through the configured routers.
pub struct Dispatcher {
    routers: Vec<Box<dyn Router>>,
    sitemap: SitemapBuilder,
}

impl Dispatcher {
    /// Build the router chain from the context's configuration.
    pub fn new(ctx: RouterContext) -> Self {
        let routing = ctx.config.routing.clone();
        let routers: Vec<Box<dyn Router>> = routing
            .order
            .iter()
            .filter(|kind| routing.enabled(**kind))
            .map(|kind| -> Box<dyn Router> {
                match kind {
                    RouterKind::Alias => Box::new(AliasRouter::new(ctx.clone())),
                    RouterKind::StartPage => Box::new(StartPageRouter::new(ctx.clone())),
                    RouterKind::Archive => Box::new(ArchiveRouter::new(ctx.clone())),
                    RouterKind::Page => Box::new(PageRouter::new(ctx.clone())),
                    RouterKind::Post => Box::new(PostRouter::new(ctx.clone())),
                }
            })
            .collect();

        Self::with_routers(routers, ctx.content)
    }

    /// Build a dispatcher over an explicit router chain.
    pub fn with_routers(routers: Vec<Box<dyn Router>>, content: Arc<dyn ContentApi>) -> Self {
        tracing::debug!(
            routers = ?routers.iter().map(|r| r.name()).collect::<Vec<_>>(),
            "Dispatcher ready"
        );
        Self {
            routers,
            sitemap: SitemapBuilder::new(content),
        }
    }

    /// Names of the routers in the order they are tried.
    pub fn router_names(&self) -> Vec<&'static str> {
        self.routers.iter().map(|r| r.name()).collect()
    }

    /// Resolve with default options.
    pub async fn resolve(&self, path: &str, site_id: SiteId) -> ContentResult<RouteOutcome> {
        self.resolve_with(path, site_id, DispatchOptions::default()).await
    }

    /// Resolve `path`, trying each router until one claims it.
    pub async fn resolve_with(
        &self,
        path: &str,
        site_id: SiteId,
        options: DispatchOptions,
    ) -> ContentResult<RouteOutcome> {
        for router in &self.routers {
            let name = router.name();
            let outcome = match router.resolve(path, site_id).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::warn!(router = name, path, %site_id, error = %e, "Content lookup failed");
                    metrics::record_facade_error(name);
                    return Err(e);
                }
            };
            metrics::record_resolution(name, &outcome);

            match outcome {
                RouteOutcome::NoMatch => continue,
                RouteOutcome::Route(ref target) if !target.is_published && !options.preview => {
                    tracing::debug!(
                        router = name,
                        path,
                        %site_id,
                        content_id = %target.content_id,
                        "Unpublished content hidden"
                    );
                    return Ok(RouteOutcome::NoMatch);
                }
                outcome => {
                    tracing::debug!(router = name, path, %site_id, outcome = outcome.label(), "Path resolved");
                    return Ok(outcome);
                }
            }
        }

        tracing::debug!(path, %site_id, "No router matched");
        Ok(RouteOutcome::NoMatch)
    }

    /// Sitemap of the site's published pages.
    pub async fn sitemap(&self, site_id: SiteId) -> ContentResult<Sitemap> {
        self.sitemap.build(site_id).await
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("routers", &self.router_names())
            .finish_non_exhaustive()
    }
}

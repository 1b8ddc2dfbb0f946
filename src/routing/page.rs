//! Page resolution by longest slug prefix.
//!
//! # Responsibilities
//! - Try candidate slugs from the full path down to its first segment
//! - Honour page-level redirects
//! - Expose trailing segments as a sub-path of the page's route
//!
//! # Design Decisions
//! - Longest prefix first, so hierarchical slugs (`about/team`) win over
//!   their parents
//! - The first slug hit ends the search; a hit on a blog or other kind is
//!   left to the archive router and yields NoMatch here
//! - O(n) lookups for n segments; no candidate shorter than the match is
//!   ever queried

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::clock::is_published;
use crate::content::{ContentResult, PageKind, PageSummary, SiteId};
use crate::routing::outcome::{append_sub_path, HANDLED_PARAM};
use crate::routing::{
    path, CacheDescriptor, QueryParams, RouteOutcome, RouteTarget, Router, RouterContext,
};

/// Resolves standalone pages.
#[derive(Debug, Clone)]
pub struct PageRouter {
    ctx: RouterContext,
}

impl PageRouter {
    pub fn new(ctx: RouterContext) -> Self {
        Self { ctx }
    }
}

/// Build the route for a page of kind `Page`.
///
/// `last_modified` is passed separately so the start page can fold in the
/// site's own timestamp.
pub(crate) fn page_target(
    ctx: &RouterContext,
    page: &PageSummary,
    rest: &[&str],
    is_start_page: bool,
    last_modified: Option<DateTime<Utc>>,
) -> RouteTarget {
    let base = ctx
        .config
        .effective_route(page.route.as_deref(), &page.type_id, &ctx.config.routes.page);

    let mut query = QueryParams::new();
    query.insert("id", page.id);
    query.insert("startpage", is_start_page);
    query.insert(HANDLED_PARAM, true);

    RouteTarget {
        route: append_sub_path(&base, rest),
        query,
        content_id: page.id,
        is_published: is_published(page.published, ctx.clock.now()),
        cache: Some(CacheDescriptor::derive(page.id, last_modified)),
    }
}

#[async_trait]
impl Router for PageRouter {
    fn name(&self) -> &'static str {
        "page"
    }

    async fn resolve(&self, path: &str, site_id: SiteId) -> ContentResult<RouteOutcome> {
        let Some(segments) = path::segments(path) else {
            return Ok(RouteOutcome::NoMatch);
        };

        for k in (1..=segments.len()).rev() {
            let slug = segments[..k].join("/");
            let Some(page) = self.ctx.content.page_by_slug(site_id, &slug).await? else {
                continue;
            };

            if page.kind != PageKind::Page {
                tracing::debug!(
                    router = "page",
                    path,
                    %site_id,
                    slug = %slug,
                    kind = page.kind.as_str(),
                    "Slug belongs to a non-page content type"
                );
                return Ok(RouteOutcome::NoMatch);
            }

            if let Some(redirect) = page.redirect.as_ref().filter(|r| !r.url.is_empty()) {
                tracing::debug!(router = "page", path, %site_id, target = %redirect.url, "Page redirect");
                return Ok(RouteOutcome::redirect(redirect.url.clone(), redirect.permanent));
            }

            let target = page_target(
                &self.ctx,
                &page,
                &segments[k..],
                page.is_start_page,
                page.last_modified,
            );
            tracing::debug!(router = "page", path, %site_id, route = %target.route, "Page matched");
            return Ok(RouteOutcome::Route(target));
        }

        Ok(RouteOutcome::NoMatch)
    }
}

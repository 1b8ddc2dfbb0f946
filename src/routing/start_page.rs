//! Site root resolution.
//!
//! # Responsibilities
//! - Resolve `""` and `"/"` to the site's designated start page
//! - Fold the site's content timestamp into the cache validators
//! - Hand blog start pages to the archive router unchanged
//!
//! # Design Decisions
//! - Missing site, missing start page id, or a dangling id all yield NoMatch
//! - The site timestamp only ever moves Last-Modified forward

use async_trait::async_trait;

use crate::content::{ContentResult, PageKind, SiteId};
use crate::routing::page::page_target;
use crate::routing::{path, ArchiveRouter, RouteOutcome, Router, RouterContext};

/// Resolves the site root.
#[derive(Debug, Clone)]
pub struct StartPageRouter {
    ctx: RouterContext,
    archive: ArchiveRouter,
}

impl StartPageRouter {
    pub fn new(ctx: RouterContext) -> Self {
        let archive = ArchiveRouter::new(ctx.clone());
        Self { ctx, archive }
    }
}

#[async_trait]
impl Router for StartPageRouter {
    fn name(&self) -> &'static str {
        "start_page"
    }

    async fn resolve(&self, path: &str, site_id: SiteId) -> ContentResult<RouteOutcome> {
        if !path::is_root(path) {
            return Ok(RouteOutcome::NoMatch);
        }

        let Some(site) = self.ctx.content.site_by_id(site_id).await? else {
            return Ok(RouteOutcome::NoMatch);
        };
        let Some(start_page_id) = site.start_page_id else {
            tracing::debug!(router = "start_page", %site_id, "No start page configured");
            return Ok(RouteOutcome::NoMatch);
        };
        let Some(page) = self.ctx.content.page_by_id(start_page_id).await? else {
            tracing::warn!(router = "start_page", %site_id, %start_page_id, "Start page not found");
            return Ok(RouteOutcome::NoMatch);
        };

        match page.kind {
            PageKind::Blog => {
                tracing::debug!(router = "start_page", %site_id, slug = %page.slug, "Start page is an archive");
                self.archive.resolve(&format!("/{}", page.slug), site_id).await
            }
            PageKind::Page => {
                let last_modified = match (page.last_modified, site.content_last_modified) {
                    (Some(own), Some(site_modified)) => Some(own.max(site_modified)),
                    (own, site_modified) => own.or(site_modified),
                };
                let target = page_target(&self.ctx, &page, &[], true, last_modified);
                tracing::debug!(router = "start_page", %site_id, route = %target.route, "Start page matched");
                Ok(RouteOutcome::Route(target))
            }
            PageKind::Other => Ok(RouteOutcome::NoMatch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RouterConfig;
    use crate::content::{InMemoryContent, PageSummary, SiteSummary};
    use crate::routing::{CacheDescriptor, HANDLED_PARAM};
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::Arc;
    use uuid::Uuid;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
    }

    fn start_page(site_id: SiteId, kind: PageKind) -> PageSummary {
        PageSummary {
            id: Uuid::new_v4(),
            site_id,
            parent_id: None,
            sort_order: 0,
            slug: "home".into(),
            title: "Home".into(),
            navigation_title: None,
            is_hidden: false,
            type_id: "standard".into(),
            kind,
            route: Some("/start".into()),
            redirect: None,
            published: Some(at(1)),
            last_modified: Some(at(5)),
            is_start_page: true,
        }
    }

    fn router(site: SiteSummary, pages: Vec<PageSummary>) -> StartPageRouter {
        let mut content = InMemoryContent::new().with_site(site);
        for page in pages {
            content = content.with_page(page);
        }
        StartPageRouter::new(RouterContext::new(
            Arc::new(content),
            Arc::new(RouterConfig::default()),
        ))
    }

    #[tokio::test]
    async fn test_site_timestamp_wins_when_newer() {
        let site_id = Uuid::new_v4();
        let page = start_page(site_id, PageKind::Page);
        let site = SiteSummary {
            id: site_id,
            title: String::new(),
            start_page_id: Some(page.id),
            content_last_modified: Some(at(9)),
        };
        let router = router(site, vec![page.clone()]);

        for path in ["", "/"] {
            let outcome = router.resolve(path, site_id).await.unwrap();
            let target = outcome.as_route().unwrap();
            assert_eq!(target.route, "/start");
            assert_eq!(target.query.get("startpage"), Some("true"));
            assert_eq!(target.query.get(HANDLED_PARAM), Some("true"));
            assert_eq!(target.cache, Some(CacheDescriptor::derive(page.id, Some(at(9)))));
        }
    }

    #[tokio::test]
    async fn test_page_timestamp_wins_when_newer() {
        let site_id = Uuid::new_v4();
        let page = start_page(site_id, PageKind::Page);
        let site = SiteSummary {
            id: site_id,
            title: String::new(),
            start_page_id: Some(page.id),
            content_last_modified: Some(at(2)),
        };
        let outcome = router(site, vec![page.clone()]).resolve("/", site_id).await.unwrap();
        let cache = outcome.as_route().unwrap().cache.clone().unwrap();
        assert_eq!(cache.last_modified(), Some(at(5)));
    }

    #[tokio::test]
    async fn test_non_root_and_unconfigured() {
        let site_id = Uuid::new_v4();
        let site = SiteSummary {
            id: site_id,
            title: String::new(),
            start_page_id: None,
            content_last_modified: None,
        };
        let router = router(site, Vec::new());
        assert_eq!(router.resolve("/about", site_id).await.unwrap(), RouteOutcome::NoMatch);
        assert_eq!(router.resolve("/", site_id).await.unwrap(), RouteOutcome::NoMatch);
        assert_eq!(router.resolve("/", Uuid::new_v4()).await.unwrap(), RouteOutcome::NoMatch);
    }

    #[tokio::test]
    async fn test_site_timestamp_used_when_page_has_none() {
        let site_id = Uuid::new_v4();
        let mut page = start_page(site_id, PageKind::Page);
        page.last_modified = None;
        let site = SiteSummary {
            id: site_id,
            title: String::new(),
            start_page_id: Some(page.id),
            content_last_modified: Some(at(3)),
        };
        let outcome = router(site, vec![page.clone()]).resolve("/", site_id).await.unwrap();
        assert_eq!(
            outcome.as_route().unwrap().cache,
            Some(CacheDescriptor::derive(page.id, Some(at(3))))
        );
    }

    #[tokio::test]
    async fn test_dangling_start_page_id() {
        let site_id = Uuid::new_v4();
        let site = SiteSummary {
            id: site_id,
            title: String::new(),
            start_page_id: Some(Uuid::new_v4()),
            content_last_modified: None,
        };
        let router = router(site, vec![start_page(site_id, PageKind::Page)]);
        assert_eq!(router.resolve("/", site_id).await.unwrap(), RouteOutcome::NoMatch);
    }

    #[tokio::test]
    async fn test_other_kind_start_page() {
        let site_id = Uuid::new_v4();
        let page = start_page(site_id, PageKind::Other);
        let site = SiteSummary {
            id: site_id,
            title: String::new(),
            start_page_id: Some(page.id),
            content_last_modified: None,
        };
        let router = router(site, vec![page]);
        assert_eq!(router.resolve("/", site_id).await.unwrap(), RouteOutcome::NoMatch);
    }

    #[tokio::test]
    async fn test_blog_start_page_delegates_to_archive() {
        let site_id = Uuid::new_v4();
        let mut blog = start_page(site_id, PageKind::Blog);
        blog.slug = "news".into();
        let site = SiteSummary {
            id: site_id,
            title: String::new(),
            start_page_id: Some(blog.id),
            content_last_modified: Some(at(9)),
        };
        let router = router(site, vec![blog]);

        let root = router.resolve("/", site_id).await.unwrap();
        let direct = router.archive.resolve("/news", site_id).await.unwrap();
        assert!(root.is_match());
        assert_eq!(root, direct);
    }
}

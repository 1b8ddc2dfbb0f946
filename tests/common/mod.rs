//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use cms_router::clock::FixedClock;
use cms_router::config::RouterConfig;
use cms_router::content::{
    Alias, ContentApi, ContentError, ContentId, ContentResult, InMemoryContent, PageKind, PageSummary,
    PostSummary, SiteId, SiteSummary, Taxonomy,
};
use cms_router::routing::RouterContext;

/// The instant every test clock is frozen at.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

pub fn page(site_id: SiteId, slug: &str) -> PageSummary {
    PageSummary {
        id: Uuid::new_v4(),
        site_id,
        parent_id: None,
        sort_order: 0,
        slug: slug.to_string(),
        title: slug.to_string(),
        navigation_title: None,
        is_hidden: false,
        type_id: "standard".to_string(),
        kind: PageKind::Page,
        route: None,
        redirect: None,
        published: Some(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()),
        last_modified: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        is_start_page: false,
    }
}

pub fn blog(site_id: SiteId, slug: &str) -> PageSummary {
    PageSummary {
        kind: PageKind::Blog,
        type_id: "archive".to_string(),
        ..page(site_id, slug)
    }
}

pub fn post(blog: &PageSummary, slug: &str) -> PostSummary {
    PostSummary {
        id: Uuid::new_v4(),
        blog_id: blog.id,
        type_id: "article".to_string(),
        slug: slug.to_string(),
        route: None,
        published: Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()),
        last_modified: Some(Utc.with_ymd_and_hms(2024, 2, 2, 0, 0, 0).unwrap()),
    }
}

pub fn category(blog: &PageSummary, slug: &str) -> Taxonomy {
    Taxonomy {
        id: Uuid::new_v4(),
        blog_id: blog.id,
        slug: slug.to_string(),
        title: slug.to_string(),
    }
}

pub fn site(id: SiteId, start_page_id: Option<ContentId>) -> SiteSummary {
    SiteSummary {
        id,
        title: "Test".to_string(),
        start_page_id,
        content_last_modified: None,
    }
}

pub fn alias(site_id: SiteId, from: &str, to: &str, permanent: bool) -> Alias {
    Alias {
        id: Uuid::new_v4(),
        site_id,
        alias_url: from.to_string(),
        redirect_url: to.to_string(),
        permanent,
    }
}

/// Router context over `content` with a frozen clock.
pub fn context(content: Arc<dyn ContentApi>, config: RouterConfig) -> RouterContext {
    RouterContext::new(content, Arc::new(config)).with_clock(Arc::new(FixedClock(now())))
}

/// Facade that records every page slug lookup before delegating.
pub struct RecordingContent {
    inner: InMemoryContent,
    slugs: Mutex<Vec<String>>,
}

impl RecordingContent {
    pub fn new(inner: InMemoryContent) -> Self {
        Self {
            inner,
            slugs: Mutex::new(Vec::new()),
        }
    }

    pub fn slug_lookups(&self) -> Vec<String> {
        self.slugs.lock().expect("lookup log poisoned").clone()
    }
}

#[async_trait]
impl ContentApi for RecordingContent {
    async fn page_by_slug(&self, site_id: SiteId, slug: &str) -> ContentResult<Option<PageSummary>> {
        self.slugs.lock().expect("lookup log poisoned").push(slug.to_string());
        self.inner.page_by_slug(site_id, slug).await
    }

    async fn page_by_id(&self, id: ContentId) -> ContentResult<Option<PageSummary>> {
        self.inner.page_by_id(id).await
    }

    async fn post_by_slug(
        &self,
        site_id: SiteId,
        archive_slug: &str,
        post_slug: &str,
    ) -> ContentResult<Option<PostSummary>> {
        self.inner.post_by_slug(site_id, archive_slug, post_slug).await
    }

    async fn category_by_slug(&self, blog_id: ContentId, slug: &str) -> ContentResult<Option<Taxonomy>> {
        self.inner.category_by_slug(blog_id, slug).await
    }

    async fn tag_by_slug(&self, blog_id: ContentId, slug: &str) -> ContentResult<Option<Taxonomy>> {
        self.inner.tag_by_slug(blog_id, slug).await
    }

    async fn site_by_id(&self, id: SiteId) -> ContentResult<Option<SiteSummary>> {
        self.inner.site_by_id(id).await
    }

    async fn alias_by_url(&self, site_id: SiteId, url: &str) -> ContentResult<Option<Alias>> {
        self.inner.alias_by_url(site_id, url).await
    }

    async fn published_pages(&self, site_id: SiteId) -> ContentResult<Vec<PageSummary>> {
        self.inner.published_pages(site_id).await
    }
}

/// Facade that answers from `inner` until `fail_from` calls have been made,
/// then fails every call with `error`.
pub struct FlakyContent {
    inner: InMemoryContent,
    fail_from: u32,
    calls: AtomicU32,
    error: ContentError,
}

impl FlakyContent {
    pub fn new(inner: InMemoryContent, fail_from: u32, error: ContentError) -> Self {
        Self {
            inner,
            fail_from,
            calls: AtomicU32::new(0),
            error,
        }
    }

    /// Fails on the very first call.
    pub fn down(error: ContentError) -> Self {
        Self::new(InMemoryContent::new(), 0, error)
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> ContentResult<()> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call >= self.fail_from {
            Err(self.error.clone())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ContentApi for FlakyContent {
    async fn page_by_slug(&self, site_id: SiteId, slug: &str) -> ContentResult<Option<PageSummary>> {
        self.check()?;
        self.inner.page_by_slug(site_id, slug).await
    }

    async fn page_by_id(&self, id: ContentId) -> ContentResult<Option<PageSummary>> {
        self.check()?;
        self.inner.page_by_id(id).await
    }

    async fn post_by_slug(
        &self,
        site_id: SiteId,
        archive_slug: &str,
        post_slug: &str,
    ) -> ContentResult<Option<PostSummary>> {
        self.check()?;
        self.inner.post_by_slug(site_id, archive_slug, post_slug).await
    }

    async fn category_by_slug(&self, blog_id: ContentId, slug: &str) -> ContentResult<Option<Taxonomy>> {
        self.check()?;
        self.inner.category_by_slug(blog_id, slug).await
    }

    async fn tag_by_slug(&self, blog_id: ContentId, slug: &str) -> ContentResult<Option<Taxonomy>> {
        self.check()?;
        self.inner.tag_by_slug(blog_id, slug).await
    }

    async fn site_by_id(&self, id: SiteId) -> ContentResult<Option<SiteSummary>> {
        self.check()?;
        self.inner.site_by_id(id).await
    }

    async fn alias_by_url(&self, site_id: SiteId, url: &str) -> ContentResult<Option<Alias>> {
        self.check()?;
        self.inner.alias_by_url(site_id, url).await
    }

    async fn published_pages(&self, site_id: SiteId) -> ContentResult<Vec<PageSummary>> {
        self.check()?;
        self.inner.published_pages(site_id).await
    }
}

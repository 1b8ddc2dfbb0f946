//! Deadline enforcement for facade lookups.
//!
//! # Responsibilities
//! - Wrap any `ContentApi` so each lookup has a deadline
//! - Report an elapsed deadline as `ContentError::Timeout`
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - No retries; a timed-out lookup fails the resolution

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::content::types::{
    Alias, ContentId, PageSummary, PostSummary, SiteId, SiteSummary, Taxonomy,
};
use crate::content::{ContentApi, ContentError, ContentResult};

/// Facade decorator applying a per-lookup deadline.
#[derive(Debug, Clone)]
pub struct TimeoutContent<C> {
    inner: C,
    deadline: Duration,
}

impl<C> TimeoutContent<C> {
    pub fn new(inner: C, deadline: Duration) -> Self {
        Self { inner, deadline }
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    async fn guard<T, F>(&self, lookup: &'static str, fut: F) -> ContentResult<T>
    where
        F: Future<Output = ContentResult<T>>,
    {
        match tokio::time::timeout(self.deadline, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(lookup, deadline = ?self.deadline, "Content lookup timed out");
                Err(ContentError::Timeout(self.deadline))
            }
        }
    }
}

#[async_trait]
impl<C: ContentApi> ContentApi for TimeoutContent<C> {
    async fn page_by_slug(&self, site_id: SiteId, slug: &str) -> ContentResult<Option<PageSummary>> {
        self.guard("page_by_slug", self.inner.page_by_slug(site_id, slug)).await
    }

    async fn page_by_id(&self, id: ContentId) -> ContentResult<Option<PageSummary>> {
        self.guard("page_by_id", self.inner.page_by_id(id)).await
    }

    async fn post_by_slug(
        &self,
        site_id: SiteId,
        archive_slug: &str,
        post_slug: &str,
    ) -> ContentResult<Option<PostSummary>> {
        self.guard(
            "post_by_slug",
            self.inner.post_by_slug(site_id, archive_slug, post_slug),
        )
        .await
    }

    async fn category_by_slug(&self, blog_id: ContentId, slug: &str) -> ContentResult<Option<Taxonomy>> {
        self.guard("category_by_slug", self.inner.category_by_slug(blog_id, slug)).await
    }

    async fn tag_by_slug(&self, blog_id: ContentId, slug: &str) -> ContentResult<Option<Taxonomy>> {
        self.guard("tag_by_slug", self.inner.tag_by_slug(blog_id, slug)).await
    }

    async fn site_by_id(&self, id: SiteId) -> ContentResult<Option<SiteSummary>> {
        self.guard("site_by_id", self.inner.site_by_id(id)).await
    }

    async fn alias_by_url(&self, site_id: SiteId, url: &str) -> ContentResult<Option<Alias>> {
        self.guard("alias_by_url", self.inner.alias_by_url(site_id, url)).await
    }

    async fn published_pages(&self, site_id: SiteId) -> ContentResult<Vec<PageSummary>> {
        self.guard("published_pages", self.inner.published_pages(site_id)).await
    }
}

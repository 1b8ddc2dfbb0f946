//! Content Access Facade.
//!
//! # Data Flow
//! ```text
//! Router (page, post, archive, start page, alias)
//!     → ContentApi lookup (by slug / id / url)
//!     → Ok(Some(summary))  content found
//!     → Ok(None)           content does not exist
//!     → Err(ContentError)  backend could not answer
//! ```
//!
//! # Design Decisions
//! - Read-only: the routing core never writes through the facade
//! - "Not found" and "failed" are different values, so an outage is never
//!   mistaken for a missing page
//! - Implementations must be safe for concurrent use; routers share one
//!   facade behind an `Arc`

pub mod memory;
pub mod timeout;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::{InMemoryContent, SiteFixture};
pub use timeout::TimeoutContent;
pub use types::{
    Alias, ContentId, PageKind, PageSummary, PostSummary, RedirectTarget, SiteId, SiteSummary,
    Taxonomy, EMPTY_TAXONOMY_ID,
};

/// Failures raised by a facade implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentError {
    /// The backing store returned an error.
    #[error("content backend error: {0}")]
    Backend(String),

    /// The lookup did not complete in time.
    #[error("content lookup timed out after {0:?}")]
    Timeout(Duration),

    /// The lookup was cancelled before it completed.
    #[error("content lookup cancelled")]
    Cancelled,
}

/// Result type for facade lookups.
pub type ContentResult<T> = Result<T, ContentError>;

/// Asynchronous read-only lookups the routers depend on.
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// Page by site-unique slug.
    async fn page_by_slug(&self, site_id: SiteId, slug: &str) -> ContentResult<Option<PageSummary>>;

    /// Page by id.
    async fn page_by_id(&self, id: ContentId) -> ContentResult<Option<PageSummary>>;

    /// Post by the slug of its archive and its own slug within that archive.
    async fn post_by_slug(
        &self,
        site_id: SiteId,
        archive_slug: &str,
        post_slug: &str,
    ) -> ContentResult<Option<PostSummary>>;

    async fn category_by_slug(&self, blog_id: ContentId, slug: &str) -> ContentResult<Option<Taxonomy>>;

    async fn tag_by_slug(&self, blog_id: ContentId, slug: &str) -> ContentResult<Option<Taxonomy>>;

    async fn site_by_id(&self, id: SiteId) -> ContentResult<Option<SiteSummary>>;

    /// Alias whose url exactly equals `url`.
    async fn alias_by_url(&self, site_id: SiteId, url: &str) -> ContentResult<Option<Alias>>;

    /// Every published page of the site, flat and unordered.
    async fn published_pages(&self, site_id: SiteId) -> ContentResult<Vec<PageSummary>>;
}

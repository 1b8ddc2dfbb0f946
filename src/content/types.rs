//! Content summaries returned by the facade.
//!
//! All of these are request-scoped values. The routing core never mutates
//! or caches them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of any content item (page, post, category, tag, alias).
pub type ContentId = Uuid;

/// Identifier of a site.
pub type SiteId = Uuid;

/// Reserved id meaning "a taxonomy filter was requested but nothing matched".
pub const EMPTY_TAXONOMY_ID: ContentId = Uuid::nil();

/// Routing-relevant classification of a page's content type.
///
/// Decided once by the facade when the page is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// A standalone page, served by the page router.
    #[default]
    Page,
    /// A paginated, filterable container of posts.
    Blog,
    /// Anything else. Never claimed by a router.
    Other,
}

impl PageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::Page => "page",
            PageKind::Blog => "blog",
            PageKind::Other => "other",
        }
    }
}

/// Redirect declared on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectTarget {
    pub url: String,
    #[serde(default)]
    pub permanent: bool,
}

/// Page as seen by the routers and the sitemap builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSummary {
    pub id: ContentId,
    pub site_id: SiteId,
    #[serde(default)]
    pub parent_id: Option<ContentId>,
    #[serde(default)]
    pub sort_order: i32,
    /// Site-unique slug. May contain `/` for hierarchical slugs.
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub navigation_title: Option<String>,
    #[serde(default)]
    pub is_hidden: bool,
    /// Content type id, used to look up the type's default route.
    #[serde(default)]
    pub type_id: String,
    #[serde(default)]
    pub kind: PageKind,
    /// Route override set on the page itself.
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub redirect: Option<RedirectTarget>,
    #[serde(default)]
    pub published: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_start_page: bool,
}

/// Post as seen by the post router.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: ContentId,
    /// The archive page the post belongs to.
    pub blog_id: ContentId,
    #[serde(default)]
    pub type_id: String,
    /// Slug, unique within its archive.
    pub slug: String,
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub published: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
}

/// Site-level settings relevant to routing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSummary {
    pub id: SiteId,
    #[serde(default)]
    pub title: String,
    /// The designated start page, if one is configured.
    #[serde(default)]
    pub start_page_id: Option<ContentId>,
    /// Bumped when site-wide content changes (settings, menus).
    #[serde(default)]
    pub content_last_modified: Option<DateTime<Utc>>,
}

/// A category or tag scoped to one archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Taxonomy {
    pub id: ContentId,
    pub blog_id: ContentId,
    pub slug: String,
    #[serde(default)]
    pub title: String,
}

/// Administrator-defined redirect from one URL to another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alias {
    pub id: ContentId,
    pub site_id: SiteId,
    pub alias_url: String,
    pub redirect_url: String,
    #[serde(default)]
    pub permanent: bool,
}

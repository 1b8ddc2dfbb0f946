//! In-memory content facade.
//!
//! # Responsibilities
//! - Answer every `ContentApi` lookup from immutable record lists
//! - Load site fixtures from TOML for the CLI and integration tests
//!
//! # Design Decisions
//! - Records are frozen after construction, so no locking is needed
//! - Linear scans; fixtures are small
//! - Publish filtering uses the injected clock, never the wall clock directly

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::{is_published, Clock, SystemClock};
use crate::content::types::{
    Alias, ContentId, PageSummary, PostSummary, SiteId, SiteSummary, Taxonomy,
};
use crate::content::{ContentApi, ContentResult};

/// Error type for fixture loading.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid fixture: {0}")]
    Invalid(String),
}

/// Serialized form of a set of sites and their content.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteFixture {
    pub sites: Vec<SiteSummary>,
    pub pages: Vec<PageSummary>,
    pub posts: Vec<PostSummary>,
    pub categories: Vec<Taxonomy>,
    pub tags: Vec<Taxonomy>,
    pub aliases: Vec<Alias>,
}

impl SiteFixture {
    /// Load and check a fixture from a TOML file.
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let content = fs::read_to_string(path)?;
        let fixture: SiteFixture = toml::from_str(&content)?;
        fixture.check()?;
        Ok(fixture)
    }

    /// Every page and alias must belong to a declared site.
    fn check(&self) -> Result<(), FixtureError> {
        for page in &self.pages {
            if !self.sites.iter().any(|s| s.id == page.site_id) {
                return Err(FixtureError::Invalid(format!(
                    "page '{}' references unknown site {}",
                    page.slug, page.site_id
                )));
            }
        }
        for alias in &self.aliases {
            if !self.sites.iter().any(|s| s.id == alias.site_id) {
                return Err(FixtureError::Invalid(format!(
                    "alias '{}' references unknown site {}",
                    alias.alias_url, alias.site_id
                )));
            }
        }
        Ok(())
    }
}

/// Facade backed by in-memory records.
#[derive(Debug, Clone)]
pub struct InMemoryContent {
    sites: HashMap<SiteId, SiteSummary>,
    pages: Vec<PageSummary>,
    posts: Vec<PostSummary>,
    categories: Vec<Taxonomy>,
    tags: Vec<Taxonomy>,
    aliases: Vec<Alias>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryContent {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryContent {
    /// Create an empty store using the system clock.
    pub fn new() -> Self {
        Self {
            sites: HashMap::new(),
            pages: Vec::new(),
            posts: Vec::new(),
            categories: Vec::new(),
            tags: Vec::new(),
            aliases: Vec::new(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Build a store from a loaded fixture.
    pub fn from_fixture(fixture: SiteFixture) -> Self {
        let mut store = Self::new();
        for site in fixture.sites {
            store.sites.insert(site.id, site);
        }
        store.pages = fixture.pages;
        store.posts = fixture.posts;
        store.categories = fixture.categories;
        store.tags = fixture.tags;
        store.aliases = fixture.aliases;
        store
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_site(mut self, site: SiteSummary) -> Self {
        self.sites.insert(site.id, site);
        self
    }

    pub fn with_page(mut self, page: PageSummary) -> Self {
        self.pages.push(page);
        self
    }

    pub fn with_post(mut self, post: PostSummary) -> Self {
        self.posts.push(post);
        self
    }

    pub fn with_category(mut self, category: Taxonomy) -> Self {
        self.categories.push(category);
        self
    }

    pub fn with_tag(mut self, tag: Taxonomy) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn with_alias(mut self, alias: Alias) -> Self {
        self.aliases.push(alias);
        self
    }

    /// Ids of all known sites, sorted for stable output.
    pub fn site_ids(&self) -> Vec<SiteId> {
        let mut ids: Vec<SiteId> = self.sites.keys().copied().collect();
        ids.sort();
        ids
    }

    fn find_page(&self, site_id: SiteId, slug: &str) -> Option<&PageSummary> {
        self.pages
            .iter()
            .find(|p| p.site_id == site_id && p.slug == slug)
    }
}

fn find_taxonomy(items: &[Taxonomy], blog_id: ContentId, slug: &str) -> Option<Taxonomy> {
    items
        .iter()
        .find(|t| t.blog_id == blog_id && t.slug == slug)
        .cloned()
}

#[async_trait]
impl ContentApi for InMemoryContent {
    async fn page_by_slug(&self, site_id: SiteId, slug: &str) -> ContentResult<Option<PageSummary>> {
        Ok(self.find_page(site_id, slug).cloned())
    }

    async fn page_by_id(&self, id: ContentId) -> ContentResult<Option<PageSummary>> {
        Ok(self.pages.iter().find(|p| p.id == id).cloned())
    }

    async fn post_by_slug(
        &self,
        site_id: SiteId,
        archive_slug: &str,
        post_slug: &str,
    ) -> ContentResult<Option<PostSummary>> {
        let Some(archive) = self.find_page(site_id, archive_slug) else {
            return Ok(None);
        };
        Ok(self
            .posts
            .iter()
            .find(|p| p.blog_id == archive.id && p.slug == post_slug)
            .cloned())
    }

    async fn category_by_slug(&self, blog_id: ContentId, slug: &str) -> ContentResult<Option<Taxonomy>> {
        Ok(find_taxonomy(&self.categories, blog_id, slug))
    }

    async fn tag_by_slug(&self, blog_id: ContentId, slug: &str) -> ContentResult<Option<Taxonomy>> {
        Ok(find_taxonomy(&self.tags, blog_id, slug))
    }

    async fn site_by_id(&self, id: SiteId) -> ContentResult<Option<SiteSummary>> {
        Ok(self.sites.get(&id).cloned())
    }

    async fn alias_by_url(&self, site_id: SiteId, url: &str) -> ContentResult<Option<Alias>> {
        Ok(self
            .aliases
            .iter()
            .find(|a| a.site_id == site_id && a.alias_url == url)
            .cloned())
    }

    async fn published_pages(&self, site_id: SiteId) -> ContentResult<Vec<PageSummary>> {
        let now = self.clock.now();
        Ok(self
            .pages
            .iter()
            .filter(|p| p.site_id == site_id && is_published(p.published, now))
            .cloned()
            .collect())
    }
}

//! Site hierarchy.
//!
//! # Data Flow
//! ```text
//! ContentApi::published_pages(site)   flat, unordered
//!     → builder.rs (group by parent, order by sort order, assign levels)
//!     → Sitemap (forest of SitemapNode)
//!     → navigation: find / partial / breadcrumb / has_child
//! ```
//!
//! # Design Decisions
//! - Rebuilt from a fresh query on every call; nothing is cached here
//! - Every input page appears exactly once: orphans and cycle members
//!   are promoted to roots
//! - Levels are 1-based and computed, never taken from the caller

pub mod builder;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::content::{ContentId, PageKind, PageSummary};

pub use builder::{build_sitemap, SitemapBuilder};

/// One page in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SitemapNode {
    pub id: ContentId,
    pub slug: String,
    pub parent_id: Option<ContentId>,
    pub title: String,
    pub navigation_title: Option<String>,
    /// `"/" + slug`
    pub permalink: String,
    pub is_hidden: bool,
    pub kind: PageKind,
    pub sort_order: i32,
    pub published_at: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
    /// Depth, starting at 1 for roots.
    pub level: u32,
    pub children: Vec<SitemapNode>,
}

impl SitemapNode {
    fn from_page(page: &PageSummary, level: u32, children: Vec<SitemapNode>) -> Self {
        Self {
            id: page.id,
            slug: page.slug.clone(),
            parent_id: page.parent_id,
            title: page.title.clone(),
            navigation_title: page.navigation_title.clone(),
            permalink: format!("/{}", page.slug),
            is_hidden: page.is_hidden,
            kind: page.kind,
            sort_order: page.sort_order,
            published_at: page.published,
            last_modified: page.last_modified,
            level,
            children,
        }
    }

    /// Title for menus: the navigation title when set, else the title.
    pub fn menu_title(&self) -> &str {
        self.navigation_title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.title)
    }

    /// All nodes below this one, depth first.
    pub fn descendants(&self) -> Iter<'_> {
        Iter::new(&self.children)
    }
}

/// Forest of published pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Sitemap {
    roots: Vec<SitemapNode>,
}

impl Sitemap {
    pub fn roots(&self) -> &[SitemapNode] {
        &self.roots
    }

    pub fn into_roots(self) -> Vec<SitemapNode> {
        self.roots
    }

    /// Total number of nodes at every level.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Every node, depth first, parents before children.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.roots)
    }

    pub fn find(&self, id: ContentId) -> Option<&SitemapNode> {
        self.iter().find(|node| node.id == id)
    }

    /// Direct children of `id`.
    pub fn partial(&self, id: ContentId) -> Option<&[SitemapNode]> {
        self.find(id).map(|node| node.children.as_slice())
    }

    /// Nodes from the root down to `id`, inclusive. Empty when not found.
    pub fn breadcrumb(&self, id: ContentId) -> Vec<&SitemapNode> {
        let mut trail = Vec::new();
        if !find_trail(&self.roots, id, &mut trail) {
            trail.clear();
        }
        trail
    }

    /// True when `child` sits anywhere below `parent`.
    pub fn has_child(&self, parent: ContentId, child: ContentId) -> bool {
        self.find(parent)
            .is_some_and(|node| node.descendants().any(|n| n.id == child))
    }
}

fn find_trail<'a>(nodes: &'a [SitemapNode], id: ContentId, trail: &mut Vec<&'a SitemapNode>) -> bool {
    for node in nodes {
        trail.push(node);
        if node.id == id || find_trail(&node.children, id, trail) {
            return true;
        }
        trail.pop();
    }
    false
}

/// Pre-order iterator over sitemap nodes.
pub struct Iter<'a> {
    stack: Vec<&'a SitemapNode>,
}

impl<'a> Iter<'a> {
    fn new(nodes: &'a [SitemapNode]) -> Self {
        Self {
            stack: nodes.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a SitemapNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

//! Sitemap construction.
//!
//! # Responsibilities
//! - Index pages by parent id
//! - Order siblings by sort order, ties in input order
//! - Assign levels top-down
//!
//! # Design Decisions
//! - O(n) grouping plus one stable sort per sibling group
//! - A parent id absent from the input, or pointing at the page itself,
//!   makes the page a root
//! - Pages only reachable through a parent cycle are promoted to roots in
//!   input order, which breaks the cycle at that page

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::content::{ContentApi, ContentId, ContentResult, PageSummary, SiteId};
use crate::sitemap::{Sitemap, SitemapNode};

/// Build the forest for a flat list of published pages.
pub fn build_sitemap(pages: &[PageSummary]) -> Sitemap {
    let ids: HashSet<ContentId> = pages.iter().map(|p| p.id).collect();

    let mut groups: HashMap<Option<ContentId>, Vec<usize>> = HashMap::new();
    for (index, page) in pages.iter().enumerate() {
        let parent = page
            .parent_id
            .filter(|parent| *parent != page.id && ids.contains(parent));
        groups.entry(parent).or_default().push(index);
    }
    for group in groups.values_mut() {
        group.sort_by_key(|&index| pages[index].sort_order);
    }

    let mut visited = vec![false; pages.len()];
    let mut roots = Vec::new();

    if let Some(top) = groups.get(&None) {
        for &index in top {
            roots.push(build_tree(index, pages, &groups, &mut visited));
        }
    }

    for index in 0..pages.len() {
        if !visited[index] {
            tracing::warn!(page_id = %pages[index].id, "Page parent chain forms a cycle, promoting to root");
            roots.push(build_tree(index, pages, &groups, &mut visited));
        }
    }

    Sitemap { roots }
}

/// Assemble the subtree under `root` without recursion.
///
/// A pre-order walk with an explicit stack records each node's level and
/// parent position. Nodes are then built in reverse walk order, so every
/// node's children exist before the node itself.
fn build_tree(
    root: usize,
    pages: &[PageSummary],
    groups: &HashMap<Option<ContentId>, Vec<usize>>,
    visited: &mut [bool],
) -> SitemapNode {
    // (page index, level, position of the parent in `walk`)
    let mut walk: Vec<(usize, u32, usize)> = Vec::new();
    let mut stack = vec![(root, 1, 0)];
    visited[root] = true;

    while let Some((index, level, parent)) = stack.pop() {
        let position = walk.len();
        walk.push((index, level, parent));
        if let Some(group) = groups.get(&Some(pages[index].id)) {
            for &child in group.iter().rev() {
                if !visited[child] {
                    visited[child] = true;
                    stack.push((child, level + 1, position));
                }
            }
        }
    }

    let mut children: Vec<Vec<SitemapNode>> = (0..walk.len()).map(|_| Vec::new()).collect();
    for position in (1..walk.len()).rev() {
        let (index, level, parent) = walk[position];
        let mut own = std::mem::take(&mut children[position]);
        own.reverse();
        children[parent].push(SitemapNode::from_page(&pages[index], level, own));
    }

    let mut own = std::mem::take(&mut children[0]);
    own.reverse();
    SitemapNode::from_page(&pages[root], 1, own)
}

/// Builds sitemaps from the facade's published pages.
#[derive(Clone)]
pub struct SitemapBuilder {
    content: Arc<dyn ContentApi>,
}

impl SitemapBuilder {
    pub fn new(content: Arc<dyn ContentApi>) -> Self {
        Self { content }
    }

    /// Query the site's published pages and assemble them.
    pub async fn build(&self, site_id: SiteId) -> ContentResult<Sitemap> {
        let pages = self.content.published_pages(site_id).await?;
        let sitemap = build_sitemap(&pages);
        tracing::debug!(%site_id, pages = pages.len(), roots = sitemap.roots().len(), "Sitemap built");
        Ok(sitemap)
    }
}

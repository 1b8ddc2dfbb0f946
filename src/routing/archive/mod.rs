//! Archive (blog listing) resolution.
//!
//! # Data Flow
//! ```text
//! /{blog-slug}/[year]/[month]/[category/{slug}]/[tag/{slug}]/[page/{n}]
//!     → page_by_slug(segment 0), must be a Blog
//!     → two-segment year guard
//!     → grammar.rs (pure token pass over the remaining segments)
//!     → category / tag slugs resolved left to right
//!     → ArchiveQuery → Route
//! ```
//!
//! # Design Decisions
//! - Best effort: malformed tokens are ignored, unknown taxonomy slugs map
//!   to the empty sentinel id, nothing aborts the match
//! - Publish state is the blog page's own, not its posts'

pub mod grammar;

use async_trait::async_trait;
use serde::Serialize;

use crate::clock::is_published;
use crate::content::{ContentId, ContentResult, PageKind, SiteId, EMPTY_TAXONOMY_ID};
use crate::routing::outcome::HANDLED_PARAM;
use crate::routing::{
    path, CacheDescriptor, QueryParams, RouteOutcome, RouteTarget, Router, RouterContext,
};

pub use grammar::{parse_filters, FilterToken, ParserState};

/// Filters for a paginated post listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveQuery {
    pub blog_id: ContentId,
    pub year: Option<i32>,
    /// 1..=12
    pub month: Option<u32>,
    /// 1-based
    pub page: Option<u32>,
    pub page_size: u32,
    /// `Some(EMPTY_TAXONOMY_ID)` when a category was requested but not found.
    pub category_id: Option<ContentId>,
    /// Same sentinel convention as `category_id`.
    pub tag_id: Option<ContentId>,
}

impl ArchiveQuery {
    pub fn new(blog_id: ContentId, page_size: u32) -> Self {
        Self {
            blog_id,
            year: None,
            month: None,
            page: None,
            page_size,
            category_id: None,
            tag_id: None,
        }
    }

    /// Query parameters for the listing route. Unset filters render empty.
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert("id", self.blog_id);
        params.insert_opt("year", self.year);
        params.insert_opt("month", self.month);
        params.insert_opt("page", self.page);
        params.insert_opt("pagenum", self.page);
        params.insert("pagesize", self.page_size);
        params.insert_opt("category", self.category_id);
        params.insert_opt("tag", self.tag_id);
        params.insert(HANDLED_PARAM, true);
        params
    }
}

/// Resolves archive listings with their filters.
#[derive(Debug, Clone)]
pub struct ArchiveRouter {
    ctx: RouterContext,
}

impl ArchiveRouter {
    pub fn new(ctx: RouterContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Router for ArchiveRouter {
    fn name(&self) -> &'static str {
        "archive"
    }

    async fn resolve(&self, path: &str, site_id: SiteId) -> ContentResult<RouteOutcome> {
        let Some(segments) = path::segments(path) else {
            return Ok(RouteOutcome::NoMatch);
        };

        let Some(blog) = self.ctx.content.page_by_slug(site_id, segments[0]).await? else {
            return Ok(RouteOutcome::NoMatch);
        };
        if blog.kind != PageKind::Blog {
            return Ok(RouteOutcome::NoMatch);
        }

        let config = &self.ctx.config;
        let current_year = self.ctx.clock.current_year();

        if segments.len() == 2 {
            if let Ok(year) = segments[1].parse::<i32>() {
                if year < config.archive.min_year || year > current_year {
                    tracing::debug!(router = "archive", path, %site_id, year, "Year out of range");
                    return Ok(RouteOutcome::NoMatch);
                }
            }
        }

        let mut query = ArchiveQuery::new(blog.id, config.archive.page_size);
        for token in parse_filters(&segments[1..], current_year) {
            match token {
                FilterToken::Category(slug) => {
                    let found = self.ctx.content.category_by_slug(blog.id, slug).await?;
                    query.category_id = Some(found.map_or(EMPTY_TAXONOMY_ID, |c| c.id));
                }
                FilterToken::Tag(slug) => {
                    let found = self.ctx.content.tag_by_slug(blog.id, slug).await?;
                    query.tag_id = Some(found.map_or(EMPTY_TAXONOMY_ID, |t| t.id));
                }
                FilterToken::Page(page) => query.page = Some(page),
                FilterToken::Year(year) => query.year = Some(year),
                FilterToken::Month(month) => query.month = Some(month),
            }
        }

        let route = config.effective_route(blog.route.as_deref(), &blog.type_id, &config.routes.archive);
        tracing::debug!(
            router = "archive",
            path,
            %site_id,
            route = %route,
            year = ?query.year,
            month = ?query.month,
            page = ?query.page,
            "Archive matched"
        );

        Ok(RouteOutcome::Route(RouteTarget {
            route,
            query: query.to_params(),
            content_id: blog.id,
            is_published: is_published(blog.published, self.ctx.clock.now()),
            cache: Some(CacheDescriptor::derive(blog.id, blog.last_modified)),
        }))
    }
}

//! Post resolution: `/{archive-slug}/{post-slug}[/sub/path]`.

use async_trait::async_trait;

use crate::clock::is_published;
use crate::content::{ContentResult, SiteId};
use crate::routing::outcome::{append_sub_path, HANDLED_PARAM};
use crate::routing::{
    path, CacheDescriptor, QueryParams, RouteOutcome, RouteTarget, Router, RouterContext,
};

/// Resolves posts inside an archive.
///
/// One lookup per request; post slugs are flat within their archive, so
/// there is no prefix search. Posts carry no redirects.
#[derive(Debug, Clone)]
pub struct PostRouter {
    ctx: RouterContext,
}

impl PostRouter {
    pub fn new(ctx: RouterContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Router for PostRouter {
    fn name(&self) -> &'static str {
        "post"
    }

    async fn resolve(&self, path: &str, site_id: SiteId) -> ContentResult<RouteOutcome> {
        let Some(segments) = path::segments(path).filter(|s| s.len() >= 2) else {
            return Ok(RouteOutcome::NoMatch);
        };

        let Some(post) = self
            .ctx
            .content
            .post_by_slug(site_id, segments[0], segments[1])
            .await?
        else {
            return Ok(RouteOutcome::NoMatch);
        };

        let config = &self.ctx.config;
        let base = config.effective_route(post.route.as_deref(), &post.type_id, &config.routes.post);

        let mut query = QueryParams::new();
        query.insert("id", post.id);
        query.insert(HANDLED_PARAM, true);

        let target = RouteTarget {
            route: append_sub_path(&base, &segments[2..]),
            query,
            content_id: post.blog_id,
            is_published: is_published(post.published, self.ctx.clock.now()),
            cache: Some(CacheDescriptor::derive(post.id, post.last_modified)),
        };
        tracing::debug!(router = "post", path, %site_id, route = %target.route, "Post matched");
        Ok(RouteOutcome::Route(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ContentTypeConfig, RouterConfig};
    use crate::content::{InMemoryContent, PageKind, PageSummary, PostSummary};
    use std::sync::Arc;
    use uuid::Uuid;

    struct Fixture {
        site: SiteId,
        post: PostSummary,
        router: PostRouter,
    }

    fn fixture(post_route: Option<&str>, config: RouterConfig) -> Fixture {
        let site = Uuid::new_v4();
        let blog = PageSummary {
            id: Uuid::new_v4(),
            site_id: site,
            parent_id: None,
            sort_order: 0,
            slug: "blog".into(),
            title: "Blog".into(),
            navigation_title: None,
            is_hidden: false,
            type_id: "archive".into(),
            kind: PageKind::Blog,
            route: None,
            redirect: None,
            published: None,
            last_modified: None,
            is_start_page: false,
        };
        let post = PostSummary {
            id: Uuid::new_v4(),
            blog_id: blog.id,
            type_id: "article".into(),
            slug: "my-post".into(),
            route: post_route.map(str::to_string),
            published: Some(chrono::Utc::now() - chrono::Duration::hours(1)),
            last_modified: Some(chrono::Utc::now() - chrono::Duration::minutes(5)),
        };
        let content = InMemoryContent::new().with_page(blog).with_post(post.clone());
        Fixture {
            site,
            post,
            router: PostRouter::new(RouterContext::new(Arc::new(content), Arc::new(config))),
        }
    }

    #[tokio::test]
    async fn test_post_with_sub_path() {
        let f = fixture(None, RouterConfig::default());
        let outcome = f.router.resolve("/blog/my-post/comments", f.site).await.unwrap();
        let target = outcome.as_route().unwrap();
        assert_eq!(target.route, "/post/comments");
        assert_eq!(target.query.get("id"), Some(f.post.id.to_string().as_str()));
        assert_eq!(target.content_id, f.post.blog_id);
        assert!(target.is_published);
        assert_eq!(
            target.cache,
            Some(CacheDescriptor::derive(f.post.id, f.post.last_modified))
        );
    }

    #[tokio::test]
    async fn test_post_route_precedence() {
        let mut config = RouterConfig::default();
        config.content_types.push(ContentTypeConfig {
            id: "article".into(),
            route: Some("/article".into()),
        });
        let f = fixture(None, config.clone());
        let outcome = f.router.resolve("/blog/my-post", f.site).await.unwrap();
        assert_eq!(outcome.as_route().unwrap().route, "/article");

        let f = fixture(Some("/special"), config);
        let outcome = f.router.resolve("/blog/my-post", f.site).await.unwrap();
        assert_eq!(outcome.as_route().unwrap().route, "/special");
    }

    #[tokio::test]
    async fn test_requires_two_segments() {
        let f = fixture(None, RouterConfig::default());
        assert_eq!(f.router.resolve("/blog", f.site).await.unwrap(), RouteOutcome::NoMatch);
        assert_eq!(f.router.resolve("/blog/other", f.site).await.unwrap(), RouteOutcome::NoMatch);
        assert_eq!(f.router.resolve("/news/my-post", f.site).await.unwrap(), RouteOutcome::NoMatch);
    }
}

//! Alias redirects.
//!
//! # Responsibilities
//! - Exact lookup of the request path against stored aliases
//! - Turn a hit into a redirect
//!
//! # Design Decisions
//! - No prefix or fuzzy matching
//! - Aliases are never subject to publish state

use async_trait::async_trait;

use crate::content::{ContentResult, SiteId};
use crate::routing::{path, RouteOutcome, Router, RouterContext};

/// Redirects administrator-defined alias urls.
#[derive(Debug, Clone)]
pub struct AliasRouter {
    ctx: RouterContext,
}

impl AliasRouter {
    pub fn new(ctx: RouterContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Router for AliasRouter {
    fn name(&self) -> &'static str {
        "alias"
    }

    async fn resolve(&self, path: &str, site_id: SiteId) -> ContentResult<RouteOutcome> {
        if path::is_short(path) {
            return Ok(RouteOutcome::NoMatch);
        }

        match self.ctx.content.alias_by_url(site_id, path).await? {
            Some(alias) => {
                tracing::debug!(
                    router = "alias",
                    path,
                    %site_id,
                    target = %alias.redirect_url,
                    permanent = alias.permanent,
                    "Alias matched"
                );
                Ok(RouteOutcome::redirect(alias.redirect_url, alias.permanent))
            }
            None => Ok(RouteOutcome::NoMatch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RouterConfig;
    use crate::content::{Alias, InMemoryContent};
    use std::sync::Arc;
    use uuid::Uuid;

    fn router(site: SiteId) -> AliasRouter {
        let content = InMemoryContent::new().with_alias(Alias {
            id: Uuid::new_v4(),
            site_id: site,
            alias_url: "/old".into(),
            redirect_url: "/new".into(),
            permanent: true,
        });
        AliasRouter::new(RouterContext::new(
            Arc::new(content),
            Arc::new(RouterConfig::default()),
        ))
    }

    #[tokio::test]
    async fn test_alias_hit_redirects() {
        let site = Uuid::new_v4();
        let outcome = router(site).resolve("/old", site).await.unwrap();
        assert_eq!(outcome, RouteOutcome::redirect("/new", true));
    }

    #[tokio::test]
    async fn test_alias_miss_and_short_paths() {
        let site = Uuid::new_v4();
        let router = router(site);
        assert_eq!(router.resolve("/nope", site).await.unwrap(), RouteOutcome::NoMatch);
        assert_eq!(router.resolve("/", site).await.unwrap(), RouteOutcome::NoMatch);
        assert_eq!(router.resolve("", site).await.unwrap(), RouteOutcome::NoMatch);
    }

    #[tokio::test]
    async fn test_single_multibyte_char_is_not_looked_up() {
        let site = Uuid::new_v4();
        let content = InMemoryContent::new().with_alias(Alias {
            id: Uuid::new_v4(),
            site_id: site,
            alias_url: "é".into(),
            redirect_url: "/new".into(),
            permanent: false,
        });
        let router = AliasRouter::new(RouterContext::new(
            Arc::new(content),
            Arc::new(RouterConfig::default()),
        ));
        assert_eq!(router.resolve("é", site).await.unwrap(), RouteOutcome::NoMatch);
    }

    #[tokio::test]
    async fn test_alias_is_site_scoped() {
        let site = Uuid::new_v4();
        let outcome = router(site).resolve("/old", Uuid::new_v4()).await.unwrap();
        assert_eq!(outcome, RouteOutcome::NoMatch);
    }
}

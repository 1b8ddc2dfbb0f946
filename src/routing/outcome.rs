//! Router results.

use serde::Serialize;

use crate::content::ContentId;
use crate::routing::cache::CacheDescriptor;

/// Query parameter marking a request as already routed.
pub const HANDLED_PARAM: &str = "piranha_handled";

/// Insertion-ordered query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing an earlier value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Set `key` to the value or to an empty string when unset.
    pub fn insert_opt<T: ToString>(&mut self, key: impl Into<String>, value: Option<T>) {
        self.insert(key, value.map(|v| v.to_string()).unwrap_or_default());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as `k=v&k=v`, form-encoded.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

/// A resolved content route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteTarget {
    /// Template path the renderer should serve.
    pub route: String,
    pub query: QueryParams,
    /// The page that owns the request: the page itself, the archive, or the
    /// post's archive.
    pub content_id: ContentId,
    /// Returned even when false; visibility is the caller's decision.
    pub is_published: bool,
    pub cache: Option<CacheDescriptor>,
}

impl RouteTarget {
    /// Rewritten request target: the route with the router's params, followed
    /// by any query string from the original request.
    pub fn rewrite_url(&self, original_query: Option<&str>) -> String {
        let mut url = self.route.clone();
        let params = self.query.to_query_string();
        let original = original_query
            .map(|q| q.trim_start_matches('?'))
            .filter(|q| !q.is_empty());

        match (params.is_empty(), original) {
            (true, None) => {}
            (true, Some(orig)) => {
                url.push('?');
                url.push_str(orig);
            }
            (false, None) => {
                url.push('?');
                url.push_str(&params);
            }
            (false, Some(orig)) => {
                url.push('?');
                url.push_str(&params);
                url.push('&');
                url.push_str(orig);
            }
        }
        url
    }
}

/// Redirect instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectOutcome {
    pub target_url: String,
    pub permanent: bool,
}

/// Result of one router, or of the whole dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RouteOutcome {
    Route(RouteTarget),
    Redirect(RedirectOutcome),
    /// The router does not claim this path. Not an error.
    NoMatch,
}

impl RouteOutcome {
    pub fn redirect(target_url: impl Into<String>, permanent: bool) -> Self {
        RouteOutcome::Redirect(RedirectOutcome {
            target_url: target_url.into(),
            permanent,
        })
    }

    pub fn is_match(&self) -> bool {
        !matches!(self, RouteOutcome::NoMatch)
    }

    pub fn as_route(&self) -> Option<&RouteTarget> {
        match self {
            RouteOutcome::Route(target) => Some(target),
            _ => None,
        }
    }

    pub fn as_redirect(&self) -> Option<&RedirectOutcome> {
        match self {
            RouteOutcome::Redirect(redirect) => Some(redirect),
            _ => None,
        }
    }

    /// Short label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            RouteOutcome::Route(_) => "route",
            RouteOutcome::Redirect(_) => "redirect",
            RouteOutcome::NoMatch => "no_match",
        }
    }
}

/// Append the segments left over after a match to a route template.
pub(crate) fn append_sub_path(route: &str, rest: &[&str]) -> String {
    let mut out = route.to_string();
    for segment in rest {
        out.push('/');
        out.push_str(segment);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut params = QueryParams::new();
        params.insert("id", "a");
        params.insert("page", 2);
        params.insert("id", "b");
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("id"), Some("b"));
        assert_eq!(params.to_query_string(), "id=b&page=2");
    }

    #[test]
    fn test_insert_opt_renders_empty() {
        let mut params = QueryParams::new();
        params.insert_opt::<i32>("year", None);
        params.insert_opt("month", Some(4));
        assert_eq!(params.to_query_string(), "year=&month=4");
    }

    #[test]
    fn test_rewrite_url_appends_original_query() {
        let mut query = QueryParams::new();
        query.insert("id", "x");
        let target = RouteTarget {
            route: "/page".into(),
            query,
            content_id: Uuid::nil(),
            is_published: true,
            cache: None,
        };
        assert_eq!(target.rewrite_url(None), "/page?id=x");
        assert_eq!(target.rewrite_url(Some("?q=1")), "/page?id=x&q=1");
        assert_eq!(target.rewrite_url(Some("")), "/page?id=x");
    }

    #[test]
    fn test_append_sub_path() {
        assert_eq!(append_sub_path("/custom", &["team"]), "/custom/team");
        assert_eq!(append_sub_path("/post", &[]), "/post");
        assert_eq!(append_sub_path("/post", &["a", "b"]), "/post/a/b");
    }
}

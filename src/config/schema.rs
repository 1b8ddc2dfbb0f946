//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the routers.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration passed to every router at construction.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Generic fallback route templates.
    pub routes: RouteDefaults,

    /// Default routes per content type.
    pub content_types: Vec<ContentTypeConfig>,

    /// Archive filter settings.
    pub archive: ArchiveConfig,

    /// Which routers take part in dispatch.
    pub routing: RoutingConfig,

    /// Facade call settings.
    pub facade: FacadeConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl RouterConfig {
    /// Default route configured for a content type, if any.
    pub fn type_route(&self, type_id: &str) -> Option<&str> {
        self.content_types
            .iter()
            .find(|t| t.id == type_id)
            .and_then(|t| t.route.as_deref())
            .filter(|r| !r.is_empty())
    }

    /// Effective route: the item's own override, then its type's default,
    /// then `fallback`.
    pub fn effective_route(&self, own: Option<&str>, type_id: &str, fallback: &str) -> String {
        own.filter(|r| !r.is_empty())
            .or_else(|| self.type_route(type_id))
            .unwrap_or(fallback)
            .to_string()
    }
}

/// Fallback route templates used when neither the content nor its type
/// declares a route.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouteDefaults {
    pub page: String,
    pub post: String,
    pub archive: String,
}

impl Default for RouteDefaults {
    fn default() -> Self {
        Self {
            page: "/page".to_string(),
            post: "/post".to_string(),
            archive: "/archive".to_string(),
        }
    }
}

/// Default route for one content type.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentTypeConfig {
    /// Content type identifier, as carried by page and post summaries.
    pub id: String,

    /// Route template for content of this type.
    #[serde(default)]
    pub route: Option<String>,
}

/// Archive filter configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Lowest year accepted by the two-segment year guard.
    pub min_year: i32,

    /// Posts per archive page, passed through to the listing.
    pub page_size: u32,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            min_year: 1900,
            page_size: 10,
        }
    }
}

/// The routers a dispatcher can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouterKind {
    Alias,
    StartPage,
    Archive,
    Page,
    Post,
}

impl RouterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouterKind::Alias => "alias",
            RouterKind::StartPage => "start_page",
            RouterKind::Archive => "archive",
            RouterKind::Page => "page",
            RouterKind::Post => "post",
        }
    }
}

/// Router enable flags and precedence.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub alias: bool,
    pub start_page: bool,
    pub archive: bool,
    pub page: bool,
    pub post: bool,

    /// Order in which routers are tried. Routers missing from the list
    /// never run.
    pub order: Vec<RouterKind>,
}

impl RoutingConfig {
    /// Whether `kind` is switched on.
    pub fn enabled(&self, kind: RouterKind) -> bool {
        match kind {
            RouterKind::Alias => self.alias,
            RouterKind::StartPage => self.start_page,
            RouterKind::Archive => self.archive,
            RouterKind::Page => self.page,
            RouterKind::Post => self.post,
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            alias: true,
            start_page: true,
            archive: true,
            page: true,
            post: true,
            order: vec![
                RouterKind::Alias,
                RouterKind::StartPage,
                RouterKind::Archive,
                RouterKind::Page,
                RouterKind::Post,
            ],
        }
    }
}

/// Facade configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FacadeConfig {
    /// Per-lookup deadline in milliseconds. Unset means no deadline.
    pub timeout_ms: Option<u64>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

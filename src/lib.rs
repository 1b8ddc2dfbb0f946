//! Content routing core for a page/blog CMS.
//!
//! # Architecture Overview
//!
//! ```text
//!     request path + site id
//!              │
//!              ▼
//!     ┌─────────────────────────────────────────────────────────┐
//!     │ routing::Dispatcher                                     │
//!     │   alias → start page → archive → page → post            │
//!     └──────────────┬──────────────────────────────────────────┘
//!                    │ lookups by slug / id / url
//!                    ▼
//!     ┌─────────────────────────┐      ┌──────────────────────┐
//!     │ content::ContentApi     │─────▶│ sitemap::Sitemap     │
//!     │ (read-only facade)      │      │ (published forest)   │
//!     └─────────────────────────┘      └──────────────────────┘
//!                    │
//!                    ▼
//!     RouteOutcome: Route { route, query, cache } | Redirect | NoMatch
//! ```
//!
//! The core owns no storage and no HTTP surface. Callers supply a
//! `ContentApi`, a `RouterConfig` and a `Clock`, then map the outcome onto
//! their own server.

pub mod clock;
pub mod config;
pub mod content;
pub mod observability;
pub mod routing;
pub mod sitemap;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::RouterConfig;
pub use content::{ContentApi, ContentError, ContentResult};
pub use routing::{Dispatcher, RouteOutcome, Router, RouterContext};
pub use sitemap::{Sitemap, SitemapNode};

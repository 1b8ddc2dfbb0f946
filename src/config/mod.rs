//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → shared via Arc to every router
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; routers never read ambient state
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::ArchiveConfig;
pub use schema::ContentTypeConfig;
pub use schema::FacadeConfig;
pub use schema::ObservabilityConfig;
pub use schema::RouteDefaults;
pub use schema::RouterConfig;
pub use schema::RouterKind;
pub use schema::RoutingConfig;
pub use validation::{validate_config, ValidationError};

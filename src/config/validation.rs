//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route templates are absolute paths
//! - Validate value ranges (page size > 0, year bounds)
//! - Detect duplicate content type ids
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::RouterConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("route '{field}' must start with '/', got '{value}'")]
    RelativeRoute { field: String, value: String },

    #[error("content type id must not be empty")]
    EmptyContentTypeId,

    #[error("content type '{0}' is declared more than once")]
    DuplicateContentType(String),

    #[error("archive.page_size must be greater than 0")]
    ZeroPageSize,

    #[error("archive.min_year must be positive, got {0}")]
    InvalidMinYear(i32),

    #[error("facade.timeout_ms must be greater than 0")]
    ZeroTimeout,

    #[error("router '{0}' appears more than once in routing.order")]
    DuplicateRouter(&'static str),
}

fn check_route(field: &str, value: &str, errors: &mut Vec<ValidationError>) {
    if !value.starts_with('/') {
        errors.push(ValidationError::RelativeRoute {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_route("routes.page", &config.routes.page, &mut errors);
    check_route("routes.post", &config.routes.post, &mut errors);
    check_route("routes.archive", &config.routes.archive, &mut errors);

    let mut seen = HashSet::new();
    for content_type in &config.content_types {
        if content_type.id.is_empty() {
            errors.push(ValidationError::EmptyContentTypeId);
            continue;
        }
        if !seen.insert(content_type.id.as_str()) {
            errors.push(ValidationError::DuplicateContentType(content_type.id.clone()));
        }
        if let Some(route) = content_type.route.as_deref().filter(|r| !r.is_empty()) {
            check_route(&format!("content_types.{}.route", content_type.id), route, &mut errors);
        }
    }

    if config.archive.page_size == 0 {
        errors.push(ValidationError::ZeroPageSize);
    }
    if config.archive.min_year <= 0 {
        errors.push(ValidationError::InvalidMinYear(config.archive.min_year));
    }
    let mut ordered = HashSet::new();
    for kind in &config.routing.order {
        if !ordered.insert(*kind) {
            errors.push(ValidationError::DuplicateRouter(kind.as_str()));
        }
    }

    if config.facade.timeout_ms == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

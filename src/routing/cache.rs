//! HTTP cache validators for resolved content.
//!
//! # Responsibilities
//! - Derive an entity tag from a content id and its last-modified instant
//! - Answer conditional-request checks for the caller
//!
//! # Design Decisions
//! - Descriptors are only built through `derive`, so the tag always
//!   matches the timestamp it was computed from
//! - Timestamps compare at second precision, like HTTP dates

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::content::ContentId;

/// Entity tag and last-modified instant for a resolved route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheDescriptor {
    entity_tag: String,
    last_modified: Option<DateTime<Utc>>,
}

impl CacheDescriptor {
    /// Derive the validators for `id` as of `last_modified`.
    pub fn derive(id: ContentId, last_modified: Option<DateTime<Utc>>) -> Self {
        Self {
            entity_tag: entity_tag(id, last_modified),
            last_modified,
        }
    }

    /// Quoted entity tag.
    pub fn entity_tag(&self) -> &str {
        &self.entity_tag
    }

    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    /// True when the client's cached copy is still current.
    ///
    /// `If-None-Match` takes precedence over `If-Modified-Since`.
    pub fn is_fresh(
        &self,
        if_none_match: Option<&str>,
        if_modified_since: Option<DateTime<Utc>>,
    ) -> bool {
        if let Some(tags) = if_none_match {
            return tags
                .split(',')
                .map(str::trim)
                .any(|tag| tag == "*" || tag.trim_start_matches("W/") == self.entity_tag);
        }
        match (self.last_modified, if_modified_since) {
            (Some(modified), Some(since)) => modified.timestamp() <= since.timestamp(),
            _ => false,
        }
    }
}

fn entity_tag(id: ContentId, last_modified: Option<DateTime<Utc>>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(id.to_string().as_bytes());
    if let Some(modified) = last_modified {
        hasher.update(modified.format("%Y-%m-%d %H:%M:%S").to_string().as_bytes());
    }
    format!("\"{}\"", hex::encode(hasher.finalize()))
}

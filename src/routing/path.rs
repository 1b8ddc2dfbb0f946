//! Request path segmentation shared by the routers.

/// Split a request path into segments.
///
/// Empty and single-character paths (`""`, `"/"`) have no segments. One
/// leading and one trailing `/` are dropped before splitting.
pub fn segments(path: &str) -> Option<Vec<&str>> {
    if is_short(path) {
        return None;
    }
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.split('/').collect())
}

/// True when `path` has at most one character.
pub fn is_short(path: &str) -> bool {
    path.chars().nth(1).is_none()
}

/// True for the site root.
pub fn is_root(path: &str) -> bool {
    path.is_empty() || path == "/"
}

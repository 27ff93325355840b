//! Route matching logic.
//!
//! # Responsibilities
//! - Match path prefix on segment boundaries (case-sensitive)
//!
//! # Design Decisions
//! - `/api` matches `/api`, `/api/` and `/api/...`, never `/apix`
//! - The root prefix matches every path
//! - No regex to guarantee O(n) matching

use axum::body::Body;
use axum::http::Request;

use crate::routing::rewrite::normalize_prefix;

/// Matches the request path against a route prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    /// The prefix is normalized to `/segment` form without a trailing slash.
    pub fn new(prefix: impl AsRef<str>) -> Self {
        Self {
            prefix: normalize_prefix(prefix.as_ref()),
        }
    }

    /// The normalized prefix (empty for the root route).
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns true if `path` falls under this prefix.
    pub fn matches_path(&self, path: &str) -> bool {
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// Returns true if the request path falls under this prefix.
    pub fn matches(&self, req: &Request<Body>) -> bool {
        self.matches_path(req.uri().path())
    }
}

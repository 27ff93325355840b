//! Upstream URL rewriting.
//!
//! # Responsibilities
//! - Strip the route prefix from the inbound path (one anchored occurrence)
//! - Join the remainder onto the upstream base origin
//! - Carry the query string over untouched
//!
//! # Design Decisions
//! - Base origin normalized once at construction, never per request
//! - No error conditions: any path produces a URL

use axum::http::Uri;

/// Normalize a route prefix to `/segment` form without a trailing slash.
///
/// The root prefix `/` normalizes to the empty string.
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// Remove one leading occurrence of `prefix` (and a following `/`) from `path`.
pub fn strip_prefix<'a>(path: &'a str, prefix: &str) -> &'a str {
    let prefix = prefix.trim_end_matches('/');
    match path.strip_prefix(prefix) {
        Some(rest) => rest.strip_prefix('/').unwrap_or(rest),
        None => path,
    }
}

/// Rewrites inbound URIs onto a fixed upstream origin.
#[derive(Debug, Clone)]
pub struct UrlRewriter {
    base: String,
}

impl UrlRewriter {
    /// Create a rewriter for the given upstream base origin.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// The normalized base origin (no trailing slash).
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Build the upstream URL for `uri` routed under `prefix`.
    pub fn rewrite(&self, prefix: &str, uri: &Uri) -> String {
        let rest = strip_prefix(uri.path(), prefix);
        let mut target = format!("{}/{}", self.base, rest);

        if let Some(query) = uri.query().filter(|q| !q.is_empty()) {
            target.push('?');
            target.push_str(query);
        }

        target
    }
}

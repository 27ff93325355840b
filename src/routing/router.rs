//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Register routes explicitly (`prefix → handler`)
//! - Look up matching route for request
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Longest prefix wins; equal lengths keep registration order
//! - O(n) prefix scan (acceptable for typical route counts)

use std::cmp::Reverse;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;

use crate::config::ProxyConfig;
use crate::http::handler::ProxyHandler;
use crate::http::upstream::Upstream;
use crate::routing::matcher::PathPrefixMatcher;

/// A registered route.
#[derive(Clone)]
pub struct Route {
    name: String,
    matcher: PathPrefixMatcher,
    handler: Arc<ProxyHandler>,
}

impl Route {
    /// Route identifier for logging.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized prefix stripped before forwarding.
    pub fn prefix(&self) -> &str {
        self.matcher.prefix()
    }

    /// Handler serving this route.
    pub fn handler(&self) -> &ProxyHandler {
        &self.handler
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("prefix", &self.matcher.prefix())
            .field("upstream", &self.handler.upstream_base())
            .finish()
    }
}

/// Prefix route table.
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Create an empty route table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `prefix`.
    pub fn route(mut self, name: impl Into<String>, prefix: &str, handler: ProxyHandler) -> Self {
        self.routes.push(Route {
            name: name.into(),
            matcher: PathPrefixMatcher::new(prefix),
            handler: Arc::new(handler),
        });
        self.routes.sort_by_key(|route| Reverse(route.matcher.prefix().len()));
        self
    }

    /// Build the route table from configuration, sharing one upstream client.
    pub fn from_config(config: &ProxyConfig, upstream: Arc<dyn Upstream>) -> Self {
        config.routes.iter().fold(Self::new(), |router, route| {
            let handler = ProxyHandler::new(&route.upstream, upstream.clone())
                .with_body_limit(config.limits.max_body_bytes);
            router.route(route.name.clone(), &route.prefix, handler)
        })
    }

    /// Find the route serving this request.
    pub fn match_request(&self, req: &Request<Body>) -> Option<&Route> {
        self.match_path(req.uri().path())
    }

    /// Find the route serving `path`.
    pub fn match_path(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.matcher.matches_path(path))
    }

    /// Registered routes, longest prefix first.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

//! The proxy handler.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → OPTIONS? answer 204 locally
//!     → rewrite.rs (upstream URL)
//!     → request.rs (outbound method/headers/body)
//!     → upstream.rs (single attempt)
//!     → response.rs (header overrides)
//!     → response to caller
//! ```

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};

use crate::config::LimitsConfig;
use crate::error::ProxyError;
use crate::http::request::prepare_request;
use crate::http::response::normalize_response;
use crate::http::upstream::Upstream;
use crate::routing::rewrite::UrlRewriter;

/// Forwards requests for one upstream origin.
pub struct ProxyHandler {
    rewriter: UrlRewriter,
    upstream: Arc<dyn Upstream>,
    max_body_bytes: usize,
}

impl ProxyHandler {
    /// Create a handler forwarding to `upstream_base` through `upstream`.
    pub fn new(upstream_base: &str, upstream: Arc<dyn Upstream>) -> Self {
        Self {
            rewriter: UrlRewriter::new(upstream_base),
            upstream,
            max_body_bytes: LimitsConfig::default().max_body_bytes,
        }
    }

    /// Set the maximum inbound body size buffered for forwarding.
    pub fn with_body_limit(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// The upstream origin this handler forwards to.
    pub fn upstream_base(&self) -> &str {
        self.rewriter.base()
    }

    /// Handle one request routed under `prefix`.
    ///
    /// Failures are returned as-is; nothing is retried and no fallback
    /// response is fabricated.
    pub async fn handle(
        &self,
        prefix: &str,
        request: Request<Body>,
    ) -> Result<Response<Body>, ProxyError> {
        if request.method() == Method::OPTIONS {
            tracing::debug!(path = %request.uri().path(), "Answering preflight locally");
            return Ok(preflight_response());
        }

        let url = self.rewriter.rewrite(prefix, request.uri());
        tracing::debug!(
            method = %request.method(),
            path = %request.uri().path(),
            upstream_url = %url,
            "Forwarding request"
        );

        let outbound = prepare_request(request, url, self.max_body_bytes).await?;
        let response = self.upstream.send(outbound).await?;

        tracing::debug!(status = %response.status(), "Upstream responded");
        Ok(normalize_response(response))
    }
}

/// Empty 204 answer for CORS preflight requests.
pub fn preflight_response() -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;
    response
}

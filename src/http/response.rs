//! Response normalization.
//!
//! # Responsibilities
//! - Copy upstream headers for the client
//! - Default content-type to JSON when the upstream sent none
//! - Force every cache layer to treat the response as uncacheable
//!
//! # Design Decisions
//! - Streaming responses avoid buffering entire body
//! - Hop-by-hop headers stripped; the server frames the body itself
//! - Status passes through unchanged

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Response};

use crate::http::request::has_content_type;
use crate::security::headers::is_hop_by_hop;

/// Content type assumed for responses that do not declare one.
pub const DEFAULT_RESPONSE_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Headers overwritten on every response, whatever the upstream sent.
pub const NO_CACHE_HEADERS: [(&str, &str); 4] = [
    ("cache-control", "no-store, no-cache, must-revalidate, max-age=0"),
    ("pragma", "no-cache"),
    ("expires", "0"),
    ("cdn-cache-control", "no-store"),
];

/// Apply the client-facing header policy to an upstream response.
pub fn normalize_response(response: Response<Body>) -> Response<Body> {
    let (mut parts, body) = response.into_parts();
    parts.headers = client_headers(&parts.headers);
    Response::from_parts(parts, body)
}

fn client_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut headers: HeaderMap = upstream
        .iter()
        .filter(|(name, _)| !is_hop_by_hop(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    if !has_content_type(&headers) {
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(DEFAULT_RESPONSE_CONTENT_TYPE),
        );
    }

    for (name, value) in NO_CACHE_HEADERS {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }

    headers
}

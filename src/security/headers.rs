//! Header filtering between the client and upstream legs.
//!
//! # Responsibilities
//! - Identify hop-by-hop headers (RFC 9110 §7.6.1)
//! - Identify headers the outbound HTTP client computes itself
//!
//! # Design Decisions
//! - Names compared case-insensitively (`HeaderName` is already lowercase)
//! - End-to-end headers pass through untouched

use axum::http::HeaderName;

/// Headers scoped to a single connection.
pub const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-connection",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Headers the outbound client derives from the target URL and body.
pub const CLIENT_MANAGED: &[&str] = &["host", "content-length"];

/// Returns true for connection-scoped headers.
pub fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}

/// Returns true for headers that must not be copied onto an outbound request.
pub fn is_client_managed(name: &HeaderName) -> bool {
    is_hop_by_hop(name) || CLIENT_MANAGED.contains(&name.as_str())
}

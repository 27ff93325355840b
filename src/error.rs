//! Proxy error type.
//!
//! The handler never recovers from these locally. It returns them to the
//! server, which logs the failure and answers the caller with an opaque
//! status-only response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Boxed error produced by an upstream client.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure while forwarding a single request.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// The inbound body could not be read in full (client disconnect, size limit).
    #[error("failed to read request body: {0}")]
    BodyRead(#[source] axum::Error),

    /// The outbound request could not be constructed.
    #[error("invalid upstream request: {0}")]
    InvalidRequest(#[from] axum::http::Error),

    /// Network, TLS or protocol failure talking to the upstream.
    #[error("upstream request failed: {0}")]
    Upstream(#[source] BoxError),
}

impl ProxyError {
    /// Status code reported to the caller for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::BodyRead(_) => StatusCode::BAD_REQUEST,
            ProxyError::InvalidRequest(_) | ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = status.canonical_reason().unwrap_or("Proxy error");
        (status, message).into_response()
    }
}

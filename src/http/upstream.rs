//! Upstream invocation.
//!
//! # Responsibilities
//! - Send one prepared request to the upstream origin
//! - Hand the response back with its body still streaming
//!
//! # Design Decisions
//! - `Upstream` trait is the seam for injecting a mock origin in tests
//! - Single attempt: no retry, no timeout at this layer
//! - HTTPS via rustls with bundled webpki roots; plain HTTP also accepted

use std::sync::Once;

use axum::body::Body;
use axum::http::Response;
use futures_util::future::BoxFuture;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::error::ProxyError;
use crate::http::request::OutboundRequest;

/// Sends prepared requests to an upstream origin.
pub trait Upstream: Send + Sync {
    /// Perform `request` and return the upstream response.
    fn send(
        &self,
        request: OutboundRequest,
    ) -> BoxFuture<'static, Result<Response<Body>, ProxyError>>;
}

/// Upstream client backed by the hyper legacy client.
#[derive(Clone)]
pub struct HttpUpstream {
    client: Client<HttpsConnector<HttpConnector>, Body>,
}

impl HttpUpstream {
    /// Create a client that speaks HTTP/1.1 and HTTP/2 over TLS or plain TCP.
    pub fn new() -> Self {
        install_crypto_provider();

        let mut http_connector = HttpConnector::new();
        http_connector.enforce_http(false);

        let https_connector = HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .enable_http2()
            .wrap_connector(http_connector);

        let client = Client::builder(TokioExecutor::new()).build(https_connector);

        Self { client }
    }
}

impl Default for HttpUpstream {
    fn default() -> Self {
        Self::new()
    }
}

impl Upstream for HttpUpstream {
    fn send(
        &self,
        request: OutboundRequest,
    ) -> BoxFuture<'static, Result<Response<Body>, ProxyError>> {
        let client = self.client.clone();
        Box::pin(async move {
            let request = request.into_request()?;
            let response = client
                .request(request)
                .await
                .map_err(|e| ProxyError::Upstream(Box::new(e)))?;

            let (parts, body) = response.into_parts();
            Ok(Response::from_parts(parts, Body::new(body)))
        })
    }
}

// Another provider may already be installed process-wide; either way one exists.
fn install_crypto_provider() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

//! Request preparation for forwarding.
//!
//! # Responsibilities
//! - Decide between the read path (GET/HEAD) and the write path (others)
//! - Buffer the inbound body on the write path
//! - Build the outbound header set for each path
//!
//! # Design Decisions
//! - Read path sends exactly `cache-control: no-store`; inbound headers dropped
//! - Write path copies end-to-end headers and defaults content-type to JSON
//! - Each path builds its own header map; nothing shared is mutated
//! - Inbound body fully buffered (bounded), upstream body streamed

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, HeaderValue, Method, Request};

use crate::error::ProxyError;
use crate::security::headers::is_client_managed;

/// Content type assumed for bodied requests that do not declare one.
pub const DEFAULT_REQUEST_CONTENT_TYPE: &str = "application/json";

/// A request ready to be sent upstream.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl OutboundRequest {
    /// Convert into an `http` request for a client.
    pub fn into_request(self) -> Result<Request<Body>, ProxyError> {
        let mut request = Request::builder()
            .method(self.method)
            .uri(self.url)
            .body(self.body.map(Body::from).unwrap_or_else(Body::empty))?;
        *request.headers_mut() = self.headers;
        Ok(request)
    }
}

/// Returns true for methods forwarded without a body.
pub fn is_read_method(method: &Method) -> bool {
    *method == Method::GET || *method == Method::HEAD
}

/// Prepare the outbound request for `request`, targeting `url`.
pub async fn prepare_request(
    request: Request<Body>,
    url: String,
    max_body_bytes: usize,
) -> Result<OutboundRequest, ProxyError> {
    let (parts, body) = request.into_parts();

    if is_read_method(&parts.method) {
        return Ok(OutboundRequest {
            method: parts.method,
            url,
            headers: no_store_headers(),
            body: None,
        });
    }

    let body = axum::body::to_bytes(body, max_body_bytes)
        .await
        .map_err(ProxyError::BodyRead)?;

    Ok(OutboundRequest {
        method: parts.method,
        url,
        headers: forwarded_headers(&parts.headers),
        body: Some(body),
    })
}

fn no_store_headers() -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(1);
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    headers
}

fn forwarded_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers: HeaderMap = inbound
        .iter()
        .filter(|(name, _)| !is_client_managed(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    if !has_content_type(&headers) {
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(DEFAULT_REQUEST_CONTENT_TYPE),
        );
    }

    headers
}

/// A content-type header with an empty value counts as missing.
pub(crate) fn has_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .is_some_and(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://leaderboard.example.com/leaderboard";

    fn inbound(method: Method) -> axum::http::request::Builder {
        Request::builder()
            .method(method)
            .uri("/api/leaderboard")
            .header(header::AUTHORIZATION, "Bearer token")
            .header(header::COOKIE, "session=abc")
            .header(header::ACCEPT, "application/json")
    }

    #[tokio::test]
    async fn test_get_sends_only_no_store() {
        let request = inbound(Method::GET)
            .header(header::CACHE_CONTROL, "max-age=60")
            .body(Body::empty())
            .unwrap();

        let outbound = prepare_request(request, URL.into(), 1024).await.unwrap();

        assert_eq!(outbound.method, Method::GET);
        assert_eq!(outbound.url, URL);
        assert!(outbound.body.is_none());
        assert_eq!(outbound.headers.len(), 1);
        assert_eq!(outbound.headers[header::CACHE_CONTROL], "no-store");
    }

    #[tokio::test]
    async fn test_head_ignores_body() {
        let request = inbound(Method::HEAD)
            .body(Body::from("ignored"))
            .unwrap();

        let outbound = prepare_request(request, URL.into(), 1024).await.unwrap();
        assert!(outbound.body.is_none());
        assert_eq!(outbound.headers.len(), 1);
    }

    #[tokio::test]
    async fn test_post_defaults_content_type() {
        let payload = r#"{"name":"dodger","score":4200}"#;
        let request = inbound(Method::POST)
            .body(Body::from(payload))
            .unwrap();

        let outbound = prepare_request(request, URL.into(), 1024).await.unwrap();

        assert_eq!(outbound.body.as_deref(), Some(payload.as_bytes()));
        assert_eq!(outbound.headers[header::CONTENT_TYPE], "application/json");
        assert_eq!(outbound.headers[header::AUTHORIZATION], "Bearer token");
        assert_eq!(outbound.headers[header::COOKIE], "session=abc");
        assert_eq!(outbound.headers[header::ACCEPT], "application/json");
    }

    #[tokio::test]
    async fn test_post_keeps_content_type() {
        let request = Request::builder()
            .method(Method::PUT)
            .uri("/api/notes")
            .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(Body::from("hello"))
            .unwrap();

        let outbound = prepare_request(request, URL.into(), 1024).await.unwrap();
        assert_eq!(
            outbound.headers[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_empty_content_type_is_replaced() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/x")
            .header(header::CONTENT_TYPE, "")
            .body(Body::from("{}"))
            .unwrap();

        let outbound = prepare_request(request, URL.into(), 1024).await.unwrap();
        assert_eq!(outbound.headers[header::CONTENT_TYPE], "application/json");
    }

    #[tokio::test]
    async fn test_connection_headers_not_copied() {
        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/api/x")
            .header(header::HOST, "proxy.example.com")
            .header(header::CONTENT_LENGTH, "2")
            .header(header::CONNECTION, "keep-alive")
            .header("x-player", "one")
            .header("x-player", "two")
            .body(Body::from("{}"))
            .unwrap();

        let outbound = prepare_request(request, URL.into(), 1024).await.unwrap();
        assert!(!outbound.headers.contains_key(header::HOST));
        assert!(!outbound.headers.contains_key(header::CONTENT_LENGTH));
        assert!(!outbound.headers.contains_key(header::CONNECTION));
        let players: Vec<_> = outbound.headers.get_all("x-player").iter().collect();
        assert_eq!(players, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_body_over_limit_fails() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/x")
            .body(Body::from(vec![b'a'; 64]))
            .unwrap();

        let err = prepare_request(request, URL.into(), 16).await.unwrap_err();
        assert!(matches!(err, ProxyError::BodyRead(_)));
    }

    #[test]
    fn test_into_request() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
        let request = OutboundRequest {
            method: Method::GET,
            url: URL.into(),
            headers,
            body: None,
        }
        .into_request()
        .unwrap();

        assert_eq!(request.uri(), URL);
        assert_eq!(request.headers().len(), 1);
    }

    #[test]
    fn test_into_request_rejects_bad_url() {
        let err = OutboundRequest {
            method: Method::GET,
            url: "http://bad host/".into(),
            headers: HeaderMap::new(),
            body: None,
        }
        .into_request()
        .unwrap_err();
        assert!(matches!(err, ProxyError::InvalidRequest(_)));
    }
}

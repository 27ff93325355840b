//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, Method, Response, StatusCode, Uri},
    response::IntoResponse,
    routing::any,
    Json, Router,
};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

use api_proxy::config::{ProxyConfig, RouteConfig};
use api_proxy::{HttpServer, Shutdown};

/// A running mock upstream.
#[allow(dead_code)]
pub struct MockBackend {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of requests the backend has served.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Start a backend that echoes each request back as JSON.
///
/// Fixed paths exercise response header handling:
/// - `/cached` sends aggressive caching headers
/// - `/raw` sends no content-type
/// - `/teapot` answers 418
pub async fn start_echo_backend() -> MockBackend {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));

    let app = Router::new()
        .route("/cached", any(cached))
        .route("/raw", any(raw))
        .route("/teapot", any(teapot))
        .route("/", any(echo))
        .route("/{*path}", any(echo))
        .with_state(hits.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockBackend { addr, hits }
}

async fn echo(
    State(hits): State<Arc<AtomicUsize>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Value> {
    hits.fetch_add(1, Ordering::SeqCst);

    let headers: Map<String, Value> = headers
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                Value::String(value.to_str().unwrap_or_default().to_string()),
            )
        })
        .collect();

    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query(),
        "headers": headers,
        "body": String::from_utf8_lossy(&body),
    }))
}

async fn cached(State(hits): State<Arc<AtomicUsize>>) -> impl IntoResponse {
    hits.fetch_add(1, Ordering::SeqCst);
    (
        [
            (header::CONTENT_TYPE, "text/plain"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
            (header::PRAGMA, "cache"),
            (header::EXPIRES, "Wed, 21 Oct 2099 07:28:00 GMT"),
        ],
        [("cdn-cache-control", "max-age=86400")],
        "cached",
    )
}

async fn raw(State(hits): State<Arc<AtomicUsize>>) -> Response<Body> {
    hits.fetch_add(1, Ordering::SeqCst);
    Response::new(Body::from("[1,2,3]"))
}

async fn teapot(State(hits): State<Arc<AtomicUsize>>) -> impl IntoResponse {
    hits.fetch_add(1, Ordering::SeqCst);
    (
        StatusCode::IM_A_TEAPOT,
        [("x-upstream", "teapot")],
        "short and stout",
    )
}

/// Start the proxy with a single `/api` route to `upstream`.
pub async fn start_proxy(upstream: &str) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = ProxyConfig::default();
    config.listener.bind_address = addr.to_string();
    config.routes = vec![RouteConfig {
        name: "api".into(),
        prefix: "/api".into(),
        upstream: upstream.to_string(),
    }];

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = HttpServer::new(config).run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

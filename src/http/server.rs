//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the dispatch handler
//! - Wire up middleware (tracing, request lifetime limit)
//! - Dispatch requests through the route table
//! - Turn handler failures into opaque error responses
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ProxyConfig;
use crate::http::upstream::{HttpUpstream, Upstream};
use crate::routing::Router as ProxyRouter;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<ProxyRouter>,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Self {
        Self::with_upstream(config, Arc::new(HttpUpstream::new()))
    }

    /// Create a server whose routes all send through `upstream`.
    pub fn with_upstream(config: ProxyConfig, upstream: Arc<dyn Upstream>) -> Self {
        let routes = Arc::new(ProxyRouter::from_config(&config, upstream));
        for route in routes.routes() {
            tracing::info!(
                route = %route.name(),
                prefix = %route.prefix(),
                upstream = %route.handler().upstream_base(),
                "Route registered"
            );
        }

        let router = Self::build_router(&config, AppState { routes });
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// The Axum router, for serving or driving directly.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Route the request and run the matched handler.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let Some(route) = state.routes.match_request(&request) else {
        tracing::warn!(method = %method, path = %path, "No route matched");
        return (StatusCode::NOT_FOUND, "No matching route found").into_response();
    };

    match route.handler().handle(route.prefix(), request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(
                route = %route.name(),
                method = %method,
                path = %path,
                error = %e,
                "Proxy request failed"
            );
            e.into_response()
        }
    }
}

//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, route dispatch)
//!     → handler.rs (preflight short-circuit, forwarding pipeline)
//!     → request.rs (outbound headers/body per method)
//!     → upstream.rs (send to origin)
//!     → response.rs (header overrides)
//!     → Send to client
//! ```

pub mod handler;
pub mod request;
pub mod response;
pub mod server;
pub mod upstream;

pub use handler::ProxyHandler;
pub use request::OutboundRequest;
pub use server::HttpServer;
pub use upstream::{HttpUpstream, Upstream};

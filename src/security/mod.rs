//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound headers
//!     → headers.rs (drop connection-scoped and client-managed headers)
//!     → outbound request
//!
//! Upstream response headers
//!     → headers.rs (drop hop-by-hop headers)
//!     → response to client
//! ```

pub mod headers;

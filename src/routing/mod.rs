//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, query)
//!     → router.rs (route lookup)
//!     → matcher.rs (segment-anchored prefix match)
//!     → Return: matched Route or NoMatch
//!
//! Forwarding:
//!     matched prefix + inbound URI
//!     → rewrite.rs (strip prefix, join onto upstream origin)
//! ```
//!
//! # Design Decisions
//! - Routes registered explicitly at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always matches same route

pub mod matcher;
pub mod rewrite;
pub mod router;

pub use rewrite::UrlRewriter;
pub use router::{Route, Router};

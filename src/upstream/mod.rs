//! Upstream client subsystem.
//!
//! # Data Flow
//! ```text
//! resolved (ServiceKind, base URL) + optional JSON payload
//!     → client.rs (one shared HTTP client, fixed per-call timeout)
//!     → backend REST resource: GET/POST /{service}, GET/PUT/DELETE /{service}/{id}
//!     → Result<Value, UpstreamError>
//! ```
//!
//! # Design Decisions
//! - No retries, no circuit breaking: a failed call propagates as-is
//! - Timeout errors are distinct from other transport errors
//! - Backend 404 is a distinct condition, never synthesized into a default
//! - Redirects are not followed; the gateway must see backend statuses verbatim

pub mod client;

pub use client::{UpstreamClient, UpstreamError};

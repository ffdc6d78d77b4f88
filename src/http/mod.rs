//! HTTP gateway subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → server.rs (Axum setup, timeout, request ID, trace, metrics)
//!     → handlers.rs (validate service name against the registry first,
//!                    then resolve → translate → forward → map response)
//!     → render.rs (HTML pages) or 303 redirect to the listing
//!     → error.rs (uniform error → status mapping)
//! ```

pub mod error;
pub mod handlers;
pub mod render;
pub mod request;
pub mod server;

pub use error::GatewayError;
pub use server::{AppState, GatewayServer};

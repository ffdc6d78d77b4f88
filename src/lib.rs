//! Record Gateway Library
//!
//! A web gateway fronting three record services (users, maisons, locations).
//! It resolves a service name to a backend address, translates HTML form
//! submissions into the JSON shape that backend expects, forwards the call,
//! and maps the result back into a uniform response.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod registry;
pub mod translate;
pub mod upstream;

pub use config::GatewayConfig;
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
pub use registry::{ServiceKind, ServiceRegistry};

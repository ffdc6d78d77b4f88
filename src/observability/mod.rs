//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → structured log events (tracing)
//!     → counters and histograms (metrics.rs)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through all spans
//! - Metric updates are cheap (atomic increments)
//! - The exporter is optional so local runs need no extra port

pub mod metrics;

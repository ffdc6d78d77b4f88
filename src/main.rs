//! Record Gateway (v1)
//!
//! A small web gateway built with Tokio and Axum that fronts three
//! independently deployed record services.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────┐
//!                       │                   GATEWAY                     │
//!                       │                                               │
//!   Browser Request     │  ┌────────┐   ┌──────────┐   ┌────────────┐  │
//!   ────────────────────┼─▶│  http  │──▶│ registry │──▶│ translate  │  │
//!                       │  │ server │   │ (name →  │   │ (form →    │  │
//!                       │  └────────┘   │ address) │   │  JSON)     │  │
//!                       │               └────┬─────┘   └─────┬──────┘  │
//!                       │                    │               │         │
//!                       │                    ▼               ▼         │
//!   Browser Response    │  ┌────────┐   ┌──────────────────────────┐  │
//!   ◀───────────────────┼──│ render │◀──│     upstream client      │◀─┼── Record
//!                       │  │ + error│   │  (CRUD, fixed timeout)   │  │   Service
//!                       │  │ mapping│   └──────────────────────────┘  │
//!                       │  └────────┘                                 │
//!                       │  ┌─────────────────────────────────────────┐│
//!                       │  │          Cross-Cutting Concerns          ││
//!                       │  │  ┌────────┐ ┌─────────────┐ ┌─────────┐ ││
//!                       │  │  │ config │ │observability│ │lifecycle│ ││
//!                       │  │  └────────┘ └─────────────┘ └─────────┘ ││
//!                       │  └─────────────────────────────────────────┘│
//!                       └──────────────────────────────────────────────┘
//! ```

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use record_gateway::config::loader;
use record_gateway::lifecycle::Shutdown;
use record_gateway::GatewayServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "record_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("record-gateway v0.1.0 starting");

    // Load configuration (defaults + optional file + env overrides)
    let config = loader::from_env()?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        users = %config.services.users,
        maisons = %config.services.maisons,
        locations = %config.services.locations,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Metrics exporter
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            record_gateway::observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Create and run the gateway server
    let shutdown = Shutdown::new();
    let server = GatewayServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all gateway routes
//! - Wire up middleware (timeout, request ID, trace, metrics)
//! - Bind the server to a listener and serve with graceful shutdown
//!
//! # Design Decisions
//! - The registry and upstream client are built once and shared via state;
//!   nothing mutable is shared between concurrent requests
//! - The inbound timeout layer bounds total request time independently of
//!   the per-call upstream timeout

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::http::handlers;
use crate::http::request::assign_request_id;
use crate::observability::metrics;
use crate::registry::{RegistryError, ServiceRegistry};
use crate::upstream::UpstreamClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ServiceRegistry>,
    pub upstream: UpstreamClient,
}

/// Errors constructing the gateway server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("registry: {0}")]
    Registry(#[from] RegistryError),

    #[error("upstream client: {0}")]
    Client(#[from] reqwest::Error),
}

/// HTTP server for the record gateway.
pub struct GatewayServer {
    router: Router,
}

impl GatewayServer {
    /// Create a new gateway server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, ServerError> {
        let registry = Arc::new(ServiceRegistry::from_config(&config.services)?);
        let upstream = UpstreamClient::new(Duration::from_secs(config.timeouts.upstream_secs))?;

        let state = AppState { registry, upstream };
        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all routes and middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::home))
            .route("/{service}", get(handlers::list_service))
            .route("/{service}/", get(handlers::list_service))
            .route(
                "/{service}/create",
                get(handlers::create_form).post(handlers::create_item),
            )
            .route(
                "/{service}/edit/{id}",
                get(handlers::edit_form).post(handlers::edit_item),
            )
            .route("/{service}/delete/{id}", get(handlers::delete_item))
            .route("/{service}/{id}", get(handlers::view_item))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(middleware::from_fn(assign_request_id))
            .layer(middleware::from_fn(record_metrics))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until shutdown is signalled (broadcast or Ctrl+C).
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Middleware: per-request counter and latency histogram.
async fn record_metrics(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let service = request
        .uri()
        .path()
        .trim_start_matches('/')
        .split('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or("root")
        .to_string();

    let response = next.run(request).await;

    metrics::record_request(&method, response.status().as_u16(), &service, start);
    response
}

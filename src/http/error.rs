//! Uniform error mapping for gateway responses.
//!
//! # Responsibilities
//! - Collect the failure conditions of a routing pipeline in one type
//! - Map each condition to an outbound status code
//!
//! # Design Decisions
//! - Unknown service names are 404 and never reach the network
//! - Backend 404 stays 404 (no default object is synthesized)
//! - Backend timeouts result in 504 Gateway Timeout, other transport
//!   failures in 502; neither is retried
//! - Any other backend error status passes through unreinterpreted, so
//!   validation failures keep the status the backend chose

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::registry::RegistryError;
use crate::translate::TranslateError;
use crate::upstream::UpstreamError;

/// Everything that can go wrong while routing one request.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Requested service name is not in the registry.
    #[error("service not found: {0}")]
    UnknownService(String),

    /// The form submission could not be translated.
    #[error(transparent)]
    BadForm(#[from] TranslateError),

    /// The backend call failed.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl From<RegistryError> for GatewayError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotRegistered(name) => GatewayError::UnknownService(name),
            // Addresses are parsed at startup; a lookup cannot produce this.
            RegistryError::InvalidAddress { service, .. } => {
                GatewayError::UnknownService(service.to_string())
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            GatewayError::UnknownService(name) => {
                tracing::warn!(service = %name, "Unknown service requested");
                (StatusCode::NOT_FOUND, "Service not found".to_string())
            }
            GatewayError::BadForm(err) => {
                tracing::warn!(error = %err, "Rejected form submission");
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            GatewayError::Upstream(UpstreamError::NotFound) => {
                (StatusCode::NOT_FOUND, "Item not found".to_string())
            }
            GatewayError::Upstream(UpstreamError::Timeout) => {
                tracing::error!("Upstream call timed out");
                (StatusCode::GATEWAY_TIMEOUT, "Upstream timed out".to_string())
            }
            GatewayError::Upstream(UpstreamError::Status(status)) => {
                tracing::warn!(status = %status, "Upstream rejected request");
                (
                    StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY),
                    "Upstream rejected request".to_string(),
                )
            }
            GatewayError::Upstream(err) => {
                tracing::error!(error = %err, "Upstream request failed");
                (StatusCode::BAD_GATEWAY, "Upstream request failed".to_string())
            }
        };
        (status, message).into_response()
    }
}

//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the record gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Backend record service addresses.
    pub services: ServicesConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Base addresses of the three backend record services.
///
/// Defaults use the conventional in-cluster hostnames; each is independently
/// overridable via `USERS_SERVICE_URL`, `MAISON_SERVICE_URL` and
/// `LOCATION_SERVICE_URL`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServicesConfig {
    /// Users service base URL.
    pub users: String,

    /// Maisons service base URL.
    pub maisons: String,

    /// Locations service base URL.
    pub locations: String,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            users: "http://user-service:8004".to_string(),
            maisons: "http://maison-service:8005".to_string(),
            locations: "http://location-service:8006".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Per-call timeout for upstream requests in seconds.
    pub upstream_secs: u64,

    /// Total inbound request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            upstream_secs: 10,
            request_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_cluster_conventions() {
        let config = GatewayConfig::default();
        assert_eq!(config.services.users, "http://user-service:8004");
        assert_eq!(config.services.maisons, "http://maison-service:8005");
        assert_eq!(config.services.locations, "http://location-service:8006");
        assert_eq!(config.timeouts.upstream_secs, 10);
    }

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [services]
            users = "http://127.0.0.1:9104"
            "#,
        )
        .unwrap();
        assert_eq!(config.services.users, "http://127.0.0.1:9104");
        assert_eq!(config.services.maisons, "http://maison-service:8005");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8000");
    }
}

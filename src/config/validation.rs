//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check service addresses are absolute http(s) URLs
//! - Validate value ranges (timeouts > 0, bind address parseable)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A backend address is not an absolute http(s) URL.
    #[error("{service} service address `{address}` is not a valid http(s) URL")]
    InvalidServiceAddress {
        service: &'static str,
        address: String,
    },

    /// The listener bind address cannot be parsed.
    #[error("bind address `{0}` is not a valid socket address")]
    InvalidBindAddress(String),

    /// A timeout is configured as zero.
    #[error("{0} timeout must be non-zero")]
    ZeroTimeout(&'static str),
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (service, address) in [
        ("users", &config.services.users),
        ("maisons", &config.services.maisons),
        ("locations", &config.services.locations),
    ] {
        if !is_http_url(address) {
            errors.push(ValidationError::InvalidServiceAddress {
                service,
                address: address.clone(),
            });
        }
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_http_url(address: &str) -> bool {
    match Url::parse(address) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn test_all_errors_are_collected() {
        let mut config = GatewayConfig::default();
        config.services.users = "not-a-url".to_string();
        config.listener.bind_address = "nowhere".to_string();
        config.timeouts.upstream_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::ZeroTimeout("upstream")));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let mut config = GatewayConfig::default();
        config.services.locations = "ftp://location-service:8006".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
    }
}

//! Configuration loading from disk and the environment.

use std::env;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Environment variable {var} has invalid value `{value}`")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build the effective configuration for this process.
///
/// Starts from defaults, overlays the TOML file named by `GATEWAY_CONFIG`
/// when that variable is set, then applies per-field environment overrides
/// and validates the result.
pub fn from_env() -> Result<GatewayConfig, ConfigError> {
    let mut config = match env::var("GATEWAY_CONFIG") {
        Ok(path) => {
            let content = fs::read_to_string(&path)?;
            toml::from_str(&content)?
        }
        Err(_) => GatewayConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn apply_env_overrides(config: &mut GatewayConfig) -> Result<(), ConfigError> {
    if let Ok(value) = env::var("USERS_SERVICE_URL") {
        config.services.users = value;
    }
    if let Ok(value) = env::var("MAISON_SERVICE_URL") {
        config.services.maisons = value;
    }
    if let Ok(value) = env::var("LOCATION_SERVICE_URL") {
        config.services.locations = value;
    }
    if let Ok(value) = env::var("GATEWAY_BIND_ADDRESS") {
        config.listener.bind_address = value;
    }
    if let Ok(value) = env::var("UPSTREAM_TIMEOUT_SECS") {
        config.timeouts.upstream_secs =
            value.parse().map_err(|_| ConfigError::InvalidEnv {
                var: "UPSTREAM_TIMEOUT_SECS",
                value,
            })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_file_contents_rejected() {
        let config: Result<GatewayConfig, toml::de::Error> = toml::from_str("services = 3");
        assert!(config.is_err());
    }

    #[test]
    fn test_validation_errors_surface_through_loader() {
        let mut config = GatewayConfig::default();
        config.timeouts.request_secs = 0;
        let err = validate_config(&config).unwrap_err();
        let err = ConfigError::Validation(err);
        assert!(err.to_string().contains("request timeout"));
    }
}

//! Service registry: logical name → backend address.
//!
//! # Data Flow
//! ```text
//! ServicesConfig (validated at startup)
//!     → ServiceRegistry::from_config (parse base URLs once)
//!     → Freeze as immutable registry, shared via Arc
//!
//! Per request:
//!     raw service name
//!     → ServiceKind::from_str (closed set, rejected at the boundary)
//!     → base URL lookup
//! ```
//!
//! # Design Decisions
//! - The service set is a closed enum, not a string-keyed map; unknown names
//!   never reach a variant, let alone the network
//! - Immutable after construction (thread-safe without locks)
//! - Explicit NotRegistered rather than silent default
//! - No aliasing: one name per service, matched exactly

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

use crate::config::ServicesConfig;

/// The closed set of record services the gateway fronts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    Users,
    Maisons,
    Locations,
}

impl ServiceKind {
    /// Every registered service, in presentation order.
    pub const ALL: [ServiceKind; 3] = [
        ServiceKind::Users,
        ServiceKind::Maisons,
        ServiceKind::Locations,
    ];

    /// The logical name, as it appears in URLs on both sides of the gateway.
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceKind::Users => "users",
            ServiceKind::Maisons => "maisons",
            ServiceKind::Locations => "locations",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceKind {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "users" => Ok(ServiceKind::Users),
            "maisons" => Ok(ServiceKind::Maisons),
            "locations" => Ok(ServiceKind::Locations),
            other => Err(RegistryError::NotRegistered(other.to_string())),
        }
    }
}

/// Errors from registry construction and lookup.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The requested service name is not in the registry.
    #[error("service not registered: {0}")]
    NotRegistered(String),

    /// A configured base address failed to parse at startup.
    #[error("invalid base address for {service}: {source}")]
    InvalidAddress {
        service: &'static str,
        #[source]
        source: url::ParseError,
    },
}

/// Immutable mapping from [`ServiceKind`] to backend base URL.
#[derive(Debug, Clone)]
pub struct ServiceRegistry {
    users: Url,
    maisons: Url,
    locations: Url,
}

impl ServiceRegistry {
    /// Build the registry from validated configuration.
    pub fn from_config(services: &ServicesConfig) -> Result<Self, RegistryError> {
        Ok(Self {
            users: parse_base("users", &services.users)?,
            maisons: parse_base("maisons", &services.maisons)?,
            locations: parse_base("locations", &services.locations)?,
        })
    }

    /// Resolve a raw service name to its kind and base address.
    ///
    /// This is the precondition for every routing entry point; it fails
    /// before any upstream call is attempted.
    pub fn resolve(&self, name: &str) -> Result<(ServiceKind, &Url), RegistryError> {
        let kind = name.parse::<ServiceKind>()?;
        Ok((kind, self.base_url(kind)))
    }

    /// Base URL for a known service.
    pub fn base_url(&self, kind: ServiceKind) -> &Url {
        match kind {
            ServiceKind::Users => &self.users,
            ServiceKind::Maisons => &self.maisons,
            ServiceKind::Locations => &self.locations,
        }
    }

    /// Names of every registered service.
    pub fn service_names(&self) -> impl Iterator<Item = &'static str> {
        ServiceKind::ALL.iter().map(|kind| kind.as_str())
    }
}

fn parse_base(service: &'static str, address: &str) -> Result<Url, RegistryError> {
    // A trailing slash makes Url::join treat the base as a directory.
    let normalized = if address.ends_with('/') {
        address.to_string()
    } else {
        format!("{address}/")
    };
    Url::parse(&normalized).map_err(|source| RegistryError::InvalidAddress { service, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ServiceRegistry {
        ServiceRegistry::from_config(&ServicesConfig::default()).unwrap()
    }

    #[test]
    fn test_registered_names_resolve_to_stable_addresses() {
        let registry = registry();
        for name in ["users", "maisons", "locations"] {
            let (kind, url) = registry.resolve(name).unwrap();
            assert_eq!(kind.as_str(), name);
            assert!(!url.as_str().is_empty());
            // Resolution is stable across calls.
            let (_, again) = registry.resolve(name).unwrap();
            assert_eq!(url, again);
        }
    }

    #[test]
    fn test_unregistered_name_is_rejected() {
        let err = registry().resolve("bogus").unwrap_err();
        assert!(matches!(err, RegistryError::NotRegistered(name) if name == "bogus"));
    }

    #[test]
    fn test_lookup_is_exact_no_aliasing() {
        let registry = registry();
        assert!(registry.resolve("Users").is_err());
        assert!(registry.resolve("user").is_err());
        assert!(registry.resolve("users/").is_err());
    }

    #[test]
    fn test_base_urls_join_as_directories() {
        let registry = registry();
        let url = registry.base_url(ServiceKind::Users).join("users").unwrap();
        assert_eq!(url.as_str(), "http://user-service:8004/users");
    }

    #[test]
    fn test_invalid_address_fails_construction() {
        let mut services = ServicesConfig::default();
        services.maisons = "http://".to_string();
        let err = ServiceRegistry::from_config(&services).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidAddress { service: "maisons", .. }));
    }
}

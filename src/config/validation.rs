//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listen address {0:?} is not of the form [host]:port")]
    InvalidBindAddress(String),

    #[error("metrics address {0:?} is not a valid socket address")]
    InvalidMetricsAddress(String),

    #[error("data path must not be empty")]
    EmptyDataPath,

    #[error("request timeout must be greater than zero")]
    ZeroRequestTimeout,
}

/// Validate a fully merged configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !is_host_port(&config.listener.bind_address) {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.data.path.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyDataPath);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `ip:port`, `[ipv6]:port`, `hostname:port` or `:port` (all interfaces).
/// Hostnames are resolved when the listener binds.
fn is_host_port(address: &str) -> bool {
    if address.parse::<SocketAddr>().is_ok() {
        return true;
    }
    match address.rsplit_once(':') {
        Some((host, port)) => !host.contains([':', '[', ']']) && port.parse::<u16>().is_ok(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(validate_config(&AppConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = AppConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "nowhere".into();
        config.data.path = PathBuf::new();
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidBindAddress("not-an-address".into()),
                ValidationError::InvalidMetricsAddress("nowhere".into()),
                ValidationError::EmptyDataPath,
                ValidationError::ZeroRequestTimeout,
            ]
        );
    }

    #[test]
    fn test_listen_address_forms() {
        for address in [":8080", "localhost:8080", "127.0.0.1:0", "[::1]:8080", "0.0.0.0:8080"] {
            let mut config = AppConfig::default();
            config.listener.bind_address = address.into();
            assert_eq!(validate_config(&config), Ok(()), "{address}");
        }
        for address in ["8080", "localhost", "localhost:99999", "host:port", "::1:8080", ""] {
            let mut config = AppConfig::default();
            config.listener.bind_address = address.into();
            assert_eq!(
                validate_config(&config),
                Err(vec![ValidationError::InvalidBindAddress(address.into())]),
                "{address}"
            );
        }
    }

    #[test]
    fn test_metrics_address_ignored_when_disabled() {
        let mut config = AppConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert_eq!(validate_config(&config), Ok(()));
    }
}

//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, limits > 0)
//! - Detect conflicting listeners (same address, same service twice)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: EchoConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use crate::config::schema::EchoConfig;
use crate::services::ServiceKind;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("no service is enabled")]
    NoServices,
    #[error("invalid bind address for {kind} service: {address}")]
    InvalidBindAddress { kind: ServiceKind, address: String },
    #[error("bind address {0} is used by more than one service")]
    DuplicateBindAddress(String),
    #[error("{0} service is declared more than once")]
    DuplicateService(ServiceKind),
    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,
    #[error("limits.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,
    #[error("limits.max_in_flight must be greater than zero")]
    ZeroInFlightLimit,
    #[error("unknown log level: {0}")]
    UnknownLogLevel(String),
    #[error("invalid metrics address: {0}")]
    InvalidMetricsAddress(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &EchoConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.enabled_services().next().is_none() {
        errors.push(ValidationError::NoServices);
    }

    let mut addresses = HashSet::new();
    let mut kinds = HashSet::new();
    for service in config.enabled_services() {
        match service.bind_address.parse::<SocketAddr>() {
            Err(_) => errors.push(ValidationError::InvalidBindAddress {
                kind: service.kind,
                address: service.bind_address.clone(),
            }),
            // Port 0 asks the OS for a fresh port each time.
            Ok(addr) if addr.port() != 0 && !addresses.insert(addr) => {
                errors.push(ValidationError::DuplicateBindAddress(
                    service.bind_address.clone(),
                ));
            }
            Ok(_) => {}
        }
        if !kinds.insert(service.kind) {
            errors.push(ValidationError::DuplicateService(service.kind));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }
    if config.limits.max_in_flight == 0 {
        errors.push(ValidationError::ZeroInFlightLimit);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ServiceConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&EchoConfig::default()), Ok(()));
    }

    #[test]
    fn test_reports_all_errors() {
        let mut config = EchoConfig::default();
        config.services = vec![
            ServiceConfig::new(ServiceKind::Root, "127.0.0.1:7000"),
            ServiceConfig::new(ServiceKind::Root, "127.0.0.1:7000"),
            ServiceConfig::new(ServiceKind::Typed, "not-an-address"),
        ];
        config.timeouts.request_secs = 0;
        config.limits.max_body_bytes = 0;
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::DuplicateBindAddress("127.0.0.1:7000".into()),
                ValidationError::DuplicateService(ServiceKind::Root),
                ValidationError::InvalidBindAddress {
                    kind: ServiceKind::Typed,
                    address: "not-an-address".into(),
                },
                ValidationError::ZeroRequestTimeout,
                ValidationError::ZeroBodyLimit,
                ValidationError::UnknownLogLevel("loud".into()),
            ]
        );
    }

    #[test]
    fn test_ephemeral_ports_may_repeat() {
        let mut config = EchoConfig::default();
        config.services = ServiceKind::ALL
            .iter()
            .map(|kind| ServiceConfig::new(*kind, "127.0.0.1:0"))
            .collect();
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_disabled_services_are_ignored() {
        let mut config = EchoConfig::default();
        for service in &mut config.services {
            service.enabled = false;
        }
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::NoServices])
        );
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = EchoConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::InvalidMetricsAddress("nowhere".into())])
        );
    }
}

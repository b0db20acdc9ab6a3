//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the echo
//! services. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::services::ServiceKind;

/// Root configuration for the echo services.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EchoConfig {
    /// Services hosted by this process, one listener each.
    pub services: Vec<ServiceConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request size and concurrency limits.
    pub limits: LimitsConfig,

    /// Security hardening settings.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            services: vec![
                ServiceConfig::new(ServiceKind::Root, "127.0.0.1:8000"),
                ServiceConfig::new(ServiceKind::Typed, "127.0.0.1:8001"),
                ServiceConfig::new(ServiceKind::Hints, "127.0.0.1:8002"),
            ],
            timeouts: TimeoutConfig::default(),
            limits: LimitsConfig::default(),
            security: SecurityConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl EchoConfig {
    /// Services that are switched on, in declaration order.
    pub fn enabled_services(&self) -> impl Iterator<Item = &ServiceConfig> {
        self.services.iter().filter(|s| s.enabled)
    }

    /// Keep only the given service kinds enabled. An empty selection keeps
    /// the configuration untouched.
    pub fn restrict_to(&mut self, kinds: &[ServiceKind]) {
        if kinds.is_empty() {
            return;
        }
        for service in &mut self.services {
            service.enabled = service.enabled && kinds.contains(&service.kind);
        }
    }
}

/// A single hosted service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Which routing table to serve.
    pub kind: ServiceKind,

    /// Bind address (e.g., "127.0.0.1:8000").
    pub bind_address: String,

    /// Whether the service is started.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl ServiceConfig {
    pub fn new(kind: ServiceKind, bind_address: impl Into<String>) -> Self {
        Self {
            kind,
            bind_address: bind_address.into(),
            enabled: true,
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Maximum requests handled at once per service (backpressure).
    pub max_in_flight: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 1024 * 1024, // 1MB
            max_in_flight: 1024,
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Add `x-content-type-options` and `x-frame-options` to every response.
    pub enable_headers: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human readable or JSON lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: EchoConfig = toml::from_str("").unwrap();
        assert_eq!(config.services.len(), 3);
        assert_eq!(config.timeouts.request_secs, 30);
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_services_table() {
        let config: EchoConfig = toml::from_str(
            r#"
            [[services]]
            kind = "typed"
            bind_address = "0.0.0.0:9000"

            [[services]]
            kind = "hints"
            bind_address = "0.0.0.0:9001"
            enabled = false

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.services.len(), 2);
        assert_eq!(config.services[0].kind, ServiceKind::Typed);
        assert!(config.services[0].enabled);
        assert!(!config.services[1].enabled);
        assert_eq!(config.enabled_services().count(), 1);
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }

    #[test]
    fn test_restrict_to() {
        let mut config = EchoConfig::default();
        config.restrict_to(&[ServiceKind::Hints]);
        let kinds: Vec<_> = config.enabled_services().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![ServiceKind::Hints]);

        let mut config = EchoConfig::default();
        config.restrict_to(&[]);
        assert_eq!(config.enabled_services().count(), 3);
    }
}

//! Shared utilities for integration and load testing.

use std::net::SocketAddr;

use param_echo::config::{EchoConfig, ServiceConfig};
use param_echo::lifecycle::{self, RunningServices};
use param_echo::ServiceKind;

/// Start every service on an ephemeral port.
pub async fn start_all() -> RunningServices {
    let mut config = EchoConfig::default();
    config.services = ServiceKind::ALL
        .iter()
        .map(|kind| ServiceConfig::new(*kind, "127.0.0.1:0"))
        .collect();
    lifecycle::start(&config).await.expect("services failed to start")
}

/// Base URL of a running service.
pub fn base_url(running: &RunningServices, kind: ServiceKind) -> String {
    let addr: SocketAddr = running
        .address_of(kind)
        .expect("service is not running");
    format!("http://{}", addr)
}

/// Client that never reuses pooled connections across servers.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

//! Startup orchestration.
//!
//! # Responsibilities
//! - Install the metrics exporter when enabled
//! - Bind every enabled service's listener
//! - Spawn one server task per service, all tied to one shutdown coordinator
//!
//! # Design Decisions
//! - Fail fast: any bind error aborts before a single server is spawned
//! - Listeners start last (traffic only when every service is ready)

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::config::EchoConfig;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability;
use crate::services::ServiceKind;

/// Error type for startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to bind {kind} service to {address}: {source}")]
    Bind {
        kind: ServiceKind,
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid metrics address: {0}")]
    MetricsAddress(String),
    #[error("failed to install metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}

struct RunningService {
    kind: ServiceKind,
    addr: SocketAddr,
    task: JoinHandle<std::io::Result<()>>,
}

/// Handle over every spawned service.
pub struct RunningServices {
    services: Vec<RunningService>,
    shutdown: Shutdown,
}

/// Bind and spawn every enabled service in `config`.
pub async fn start(config: &EchoConfig) -> Result<RunningServices, StartupError> {
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::MetricsAddress(config.observability.metrics_address.clone()))?;
        observability::init_metrics(addr)?;
    }

    let mut listeners = Vec::new();
    for service in config.enabled_services() {
        let listener = TcpListener::bind(&service.bind_address)
            .await
            .map_err(|source| StartupError::Bind {
                kind: service.kind,
                address: service.bind_address.clone(),
                source,
            })?;
        listeners.push((service.kind, listener));
    }

    let shutdown = Shutdown::new();
    let mut services = Vec::with_capacity(listeners.len());
    for (kind, listener) in listeners {
        let addr = listener.local_addr().map_err(|source| StartupError::Bind {
            kind,
            address: "local address".to_string(),
            source,
        })?;
        let server = HttpServer::new(kind, config);
        let task = tokio::spawn(server.run(listener, shutdown.subscribe()));
        services.push(RunningService { kind, addr, task });
    }

    tracing::info!(services = services.len(), "All services started");
    Ok(RunningServices { services, shutdown })
}

impl RunningServices {
    /// Address each service actually listens on.
    pub fn addresses(&self) -> Vec<(ServiceKind, SocketAddr)> {
        self.services.iter().map(|s| (s.kind, s.addr)).collect()
    }

    /// Address of the given service, if it is running.
    pub fn address_of(&self, kind: ServiceKind) -> Option<SocketAddr> {
        self.services.iter().find(|s| s.kind == kind).map(|s| s.addr)
    }

    /// Trigger shutdown and wait for every server to drain.
    pub async fn stop(self) {
        self.shutdown.trigger();
        for service in self.services {
            match service.task.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::error!(service = %service.kind, error = %e, "Server exited with error")
                }
                Err(e) => {
                    tracing::error!(service = %service.kind, error = %e, "Server task failed")
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;

    #[tokio::test]
    async fn test_bind_failure_is_reported() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = taken.local_addr().unwrap().to_string();

        let mut config = EchoConfig::default();
        config.services = vec![ServiceConfig::new(ServiceKind::Root, address.clone())];

        match start(&config).await {
            Err(StartupError::Bind { kind, address: a, .. }) => {
                assert_eq!(kind, ServiceKind::Root);
                assert_eq!(a, address);
            }
            other => panic!("expected bind error, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_start_and_stop() {
        let mut config = EchoConfig::default();
        config.services = ServiceKind::ALL
            .iter()
            .map(|kind| ServiceConfig::new(*kind, "127.0.0.1:0"))
            .collect();

        let running = start(&config).await.unwrap();
        assert_eq!(running.addresses().len(), 3);
        assert!(running.address_of(ServiceKind::Hints).is_some());
        running.stop().await;
    }
}

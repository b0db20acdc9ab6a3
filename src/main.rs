use std::path::PathBuf;

use clap::Parser;

use param_echo::config::{self, ConfigError, EchoConfig};
use param_echo::lifecycle;
use param_echo::observability;
use param_echo::ServiceKind;

#[derive(Parser)]
#[command(name = "param-echo")]
#[command(about = "Serve the parameter echo services", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only start these services (repeatable).
    #[arg(short, long = "service", value_enum)]
    services: Vec<ServiceKind>,

    /// Override the configured log level.
    #[arg(long)]
    log_level: Option<String>,
}

fn load(cli: &Cli) -> Result<EchoConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => EchoConfig::default(),
    };

    config.restrict_to(&cli.services);
    if let Some(level) = &cli.log_level {
        config.observability.log_level = level.clone();
    }

    config::validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load(&cli)?;

    observability::init_logging(&config.observability)?;

    tracing::info!("param-echo v{} starting", env!("CARGO_PKG_VERSION"));
    for service in config.enabled_services() {
        tracing::info!(
            service = %service.kind,
            bind_address = %service.bind_address,
            "Service configured"
        );
    }
    tracing::info!(
        request_timeout_secs = config.timeouts.request_secs,
        max_body_bytes = config.limits.max_body_bytes,
        max_in_flight = config.limits.max_in_flight,
        "Configuration loaded"
    );

    let running = match lifecycle::start(&config).await {
        Ok(running) => running,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    for (kind, addr) in running.addresses() {
        tracing::info!(service = %kind, address = %addr, "Listening for connections");
    }

    lifecycle::wait_for_signal().await;
    running.stop().await;

    tracing::info!("Shutdown complete");
    Ok(())
}

//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every service produces:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!     → TraceLayer spans carrying the request ID
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;

pub use self::logging::init_logging;
pub use self::metrics::init_metrics;

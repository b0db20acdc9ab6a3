//! Parameter echo services.
//!
//! Three small HTTP services that echo path parameters, query parameters and
//! request bodies back as JSON, each with its own defaults and coercion rules.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ listener ──▶ middleware ──▶ routing table ──▶ handler
//!                     (per         (request id,   (root | typed |   (params
//!                      service)     trace, limits)  hints)           binding)
//!
//!     Client Response ◀── JSON body or JSON validation error (422/404/405)
//!
//!     Cross-cutting: config, observability (logs + metrics), lifecycle
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod services;

pub use config::EchoConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use services::ServiceKind;

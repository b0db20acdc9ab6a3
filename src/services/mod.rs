//! The echo services.
//!
//! # Data Flow
//! ```text
//! HTTP request
//!     → http::server (middleware stack, fallbacks)
//!     → root.rs | typed.rs | hints.rs (routing table + handlers)
//!     → http::params (query decoding, coercion)
//!     → JSON response, or http::response::ApiError
//! ```
//!
//! # Design Decisions
//! - Each service is a flat routing table with no shared state
//! - Handlers are pure: no IO beyond the request itself

use std::fmt;

use axum::Router;
use serde::{Deserialize, Serialize};

pub mod hints;
pub mod root;
pub mod typed;

/// Which routing table a listener serves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    /// Greeting, raw path echo, untyped skip/limit.
    Root,
    /// Integer path echo, defaulted string query.
    Typed,
    /// Int-or-string query, repeatable list query, body echo.
    Hints,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 3] = [ServiceKind::Root, ServiceKind::Typed, ServiceKind::Hints];

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceKind::Root => "root",
            ServiceKind::Typed => "typed",
            ServiceKind::Hints => "hints",
        }
    }

    /// The service's routes, without middleware.
    pub fn routes(self) -> Router {
        match self {
            ServiceKind::Root => root::routes(),
            ServiceKind::Typed => typed::routes(),
            ServiceKind::Hints => hints::routes(),
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

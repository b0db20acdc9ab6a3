//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack, fallbacks)
//!     → request.rs (request ID assigned and propagated)
//!     → services::* handlers, binding parameters through params.rs
//!     → response.rs (JSON error bodies on rejection)
//!     → Send to client
//! ```

pub mod params;
pub mod request;
pub mod response;
pub mod server;

pub use params::{IntOrString, QueryParams};
pub use request::X_REQUEST_ID;
pub use response::{ApiError, FieldError, Loc};
pub use server::HttpServer;

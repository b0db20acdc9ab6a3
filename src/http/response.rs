//! Error responses.
//!
//! # Responsibilities
//! - Define the client-facing error taxonomy
//! - Render every error as a JSON body with a `detail` member
//! - Map errors to status codes (422 validation, 404, 405)
//!
//! # Design Decisions
//! - Validation errors carry every failing field, each with a location path
//!   such as `["query", "q", 1]`
//! - Error bodies never echo more than the offending location and a message

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

/// One step of a field location: a name, or a position in a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Loc {
    Key(String),
    Index(usize),
}

impl From<&str> for Loc {
    fn from(key: &str) -> Self {
        Loc::Key(key.to_string())
    }
}

impl From<usize> for Loc {
    fn from(index: usize) -> Self {
        Loc::Index(index)
    }
}

/// Build a location path from a mix of keys and indices.
#[macro_export]
macro_rules! loc {
    ($($part:expr),* $(,)?) => {
        vec![$($crate::http::response::Loc::from($part)),*]
    };
}

/// A single failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<Loc>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl FieldError {
    /// A required parameter was not supplied.
    pub fn missing(loc: Vec<Loc>) -> Self {
        Self {
            loc,
            msg: "field required".to_string(),
            kind: "value_error.missing",
        }
    }

    /// A value could not be read as an integer.
    pub fn not_an_integer(loc: Vec<Loc>) -> Self {
        Self {
            loc,
            msg: "value is not a valid integer".to_string(),
            kind: "type_error.integer",
        }
    }

    /// The request body is not well-formed JSON.
    pub fn json_decode(err: &serde_json::Error, offset: usize) -> Self {
        Self {
            loc: vec![Loc::from("body"), Loc::from(offset)],
            msg: err.to_string(),
            kind: "value_error.jsondecode",
        }
    }
}

/// Errors surfaced to HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request validation failed ({} field(s))", .0.len())]
    Validation(Vec<FieldError>),
    #[error("not found")]
    NotFound,
    #[error("method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl From<FieldError> for ApiError {
    fn from(err: FieldError) -> Self {
        ApiError::Validation(vec![err])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Validation(errors) => {
                tracing::debug!(fields = errors.len(), "Rejecting invalid request");
                json!({ "detail": errors })
            }
            ApiError::NotFound => json!({ "detail": "Not Found" }),
            ApiError::MethodNotAllowed => json!({ "detail": "Method Not Allowed" }),
        };
        (status, Json(body)).into_response()
    }
}

/// Fallback for paths no route matches.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Fallback for a known path requested with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

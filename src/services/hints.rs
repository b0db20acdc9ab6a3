//! Hints service: int-or-string query, repeatable integer query, body echo.

use axum::{
    body::Bytes,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use crate::http::params::{parse_int, IntOrString, QueryParams};
use crate::http::response::{ApiError, FieldError};
use crate::loc;

const DEFAULT_Q: [i64; 2] = [1, 2];

#[derive(Debug, Serialize)]
pub struct QList {
    pub q: Vec<i64>,
}

pub fn routes() -> Router {
    Router::new()
        .route("/dataitems/", get(read_data_items))
        .route("/items/", get(read_items))
        .route("/create-item/", post(create_item))
}

/// Returns `data` unwrapped, as a number when it reads as one.
pub async fn read_data_items(query: QueryParams) -> Result<Json<IntOrString>, ApiError> {
    let raw = query
        .last("data")
        .ok_or_else(|| FieldError::missing(loc!["query", "data"]))?;
    Ok(Json(IntOrString::coerce(raw)))
}

pub async fn read_items(query: QueryParams) -> Result<Json<QList>, ApiError> {
    let raw = query.all("q");
    if raw.is_empty() {
        return Ok(Json(QList {
            q: DEFAULT_Q.to_vec(),
        }));
    }

    let mut q = Vec::with_capacity(raw.len());
    let mut errors = Vec::new();
    for (index, value) in raw.into_iter().enumerate() {
        match parse_int(loc!["query", "q", index], value) {
            Ok(n) => q.push(n),
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        Ok(Json(QList { q }))
    } else {
        Err(ApiError::Validation(errors))
    }
}

/// Echo any well-formed JSON body unchanged.
pub async fn create_item(body: Bytes) -> Result<Json<Value>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(FieldError::missing(loc!["body"]).into());
    }
    let item: Value = serde_json::from_slice(&body).map_err(|e| {
        let offset = byte_offset(&body, e.line(), e.column());
        FieldError::json_decode(&e, offset)
    })?;
    Ok(Json(item))
}

/// Translate a 1-based line/column pair from the JSON decoder into a byte offset.
fn byte_offset(body: &[u8], line: usize, column: usize) -> usize {
    let line_start: usize = body
        .split(|b| *b == b'\n')
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum();
    (line_start + column.saturating_sub(1)).min(body.len())
}

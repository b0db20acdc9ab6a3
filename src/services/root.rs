//! Root service: greeting, raw path echo, untyped pagination echo.

use axum::{routing::get, Json, Router};
use serde::Serialize;
use serde_json::Value;

use crate::http::params::{LastSegment, QueryParams};

const DEFAULT_SKIP: i64 = 0;
const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Serialize)]
pub struct Greeting {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ItemId {
    pub item_id: String,
}

/// `skip`/`limit` carry no declared type: a supplied value is echoed as the
/// text it arrived as, a missing one falls back to its numeric default.
#[derive(Debug, Serialize)]
pub struct Page {
    pub skip: Value,
    pub limit: Value,
}

pub fn routes() -> Router {
    Router::new()
        .route("/", get(read_root))
        .route("/items/{item_id}", get(read_item))
        .route("/items/", get(read_items))
}

pub async fn read_root() -> Json<Greeting> {
    Json(Greeting {
        message: "Hello, World!",
    })
}

pub async fn read_item(LastSegment(item_id): LastSegment) -> Json<ItemId> {
    Json(ItemId { item_id })
}

pub async fn read_items(query: QueryParams) -> Json<Page> {
    let untyped = |name: &str, default: i64| {
        query
            .last(name)
            .map_or_else(|| Value::from(default), Value::from)
    };
    Json(Page {
        skip: untyped("skip", DEFAULT_SKIP),
        limit: untyped("limit", DEFAULT_LIMIT),
    })
}

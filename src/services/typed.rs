//! Typed service: integer path echo and a defaulted string query.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::http::params::{parse_int, LastSegment, QueryParams};
use crate::http::response::ApiError;
use crate::loc;

const DEFAULT_DATA: &str = "funcoding";

#[derive(Debug, Serialize)]
pub struct ItemId {
    pub item_id: i64,
}

#[derive(Debug, Serialize)]
pub struct Data {
    pub data: String,
}

pub fn routes() -> Router {
    Router::new()
        .route("/items/{item_id}", get(read_item))
        .route("/getdata/", get(read_data))
}

pub async fn read_item(LastSegment(raw): LastSegment) -> Result<Json<ItemId>, ApiError> {
    let item_id = parse_int(loc!["path", "item_id"], &raw)?;
    Ok(Json(ItemId { item_id }))
}

pub async fn read_data(query: QueryParams) -> Json<Data> {
    let data = query.last("data").unwrap_or(DEFAULT_DATA).to_string();
    Json(Data { data })
}

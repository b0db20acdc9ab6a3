//! Request parameter binding.
//!
//! # Responsibilities
//! - Decode the query string keeping every occurrence of a key, in order
//! - Coerce raw text into the declared parameter types
//! - Describe coercion failures as field errors with a location
//!
//! # Design Decisions
//! - The query extractor never rejects; handlers decide what is required
//! - Path segments decode lossily, so bytes that are not UTF-8 reach the
//!   handler as U+FFFD instead of failing in the router
//! - Integer coercion trims surrounding ASCII whitespace and accepts a sign
//! - Int-or-string tries the integer interpretation first

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use percent_encoding::percent_decode_str;
use serde::Serialize;

use crate::http::response::{FieldError, Loc};

/// Every `key=value` pair of the query string, decoded, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Decode an `application/x-www-form-urlencoded` query string.
    pub fn parse(query: &str) -> Self {
        let pairs = url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    /// First occurrence of `name`.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Last occurrence of `name`.
    pub fn last(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// All occurrences of `name`, in request order.
    pub fn all(&self, name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.uri.query().map(Self::parse).unwrap_or_default())
    }
}

/// The last segment of the request path, percent-decoded.
///
/// Only meaningful on routes whose final component is the captured parameter,
/// such as `/items/{item_id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastSegment(pub String);

impl LastSegment {
    pub fn decode(path: &str) -> Self {
        let raw = path.rsplit('/').next().unwrap_or_default();
        Self(percent_decode_str(raw).decode_utf8_lossy().into_owned())
    }
}

impl<S> FromRequestParts<S> for LastSegment
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::decode(parts.uri.path()))
    }
}

/// Parse `raw` as a signed 64-bit integer, reporting failures at `loc`.
pub fn parse_int(loc: Vec<Loc>, raw: &str) -> Result<i64, FieldError> {
    raw.trim_matches(|c: char| c.is_ascii_whitespace())
        .parse::<i64>()
        .map_err(|_| FieldError::not_an_integer(loc))
}

/// A value declared as accepting either an integer or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum IntOrString {
    Int(i64),
    Text(String),
}

impl IntOrString {
    /// Integer when the text is an integer literal, otherwise the text itself.
    pub fn coerce(raw: &str) -> Self {
        match parse_int(Vec::new(), raw) {
            Ok(n) => IntOrString::Int(n),
            Err(_) => IntOrString::Text(raw.to_string()),
        }
    }
}

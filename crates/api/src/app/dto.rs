use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use nutrifacts_core::is_blank;
use nutrifacts_products::{Product, SEARCH_LIMIT_MAX};

// -------------------------
// Request DTOs
// -------------------------

/// Raw `GET /products` query string. Both fields stay text until
/// [`SearchParams::into_request`] checks them.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub limit: Option<String>,
}

/// A search that passed parameter checks; `limit` is already clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub limit: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchParamsError {
    QueryBlank,
    LimitMissing,
    /// Not an integer, or outside the signed 8-bit range.
    LimitMalformed,
    LimitNotPositive,
}

impl SearchParams {
    pub fn into_request(self) -> Result<SearchRequest, SearchParamsError> {
        let query = self.query.unwrap_or_default();
        if is_blank(&query) {
            return Err(SearchParamsError::QueryBlank);
        }

        let raw = self.limit.ok_or(SearchParamsError::LimitMissing)?;
        let limit: i8 = raw
            .trim()
            .parse()
            .map_err(|_| SearchParamsError::LimitMalformed)?;
        if limit <= 0 {
            return Err(SearchParamsError::LimitNotPositive);
        }

        // limit is in 1..=127 here
        let limit = u8::try_from(limit)
            .map_err(|_| SearchParamsError::LimitMalformed)?
            .min(SEARCH_LIMIT_MAX);

        Ok(SearchRequest { query, limit })
    }
}

/// Decode a product body.
///
/// An empty body decodes to the empty product so validation reports the
/// first missing field; malformed JSON is a bare 400.
pub fn decode_product(body: &Bytes) -> Result<Product, Response> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Product::default());
    }

    serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "rejected malformed product body");
        StatusCode::BAD_REQUEST.into_response()
    })
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: String,
}

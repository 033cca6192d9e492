use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

use nutrifacts_core::{StoreError, ValidationError};

use crate::app::dto::ErrorResponse;

/// 400 with `{"code": ...}`; the only error response carrying a body.
pub fn validation_error_to_response(err: ValidationError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            code: err.code().to_string(),
        }),
    )
        .into_response()
}

pub fn store_error_status(err: &StoreError) -> StatusCode {
    match err {
        StoreError::NotFound | StoreError::DoesNotExist => StatusCode::NOT_FOUND,
        StoreError::InvalidData(_) => StatusCode::BAD_REQUEST,
        StoreError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Bodiless response for a store failure. Driver details go to the log only.
pub fn store_error_to_response(operation: &'static str, err: StoreError) -> Response {
    match &err {
        StoreError::Unexpected(detail) => {
            error!(operation, code = err.code(), detail = %detail, "store call failed");
        }
        StoreError::InvalidData(detail) => {
            warn!(operation, code = err.code(), detail = %detail, "store rejected data");
        }
        StoreError::NotFound | StoreError::DoesNotExist => {}
    }
    store_error_status(&err).into_response()
}

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use nutrifacts_core::StoreResult;

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/unit", get(list_units))
        .route("/nutrient", get(list_nutrient_types))
        .route("/vitamin", get(list_vitamin_types))
        .route("/mineral", get(list_mineral_types))
}

fn names_response(operation: &'static str, result: StoreResult<Vec<String>>) -> Response {
    match result {
        Ok(names) => (StatusCode::OK, Json(names)).into_response(),
        Err(e) => errors::store_error_to_response(operation, e),
    }
}

pub async fn list_units(Extension(services): Extension<Arc<AppServices>>) -> Response {
    names_response("get_units", services.vocabulary.get_units().await)
}

pub async fn list_nutrient_types(Extension(services): Extension<Arc<AppServices>>) -> Response {
    names_response("get_nutrient_types", services.vocabulary.get_nutrient_types().await)
}

pub async fn list_vitamin_types(Extension(services): Extension<Arc<AppServices>>) -> Response {
    names_response("get_vitamin_types", services.vocabulary.get_vitamin_types().await)
}

pub async fn list_mineral_types(Extension(services): Extension<Arc<AppServices>>) -> Response {
    names_response("get_mineral_types", services.vocabulary.get_mineral_types().await)
}

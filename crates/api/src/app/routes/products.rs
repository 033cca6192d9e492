use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::debug;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route(
            "/",
            get(search_products).post(create_product).put(update_product),
        )
        .route("/:ean", get(get_product).delete(delete_product))
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(ean): Path<String>,
) -> Response {
    match services.products.get_product(&ean).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::store_error_to_response("get_product", e),
    }
}

pub async fn search_products(
    Extension(services): Extension<Arc<AppServices>>,
    params: Result<Query<dto::SearchParams>, QueryRejection>,
) -> Response {
    let Ok(Query(params)) = params else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let request = match params.into_request() {
        Ok(r) => r,
        Err(reason) => {
            debug!(?reason, "rejected search parameters");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    match services
        .products
        .search_products(&request.query, request.limit)
        .await
    {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => errors::store_error_to_response("search_products", e),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> Response {
    let product = match dto::decode_product(&body) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    if let Err(e) = services.validator.validate_product(&product) {
        return errors::validation_error_to_response(e);
    }

    match services.products.create_product(&product).await {
        Ok(()) => StatusCode::CREATED.into_response(),
        Err(e) => errors::store_error_to_response("create_product", e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> Response {
    let product = match dto::decode_product(&body) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    if let Err(e) = services.validator.validate_product(&product) {
        return errors::validation_error_to_response(e);
    }

    match services.products.update_product(&product).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => errors::store_error_to_response("update_product", e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(ean): Path<String>,
) -> Response {
    match services.products.delete_product(&ean).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error_to_response("delete_product", e),
    }
}

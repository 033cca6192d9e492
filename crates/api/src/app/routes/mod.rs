use axum::{routing::get, Router};

pub mod products;
pub mod system;
pub mod types;

/// Router for the product and vocabulary endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .nest("/products", products::router())
        .nest("/types", types::router())
}

//! HTTP API application wiring (axum router + service wiring).
//!
//! - `services.rs`: store selection (Postgres or in-memory) and shared state
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: query/body decoding and response DTOs
//! - `errors.rs`: mapping of validation and store errors to responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::{build_services, AppServices};

/// Build the full HTTP router around already-constructed services.
pub fn build_app(services: Arc<AppServices>) -> Router {
    routes::router().layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn(middleware::request_logger))
            .layer(Extension(services)),
    )
}

//! Infrastructure layer: Postgres and in-memory stores, configuration.

pub mod config;
pub mod memory;
pub mod postgres;

//! `nutrifacts-core`: shared building blocks.
//!
//! This crate holds the error taxonomy used by every layer and a few small
//! string helpers. It has no IO and no framework dependencies.

pub mod error;
pub mod text;

pub use error::{StoreError, StoreResult, ValidationError};
pub use text::is_blank;

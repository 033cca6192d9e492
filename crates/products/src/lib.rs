//! Products domain module.
//!
//! Nested product records (packaging, nutrition, nutrients, vitamins,
//! minerals), their validation rules, and the store contracts the
//! infrastructure layer implements. No IO, no HTTP, no SQL.

pub mod ean;
pub mod product;
pub mod store;
pub mod validation;
pub mod vocabulary;

pub use ean::is_valid_identifier;
pub use product::{Constituent, Mineral, Nutrient, Nutrition, Product, Quantity, Vitamin};
pub use store::{ProductStore, SEARCH_LIMIT_MAX};
pub use validation::{
    validate_minerals, validate_product, validate_quantity, validate_vitamins, MandatoryNutrient,
    MandatoryNutrients, ProductValidator,
};
pub use vocabulary::{VocabularyKind, VocabularyStore};

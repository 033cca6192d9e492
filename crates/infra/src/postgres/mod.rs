//! Postgres adapters for the product and vocabulary stores.

mod batch;
mod errors;
mod product_store;
mod queries;
mod rows;
mod seeder;
mod vocabulary_store;

pub use batch::{Param, Statement, WriteBatch};
pub use product_store::PgProductStore;
pub use rows::{ConstituentRow, NutritionRow, ProductRow, ProductRows, QuantityRow};
pub use seeder::SchemaSeeder;
pub use vocabulary_store::PgVocabularyStore;

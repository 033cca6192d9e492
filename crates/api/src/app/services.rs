use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use nutrifacts_infra::config::AppConfig;
use nutrifacts_infra::memory::{InMemoryProductStore, InMemoryVocabularyStore};
use nutrifacts_infra::postgres::{PgProductStore, PgVocabularyStore, SchemaSeeder};
use nutrifacts_products::{ProductStore, ProductValidator, VocabularyStore};

/// Shared handler state: the two stores and the product validator.
#[derive(Clone)]
pub struct AppServices {
    pub products: Arc<dyn ProductStore>,
    pub vocabulary: Arc<dyn VocabularyStore>,
    pub validator: ProductValidator,
}

impl AppServices {
    pub fn new(products: Arc<dyn ProductStore>, vocabulary: Arc<dyn VocabularyStore>) -> Self {
        Self {
            products,
            vocabulary,
            validator: ProductValidator::default(),
        }
    }

    /// In-memory stores seeded with the default vocabularies.
    pub fn in_memory() -> Self {
        let vocabulary = InMemoryVocabularyStore::with_defaults();
        Self::new(
            Arc::new(InMemoryProductStore::new(vocabulary.clone())),
            Arc::new(vocabulary),
        )
    }

    pub fn with_validator(mut self, validator: ProductValidator) -> Self {
        self.validator = validator;
        self
    }
}

/// Pick the store backend from configuration.
///
/// With a database URL this connects, applies the schema and seed, and
/// returns Postgres-backed stores. Without one it falls back to memory.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let Some(database_url) = config.database_url.as_deref() else {
        warn!("running with in-memory stores; data is lost on restart");
        return Ok(AppServices::in_memory());
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(database_url)
        .await
        .context("failed to connect to Postgres")?;

    SchemaSeeder::new(pool.clone())
        .run()
        .await
        .context("failed to apply schema and seed")?;

    info!(max_connections = config.max_connections, "using Postgres stores");

    Ok(AppServices::new(
        Arc::new(PgProductStore::new(pool.clone())),
        Arc::new(PgVocabularyStore::new(pool)),
    ))
}

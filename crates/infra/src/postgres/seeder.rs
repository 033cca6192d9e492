//! Idempotent schema bootstrap.

use sqlx::PgPool;
use tracing::info;

use nutrifacts_core::StoreResult;

use super::errors::map_sqlx_error;

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");
const SEED_SQL: &str = include_str!("../../sql/seed.sql");

/// Creates the tables and loads the default vocabularies.
///
/// Safe to run on every startup: tables use `IF NOT EXISTS` and seed rows
/// use `ON CONFLICT DO NOTHING`.
#[derive(Debug, Clone)]
pub struct SchemaSeeder {
    pool: PgPool,
}

impl SchemaSeeder {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn run(&self) -> StoreResult<()> {
        sqlx::raw_sql(SCHEMA_SQL)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("apply_schema", e))?;
        info!("database schema applied");

        let seeded = sqlx::raw_sql(SEED_SQL)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("apply_seed", e))?;
        info!(rows = seeded.rows_affected(), "vocabulary seed applied");

        Ok(())
    }
}

//! Postgres-backed product store.
//!
//! Every operation runs inside one transaction. Reads use a
//! `REPEATABLE READ READ ONLY` snapshot so the seven result sets making up a
//! product are mutually consistent; writes execute a [`WriteBatch`].
//!
//! A transaction dropped before commit (client disconnect, early `?`) is
//! rolled back by sqlx.

use std::sync::Arc;

use async_trait::async_trait;
use nutrifacts_core::{StoreError, StoreResult};
use nutrifacts_products::{Product, ProductStore};
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use tracing::{Span, instrument, warn};

use super::batch::WriteBatch;
use super::errors::map_sqlx_error;
use super::queries::{self, ConstituentTable};
use super::rows::{ConstituentRow, NutritionRow, ProductRow, ProductRows, QuantityRow};

const READ_SNAPSHOT: &str = "SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY";

#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: Arc<PgPool>,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn begin(&self, operation: &str) -> StoreResult<Transaction<'static, Postgres>> {
        self.pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error(operation, e))
    }

    async fn begin_read(&self, operation: &str) -> StoreResult<Transaction<'static, Postgres>> {
        let mut tx = self.begin(operation).await?;
        sqlx::query(READ_SNAPSHOT)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error(operation, e))?;
        Ok(tx)
    }
}

/// Fetch the remaining six result sets for a product whose row is known.
async fn fetch_parts(conn: &mut PgConnection, product: ProductRow) -> Result<ProductRows, sqlx::Error> {
    let ean = product.ean.clone();

    let packaging = sqlx::query_as::<_, QuantityRow>(queries::SELECT_PACKAGING)
        .bind(&ean)
        .fetch_optional(&mut *conn)
        .await?;
    let nutrition = sqlx::query_as::<_, NutritionRow>(queries::SELECT_NUTRITION)
        .bind(&ean)
        .fetch_optional(&mut *conn)
        .await?;
    let nutrition_quantity = sqlx::query_as::<_, QuantityRow>(queries::SELECT_NUTRITION_QUANTITY)
        .bind(&ean)
        .fetch_optional(&mut *conn)
        .await?;

    let nutrients = fetch_constituents(conn, ConstituentTable::Nutrient, &ean).await?;
    let vitamins = fetch_constituents(conn, ConstituentTable::Vitamin, &ean).await?;
    let minerals = fetch_constituents(conn, ConstituentTable::Mineral, &ean).await?;

    Ok(ProductRows {
        product: Some(product),
        packaging,
        nutrition,
        nutrition_quantity,
        nutrients,
        vitamins,
        minerals,
    })
}

async fn fetch_constituents(
    conn: &mut PgConnection,
    table: ConstituentTable,
    ean: &str,
) -> Result<Vec<ConstituentRow>, sqlx::Error> {
    sqlx::query_as::<_, ConstituentRow>(table.select_sql())
        .bind(ean)
        .fetch_all(&mut *conn)
        .await
}

#[async_trait]
impl ProductStore for PgProductStore {
    #[instrument(skip(self), err)]
    async fn get_product(&self, ean: &str) -> StoreResult<Product> {
        let mut tx = self.begin_read("get_product").await?;

        let product = sqlx::query_as::<_, ProductRow>(queries::SELECT_PRODUCT)
            .bind(ean)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("get_product", e))?
            .ok_or(StoreError::NotFound)?;

        let rows = fetch_parts(&mut *tx, product)
            .await
            .map_err(|e| map_sqlx_error("get_product", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("get_product", e))?;

        rows.assemble()
    }

    #[instrument(skip(self), fields(result_count), err)]
    async fn search_products(&self, query: &str, limit: u8) -> StoreResult<Vec<Product>> {
        let mut tx = self.begin_read("search_products").await?;

        let matches = sqlx::query_as::<_, ProductRow>(queries::SEARCH_PRODUCTS)
            .bind(queries::contains_pattern(query))
            .bind(i64::from(limit))
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("search_products", e))?;

        let mut products = Vec::with_capacity(matches.len());
        for row in matches {
            let ean = row.ean.clone();
            let rows = fetch_parts(&mut *tx, row)
                .await
                .map_err(|e| map_sqlx_error("search_products", e))?;

            match rows.assemble() {
                Ok(product) => products.push(product),
                Err(StoreError::NotFound) => {
                    warn!(ean = %ean, "skipping incomplete product in search results");
                }
                Err(other) => return Err(other),
            }
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("search_products", e))?;

        Span::current().record("result_count", products.len());
        Ok(products)
    }

    #[instrument(skip(self, product), fields(ean = %product.ean), err)]
    async fn create_product(&self, product: &Product) -> StoreResult<()> {
        let batch = WriteBatch::for_create(product)?;
        let mut tx = self.begin("create_product").await?;

        batch
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("create_product", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("create_product", e))
    }

    #[instrument(skip(self, product), fields(ean = %product.ean), err)]
    async fn update_product(&self, product: &Product) -> StoreResult<()> {
        let batch = WriteBatch::for_update(product)?;
        let mut tx = self.begin("update_product").await?;

        let exists = sqlx::query_scalar::<_, String>(queries::LOCK_PRODUCT)
            .bind(&product.ean)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("update_product", e))?
            .is_some();
        if !exists {
            return Err(StoreError::DoesNotExist);
        }

        batch
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("update_product", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("update_product", e))
    }

    #[instrument(skip(self), err)]
    async fn delete_product(&self, ean: &str) -> StoreResult<()> {
        let mut tx = self.begin("delete_product").await?;

        let affected = sqlx::query(queries::DELETE_PRODUCT)
            .bind(ean)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("delete_product", e))?
            .rows_affected();
        if affected == 0 {
            return Err(StoreError::DoesNotExist);
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("delete_product", e))
    }
}

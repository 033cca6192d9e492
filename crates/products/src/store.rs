//! Product store contract.

use std::sync::Arc;

use async_trait::async_trait;
use nutrifacts_core::StoreResult;

use crate::product::Product;

/// Upper bound on the number of products a single search returns.
pub const SEARCH_LIMIT_MAX: u8 = 15;

/// Persistent product storage, keyed by EAN.
///
/// Each call is one atomic unit: either every row it touches is written, or
/// none is. Implementations classify their failures into
/// [`nutrifacts_core::StoreError`] kinds.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// `NotFound` unless the product and all its singular parts exist.
    async fn get_product(&self, ean: &str) -> StoreResult<Product>;

    /// Case-insensitive substring match on `name`, at most `limit` results.
    ///
    /// Products that cannot be assembled are skipped.
    async fn search_products(&self, query: &str, limit: u8) -> StoreResult<Vec<Product>>;

    /// `InvalidData` on duplicate EAN or unresolvable unit/type names.
    async fn create_product(&self, product: &Product) -> StoreResult<()>;

    /// Full replace. `DoesNotExist` when no product has this EAN.
    async fn update_product(&self, product: &Product) -> StoreResult<()>;

    /// `DoesNotExist` when no product has this EAN.
    async fn delete_product(&self, ean: &str) -> StoreResult<()>;
}

#[async_trait]
impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    async fn get_product(&self, ean: &str) -> StoreResult<Product> {
        (**self).get_product(ean).await
    }

    async fn search_products(&self, query: &str, limit: u8) -> StoreResult<Vec<Product>> {
        (**self).search_products(query, limit).await
    }

    async fn create_product(&self, product: &Product) -> StoreResult<()> {
        (**self).create_product(product).await
    }

    async fn update_product(&self, product: &Product) -> StoreResult<()> {
        (**self).update_product(product).await
    }

    async fn delete_product(&self, ean: &str) -> StoreResult<()> {
        (**self).delete_product(ean).await
    }
}

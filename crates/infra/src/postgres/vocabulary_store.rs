use std::sync::Arc;

use async_trait::async_trait;
use nutrifacts_core::StoreResult;
use nutrifacts_products::{VocabularyKind, VocabularyStore};
use sqlx::PgPool;
use tracing::instrument;

use super::errors::map_sqlx_error;
use super::queries;

/// Vocabulary lookups backed by the `unit` and `*_type` tables.
#[derive(Debug, Clone)]
pub struct PgVocabularyStore {
    pool: Arc<PgPool>,
}

impl PgVocabularyStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait]
impl VocabularyStore for PgVocabularyStore {
    #[instrument(skip(self), err)]
    async fn names(&self, kind: VocabularyKind) -> StoreResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(queries::select_vocabulary(kind))
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("vocabulary_names", e))
    }
}

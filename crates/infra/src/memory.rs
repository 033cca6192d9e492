//! In-memory stores for tests/dev.
//!
//! They enforce the same constraints the Postgres schema does: unique EAN,
//! unit and type names resolvable against the vocabulary, no negative or
//! non-finite values, no NUL bytes in text. A failure surfaces as
//! `InvalidData`, exactly as a SQLSTATE 22 or 23 error would.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use nutrifacts_core::{StoreError, StoreResult};
use nutrifacts_products::{
    Constituent, Product, ProductStore, Quantity, VocabularyKind, VocabularyStore,
};

/// Vocabulary lists held in memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVocabularyStore {
    names: HashMap<VocabularyKind, Vec<String>>,
}

impl InMemoryVocabularyStore {
    /// Every vocabulary empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeded with the same lists as `seed.sql`.
    pub fn with_defaults() -> Self {
        VocabularyKind::ALL
            .into_iter()
            .fold(Self::new(), |store, kind| store.with_names(kind, kind.defaults().iter().copied()))
    }

    /// Replace one vocabulary.
    pub fn with_names<I, S>(mut self, kind: VocabularyKind, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names
            .insert(kind, names.into_iter().map(Into::into).collect());
        self
    }

    pub fn contains(&self, kind: VocabularyKind, name: &str) -> bool {
        self.names
            .get(&kind)
            .is_some_and(|names| names.iter().any(|n| n == name))
    }
}

#[async_trait]
impl VocabularyStore for InMemoryVocabularyStore {
    async fn names(&self, kind: VocabularyKind) -> StoreResult<Vec<String>> {
        Ok(self.names.get(&kind).cloned().unwrap_or_default())
    }
}

/// Products keyed by EAN; iteration order is EAN order, like the search query.
#[derive(Debug)]
pub struct InMemoryProductStore {
    vocabulary: InMemoryVocabularyStore,
    inner: RwLock<BTreeMap<String, Product>>,
}

impl InMemoryProductStore {
    pub fn new(vocabulary: InMemoryVocabularyStore) -> Self {
        Self {
            vocabulary,
            inner: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_constraints(&self, product: &Product) -> StoreResult<()> {
        if product.name.contains('\0') {
            return Err(StoreError::invalid_data("name contains a NUL byte"));
        }
        self.check_quantity(&product.packaging)?;
        self.check_quantity(&product.nutrition.per)?;
        if product.nutrition.kcal < 0 {
            return Err(StoreError::invalid_data("kcal violates check constraint"));
        }

        let nutrition = &product.nutrition;
        self.check_constituents(VocabularyKind::NutrientType, &nutrition.nutrients)?;
        self.check_constituents(VocabularyKind::VitaminType, &nutrition.vitamins)?;
        self.check_constituents(VocabularyKind::MineralType, &nutrition.minerals)
    }

    fn check_quantity(&self, quantity: &Quantity) -> StoreResult<()> {
        if !self.vocabulary.contains(VocabularyKind::Unit, &quantity.unit) {
            return Err(StoreError::invalid_data(format!(
                "unknown unit {:?}",
                quantity.unit
            )));
        }
        if !quantity.value.is_finite() || quantity.value < 0.0 {
            return Err(StoreError::invalid_data("value violates check constraint"));
        }
        Ok(())
    }

    fn check_constituents<C: Constituent>(&self, kind: VocabularyKind, items: &[C]) -> StoreResult<()> {
        for item in items {
            if !self.vocabulary.contains(kind, item.kind()) {
                return Err(StoreError::invalid_data(format!(
                    "unknown {:?} {:?}",
                    kind,
                    item.kind()
                )));
            }
            self.check_quantity(item.quantity())?;
        }
        Ok(())
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new(InMemoryVocabularyStore::with_defaults())
    }
}

fn poisoned<E>(_: E) -> StoreError {
    StoreError::unexpected("in-memory product store lock poisoned")
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn get_product(&self, ean: &str) -> StoreResult<Product> {
        let map = self.inner.read().map_err(poisoned)?;
        map.get(ean).cloned().ok_or(StoreError::NotFound)
    }

    async fn search_products(&self, query: &str, limit: u8) -> StoreResult<Vec<Product>> {
        let needle = query.to_lowercase();
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map
            .values()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .take(usize::from(limit))
            .cloned()
            .collect())
    }

    async fn create_product(&self, product: &Product) -> StoreResult<()> {
        self.check_constraints(product)?;

        let mut map = self.inner.write().map_err(poisoned)?;
        if map.contains_key(&product.ean) {
            return Err(StoreError::invalid_data(format!(
                "duplicate key ean {:?}",
                product.ean
            )));
        }
        map.insert(product.ean.clone(), product.clone());
        Ok(())
    }

    async fn update_product(&self, product: &Product) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(poisoned)?;
        let Some(existing) = map.get_mut(&product.ean) else {
            return Err(StoreError::DoesNotExist);
        };

        self.check_constraints(product)?;
        *existing = product.clone();
        Ok(())
    }

    async fn delete_product(&self, ean: &str) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(poisoned)?;
        map.remove(ean).map(|_| ()).ok_or(StoreError::DoesNotExist)
    }
}

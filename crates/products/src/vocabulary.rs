//! Reference vocabularies (units and nutrient/vitamin/mineral types).
//!
//! Vocabularies are server-defined closed lists. Products refer to their
//! members by name; the store resolves names to internal ids on write.

use std::sync::Arc;

use async_trait::async_trait;
use nutrifacts_core::StoreResult;

/// Which vocabulary a lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VocabularyKind {
    Unit,
    NutrientType,
    VitaminType,
    MineralType,
}

impl VocabularyKind {
    pub const ALL: [VocabularyKind; 4] = [
        VocabularyKind::Unit,
        VocabularyKind::NutrientType,
        VocabularyKind::VitaminType,
        VocabularyKind::MineralType,
    ];

    /// Members shipped with a fresh installation.
    pub fn defaults(&self) -> &'static [&'static str] {
        match self {
            VocabularyKind::Unit => DEFAULT_UNITS,
            VocabularyKind::NutrientType => DEFAULT_NUTRIENT_TYPES,
            VocabularyKind::VitaminType => DEFAULT_VITAMIN_TYPES,
            VocabularyKind::MineralType => DEFAULT_MINERAL_TYPES,
        }
    }
}

pub const DEFAULT_UNITS: &[&str] = &["g", "mg", "ug", "kg", "ml", "l"];

pub const DEFAULT_NUTRIENT_TYPES: &[&str] = &[
    "FAT",
    "SATURATED_FAT",
    "CARBOHYDRATES",
    "SUGARS",
    "FIBRE",
    "PROTEIN",
    "SALT",
];

pub const DEFAULT_VITAMIN_TYPES: &[&str] = &[
    "A", "B1", "B2", "B3", "B5", "B6", "B7", "B9", "B12", "C", "D", "E", "K",
];

pub const DEFAULT_MINERAL_TYPES: &[&str] = &[
    "CALCIUM",
    "IRON",
    "MAGNESIUM",
    "PHOSPHORUS",
    "POTASSIUM",
    "SODIUM",
    "ZINC",
    "COPPER",
    "MANGANESE",
    "SELENIUM",
    "IODINE",
];

/// Read-only access to the vocabularies.
///
/// Each lookup returns the full list of names; an empty vocabulary is an
/// empty list, not an error.
#[async_trait]
pub trait VocabularyStore: Send + Sync {
    async fn names(&self, kind: VocabularyKind) -> StoreResult<Vec<String>>;

    async fn get_units(&self) -> StoreResult<Vec<String>> {
        self.names(VocabularyKind::Unit).await
    }

    async fn get_nutrient_types(&self) -> StoreResult<Vec<String>> {
        self.names(VocabularyKind::NutrientType).await
    }

    async fn get_vitamin_types(&self) -> StoreResult<Vec<String>> {
        self.names(VocabularyKind::VitaminType).await
    }

    async fn get_mineral_types(&self) -> StoreResult<Vec<String>> {
        self.names(VocabularyKind::MineralType).await
    }
}

#[async_trait]
impl<S> VocabularyStore for Arc<S>
where
    S: VocabularyStore + ?Sized,
{
    async fn names(&self, kind: VocabularyKind) -> StoreResult<Vec<String>> {
        (**self).names(kind).await
    }
}

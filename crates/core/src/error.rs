//! Error model.
//!
//! Two families live here:
//!
//! - [`ValidationError`]: client input that is malformed in shape or content.
//!   Detected before any store call and reported to the client verbatim as a
//!   stable code string.
//! - [`StoreError`]: outcomes of a store call, classified at the store
//!   boundary. Anything the store cannot classify collapses into
//!   [`StoreError::Unexpected`].

use thiserror::Error;

/// Validation failure for a product payload.
///
/// Variants carry no payload; the kind alone is the answer.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationError {
    #[error("product ean is missing")]
    EanMissing,

    #[error("product ean is not a valid EAN-8, EAN-13 or UPC-A code")]
    EanInvalid,

    #[error("product name is missing")]
    NameMissing,

    #[error("quantity unit is missing")]
    QuantityUnitMissing,

    #[error("quantity value must not be negative")]
    QuantityValueInvalid,

    #[error("nutrition kcal must not be negative")]
    KcalInvalid,

    #[error("nutrient type is missing")]
    NutrientTypeMissing,

    #[error("nutrients must contain FAT")]
    FatMissing,

    #[error("nutrients must contain CARBOHYDRATES")]
    CarbohydratesMissing,

    #[error("nutrients must contain PROTEIN")]
    ProteinMissing,

    #[error("vitamin type is missing")]
    VitaminTypeMissing,

    #[error("mineral type is missing")]
    MineralTypeMissing,
}

impl ValidationError {
    /// Stable wire code returned to clients in `{"code": ...}`.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EanMissing => "EAN_MISSING",
            ValidationError::EanInvalid => "EAN_INVALID",
            ValidationError::NameMissing => "NAME_MISSING",
            ValidationError::QuantityUnitMissing => "QUANTITY_UNIT_MISSING",
            ValidationError::QuantityValueInvalid => "QUANTITY_VALUE_INVALID",
            ValidationError::KcalInvalid => "KCAL_INVALID",
            ValidationError::NutrientTypeMissing => "NUTRIENT_TYPE_MISSING",
            ValidationError::FatMissing => "FAT_MISSING",
            ValidationError::CarbohydratesMissing => "CARBOHYDRATES_MISSING",
            ValidationError::ProteinMissing => "PROTEIN_MISSING",
            ValidationError::VitaminTypeMissing => "VITAMIN_TYPE_MISSING",
            ValidationError::MineralTypeMissing => "MINERAL_TYPE_MISSING",
        }
    }
}

/// Result type returned by product and vocabulary stores.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure, already classified into a domain kind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A read found no (complete) record.
    #[error("data not found")]
    NotFound,

    /// A write targeted a record that does not exist.
    #[error("product does not exist")]
    DoesNotExist,

    /// A storage constraint rejected the data (duplicate key, unresolved
    /// vocabulary reference, check constraint).
    #[error("provided data invalid: {0}")]
    InvalidData(String),

    /// Anything else: connectivity, decoding, internal faults.
    #[error("unexpected store failure: {0}")]
    Unexpected(String),
}

impl StoreError {
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// Short symbolic name, used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::NotFound => "DATA_NOT_FOUND",
            StoreError::DoesNotExist => "PRODUCT_DOES_NOT_EXIST",
            StoreError::InvalidData(_) => "PROVIDED_DATA_INVALID",
            StoreError::Unexpected(_) => "UNEXPECTED",
        }
    }
}

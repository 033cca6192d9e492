//! Product payload validation.
//!
//! Checks run in a fixed order and stop at the first failure, so a payload
//! with several problems always reports the same one.

use nutrifacts_core::{is_blank, ValidationError};

use crate::ean::is_valid_identifier;
use crate::product::{Constituent, Mineral, Nutrient, Nutrition, Product, Quantity, Vitamin};

/// A nutrient type every product must list, and the error reported when it
/// is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MandatoryNutrient {
    pub name: String,
    pub missing: ValidationError,
}

/// Ordered set of mandatory nutrient types.
///
/// Presence is checked in insertion order after every entry has been scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MandatoryNutrients {
    entries: Vec<MandatoryNutrient>,
}

impl MandatoryNutrients {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, missing: ValidationError) -> Self {
        self.entries.push(MandatoryNutrient {
            name: name.into(),
            missing,
        });
        self
    }

    pub fn entries(&self) -> &[MandatoryNutrient] {
        &self.entries
    }
}

impl Default for MandatoryNutrients {
    /// FAT, CARBOHYDRATES, PROTEIN.
    fn default() -> Self {
        Self::empty()
            .with("FAT", ValidationError::FatMissing)
            .with("CARBOHYDRATES", ValidationError::CarbohydratesMissing)
            .with("PROTEIN", ValidationError::ProteinMissing)
    }
}

/// Validator for [`Product`] payloads.
#[derive(Debug, Clone, Default)]
pub struct ProductValidator {
    mandatory: MandatoryNutrients,
}

impl ProductValidator {
    pub fn new(mandatory: MandatoryNutrients) -> Self {
        Self { mandatory }
    }

    pub fn mandatory(&self) -> &MandatoryNutrients {
        &self.mandatory
    }

    pub fn validate_product(&self, product: &Product) -> Result<(), ValidationError> {
        if is_blank(&product.ean) {
            return Err(ValidationError::EanMissing);
        }

        if !is_valid_identifier(&product.ean) {
            return Err(ValidationError::EanInvalid);
        }

        if is_blank(&product.name) {
            return Err(ValidationError::NameMissing);
        }

        validate_quantity(&product.packaging)?;
        self.validate_nutrition(&product.nutrition)
    }

    pub fn validate_nutrition(&self, nutrition: &Nutrition) -> Result<(), ValidationError> {
        validate_quantity(&nutrition.per)?;

        if nutrition.kcal < 0 {
            return Err(ValidationError::KcalInvalid);
        }

        self.validate_nutrients(&nutrition.nutrients)?;
        validate_vitamins(&nutrition.vitamins)?;
        validate_minerals(&nutrition.minerals)
    }

    pub fn validate_nutrients(&self, nutrients: &[Nutrient]) -> Result<(), ValidationError> {
        validate_constituents(nutrients, ValidationError::NutrientTypeMissing)?;

        for required in self.mandatory.entries() {
            if !nutrients.iter().any(|n| n.kind == required.name) {
                return Err(required.missing);
            }
        }

        Ok(())
    }
}

/// Validate a product with the default mandatory nutrients.
pub fn validate_product(product: &Product) -> Result<(), ValidationError> {
    ProductValidator::default().validate_product(product)
}

/// Unit is checked before value. The value must be finite and non-negative;
/// JSON numbers beyond `f32` range decode to infinity and are rejected here.
pub fn validate_quantity(quantity: &Quantity) -> Result<(), ValidationError> {
    if is_blank(&quantity.unit) {
        return Err(ValidationError::QuantityUnitMissing);
    }

    if !quantity.value.is_finite() || quantity.value < 0.0 {
        return Err(ValidationError::QuantityValueInvalid);
    }

    Ok(())
}

pub fn validate_vitamins(vitamins: &[Vitamin]) -> Result<(), ValidationError> {
    validate_constituents(vitamins, ValidationError::VitaminTypeMissing)
}

pub fn validate_minerals(minerals: &[Mineral]) -> Result<(), ValidationError> {
    validate_constituents(minerals, ValidationError::MineralTypeMissing)
}

fn validate_constituents<C: Constituent>(
    items: &[C],
    type_missing: ValidationError,
) -> Result<(), ValidationError> {
    for item in items {
        if is_blank(item.kind()) {
            return Err(type_missing);
        }
        validate_quantity(item.quantity())?;
    }
    Ok(())
}

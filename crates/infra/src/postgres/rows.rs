//! Relational rows and their assembly into a [`Product`].

use nutrifacts_core::{StoreError, StoreResult};
use nutrifacts_products::{Constituent, Nutrition, Product, Quantity};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ProductRow {
    pub ean: String,
    pub name: String,
}

/// A `packaging` or `nutrition_quantity` row with its unit name joined in.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct QuantityRow {
    pub ean: String,
    pub value: f32,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct NutritionRow {
    pub ean: String,
    pub kcal: i32,
}

/// A `nutrient`, `vitamin` or `mineral` row with type and unit names joined in.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ConstituentRow {
    pub ean: String,
    pub kind: String,
    pub value: f32,
    pub unit: String,
}

impl From<QuantityRow> for Quantity {
    fn from(row: QuantityRow) -> Self {
        Quantity::new(row.value, row.unit)
    }
}

impl ConstituentRow {
    fn into_constituent<C: Constituent>(self) -> C {
        C::from_parts(self.kind, Quantity::new(self.value, self.unit))
    }
}

/// Everything stored for one EAN, as fetched.
///
/// The four singular parts are `None` when their query returned no row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductRows {
    pub product: Option<ProductRow>,
    pub packaging: Option<QuantityRow>,
    pub nutrition: Option<NutritionRow>,
    pub nutrition_quantity: Option<QuantityRow>,
    pub nutrients: Vec<ConstituentRow>,
    pub vitamins: Vec<ConstituentRow>,
    pub minerals: Vec<ConstituentRow>,
}

impl ProductRows {
    /// Build the nested product.
    ///
    /// A product missing any singular part is reported as `NotFound`, never
    /// returned half-populated.
    pub fn assemble(self) -> StoreResult<Product> {
        let (Some(product), Some(packaging), Some(nutrition), Some(per)) = (
            self.product,
            self.packaging,
            self.nutrition,
            self.nutrition_quantity,
        ) else {
            return Err(StoreError::NotFound);
        };

        Ok(Product {
            ean: product.ean,
            name: product.name,
            packaging: packaging.into(),
            nutrition: Nutrition {
                per: per.into(),
                kcal: nutrition.kcal,
                nutrients: collect(self.nutrients),
                vitamins: collect(self.vitamins),
                minerals: collect(self.minerals),
            },
        })
    }
}

fn collect<C: Constituent>(rows: Vec<ConstituentRow>) -> Vec<C> {
    rows.into_iter().map(ConstituentRow::into_constituent::<C>).collect()
}

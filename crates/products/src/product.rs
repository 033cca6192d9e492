use serde::{Deserialize, Serialize};

/// A measured amount: `value` expressed in `unit`.
///
/// `unit` references the unit vocabulary by its human-readable name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Quantity {
    pub value: f32,
    pub unit: String,
}

impl Quantity {
    pub fn new(value: f32, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }
}

/// A product keyed by its EAN/UPC code.
///
/// Every field defaults to its zero value when absent from the payload, so a
/// partial body is rejected by validation rather than by decoding.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub ean: String,
    pub name: String,
    pub packaging: Quantity,
    pub nutrition: Nutrition,
}

/// Nutrition facts, expressed `per` a reference quantity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Nutrition {
    pub per: Quantity,
    pub kcal: i32,
    pub nutrients: Vec<Nutrient>,
    pub vitamins: Vec<Vitamin>,
    pub minerals: Vec<Mineral>,
}

/// A typed, measured entry of a nutrition list.
///
/// Nutrients, vitamins and minerals share this shape and differ only in the
/// vocabulary their `kind` names.
pub trait Constituent {
    fn from_parts(kind: String, quantity: Quantity) -> Self;
    fn kind(&self) -> &str;
    fn quantity(&self) -> &Quantity;
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Nutrient {
    #[serde(rename = "type")]
    pub kind: String,
    pub quantity: Quantity,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Vitamin {
    #[serde(rename = "type")]
    pub kind: String,
    pub quantity: Quantity,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Mineral {
    #[serde(rename = "type")]
    pub kind: String,
    pub quantity: Quantity,
}

impl Constituent for Nutrient {
    fn from_parts(kind: String, quantity: Quantity) -> Self {
        Self { kind, quantity }
    }

    fn kind(&self) -> &str {
        &self.kind
    }

    fn quantity(&self) -> &Quantity {
        &self.quantity
    }
}

impl Constituent for Vitamin {
    fn from_parts(kind: String, quantity: Quantity) -> Self {
        Self { kind, quantity }
    }

    fn kind(&self) -> &str {
        &self.kind
    }

    fn quantity(&self) -> &Quantity {
        &self.quantity
    }
}

impl Constituent for Mineral {
    fn from_parts(kind: String, quantity: Quantity) -> Self {
        Self { kind, quantity }
    }

    fn kind(&self) -> &str {
        &self.kind
    }

    fn quantity(&self) -> &Quantity {
        &self.quantity
    }
}

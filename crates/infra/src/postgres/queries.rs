//! SQL text for the product and vocabulary tables.

use nutrifacts_products::VocabularyKind;

pub const SELECT_PRODUCT: &str = r#"
    SELECT ean, name
    FROM product
    WHERE ean = $1
"#;

pub const LOCK_PRODUCT: &str = r#"
    SELECT ean
    FROM product
    WHERE ean = $1
    FOR UPDATE
"#;

pub const SELECT_PACKAGING: &str = r#"
    SELECT packaging.ean, packaging.value, unit.value AS unit
    FROM packaging
    JOIN unit ON unit.id = packaging.unit_id
    WHERE packaging.ean = $1
"#;

pub const SELECT_NUTRITION: &str = r#"
    SELECT ean, kcal
    FROM nutrition
    WHERE ean = $1
"#;

pub const SELECT_NUTRITION_QUANTITY: &str = r#"
    SELECT nutrition_quantity.ean, nutrition_quantity.value, unit.value AS unit
    FROM nutrition_quantity
    JOIN unit ON unit.id = nutrition_quantity.unit_id
    WHERE nutrition_quantity.ean = $1
"#;

/// `$1` is a LIKE pattern, `$2` the row limit.
pub const SEARCH_PRODUCTS: &str = r#"
    SELECT ean, name
    FROM product
    WHERE LOWER(name) LIKE LOWER($1)
    ORDER BY ean
    LIMIT $2
"#;

pub const INSERT_PRODUCT: &str = r#"
    INSERT INTO product (ean, name)
    VALUES ($1, $2)
"#;

pub const UPDATE_PRODUCT: &str = r#"
    UPDATE product
    SET name = $2
    WHERE ean = $1
"#;

pub const DELETE_PRODUCT: &str = r#"
    DELETE FROM product
    WHERE ean = $1
"#;

pub const UPSERT_PACKAGING: &str = r#"
    INSERT INTO packaging (ean, value, unit_id)
    VALUES ($1, $2, (SELECT id FROM unit WHERE value = $3))
    ON CONFLICT (ean) DO UPDATE
    SET value = EXCLUDED.value, unit_id = EXCLUDED.unit_id
"#;

pub const UPSERT_NUTRITION: &str = r#"
    INSERT INTO nutrition (ean, kcal)
    VALUES ($1, $2)
    ON CONFLICT (ean) DO UPDATE
    SET kcal = EXCLUDED.kcal
"#;

pub const UPSERT_NUTRITION_QUANTITY: &str = r#"
    INSERT INTO nutrition_quantity (ean, value, unit_id)
    VALUES ($1, $2, (SELECT id FROM unit WHERE value = $3))
    ON CONFLICT (ean) DO UPDATE
    SET value = EXCLUDED.value, unit_id = EXCLUDED.unit_id
"#;

/// Child tables holding nutrients, vitamins and minerals.
///
/// All three share one layout: `(ean, ordinal, type_id, value, unit_id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstituentTable {
    Nutrient,
    Vitamin,
    Mineral,
}

impl ConstituentTable {
    pub fn select_sql(self) -> &'static str {
        match self {
            ConstituentTable::Nutrient => SELECT_NUTRIENTS,
            ConstituentTable::Vitamin => SELECT_VITAMINS,
            ConstituentTable::Mineral => SELECT_MINERALS,
        }
    }

    /// Binds `(ean, ordinal, type name, value, unit name)`.
    pub fn insert_sql(self) -> &'static str {
        match self {
            ConstituentTable::Nutrient => INSERT_NUTRIENT,
            ConstituentTable::Vitamin => INSERT_VITAMIN,
            ConstituentTable::Mineral => INSERT_MINERAL,
        }
    }

    pub fn delete_sql(self) -> &'static str {
        match self {
            ConstituentTable::Nutrient => "DELETE FROM nutrient WHERE ean = $1",
            ConstituentTable::Vitamin => "DELETE FROM vitamin WHERE ean = $1",
            ConstituentTable::Mineral => "DELETE FROM mineral WHERE ean = $1",
        }
    }
}

const SELECT_NUTRIENTS: &str = r#"
    SELECT nutrient.ean, nutrient_type.type AS kind, nutrient.value, unit.value AS unit
    FROM nutrient
    JOIN nutrient_type ON nutrient_type.id = nutrient.type_id
    JOIN unit ON unit.id = nutrient.unit_id
    WHERE nutrient.ean = $1
    ORDER BY nutrient.ordinal
"#;

const SELECT_VITAMINS: &str = r#"
    SELECT vitamin.ean, vitamin_type.type AS kind, vitamin.value, unit.value AS unit
    FROM vitamin
    JOIN vitamin_type ON vitamin_type.id = vitamin.type_id
    JOIN unit ON unit.id = vitamin.unit_id
    WHERE vitamin.ean = $1
    ORDER BY vitamin.ordinal
"#;

const SELECT_MINERALS: &str = r#"
    SELECT mineral.ean, mineral_type.type AS kind, mineral.value, unit.value AS unit
    FROM mineral
    JOIN mineral_type ON mineral_type.id = mineral.type_id
    JOIN unit ON unit.id = mineral.unit_id
    WHERE mineral.ean = $1
    ORDER BY mineral.ordinal
"#;

const INSERT_NUTRIENT: &str = r#"
    INSERT INTO nutrient (ean, ordinal, type_id, value, unit_id)
    VALUES (
        $1,
        $2,
        (SELECT id FROM nutrient_type WHERE type = $3),
        $4,
        (SELECT id FROM unit WHERE value = $5)
    )
"#;

const INSERT_VITAMIN: &str = r#"
    INSERT INTO vitamin (ean, ordinal, type_id, value, unit_id)
    VALUES (
        $1,
        $2,
        (SELECT id FROM vitamin_type WHERE type = $3),
        $4,
        (SELECT id FROM unit WHERE value = $5)
    )
"#;

const INSERT_MINERAL: &str = r#"
    INSERT INTO mineral (ean, ordinal, type_id, value, unit_id)
    VALUES (
        $1,
        $2,
        (SELECT id FROM mineral_type WHERE type = $3),
        $4,
        (SELECT id FROM unit WHERE value = $5)
    )
"#;

/// Full vocabulary listing, in id (insertion) order.
pub fn select_vocabulary(kind: VocabularyKind) -> &'static str {
    match kind {
        VocabularyKind::Unit => "SELECT value FROM unit ORDER BY id",
        VocabularyKind::NutrientType => "SELECT type FROM nutrient_type ORDER BY id",
        VocabularyKind::VitaminType => "SELECT type FROM vitamin_type ORDER BY id",
        VocabularyKind::MineralType => "SELECT type FROM mineral_type ORDER BY id",
    }
}

/// Turn free text into a LIKE pattern matching it as a literal substring.
///
/// Backslash is the default LIKE escape character in Postgres.
pub fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

//! Decomposition of a [`Product`] into ordered SQL writes.
//!
//! A [`WriteBatch`] is built without touching the database, then executed
//! statement by statement on one connection inside the caller's transaction.

use nutrifacts_core::{StoreError, StoreResult};
use nutrifacts_products::{Constituent, Product};
use sqlx::PgConnection;

use super::queries::{self, ConstituentTable};

/// A bound statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Text(String),
    Real(f32),
    Int(i32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: &'static str,
    pub params: Vec<Param>,
}

/// Ordered list of statements making up one logical write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    statements: Vec<Statement>,
}

impl WriteBatch {
    /// Insert the product row, upsert its singular parts, insert children.
    ///
    /// Fails with `InvalidData` if a child list is too long for the `ordinal`
    /// column.
    pub fn for_create(product: &Product) -> StoreResult<Self> {
        let mut batch = Self::default();
        batch.push(
            queries::INSERT_PRODUCT,
            vec![text(&product.ean), text(&product.name)],
        );
        batch.push_singular_parts(product);
        batch.push_children(product, false)?;
        Ok(batch)
    }

    /// Full replace of an existing product: rename, upsert singular parts,
    /// drop and reinsert every child row.
    pub fn for_update(product: &Product) -> StoreResult<Self> {
        let mut batch = Self::default();
        batch.push(
            queries::UPDATE_PRODUCT,
            vec![text(&product.ean), text(&product.name)],
        );
        batch.push_singular_parts(product);
        batch.push_children(product, true)?;
        Ok(batch)
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Run every statement in order; returns the total rows affected.
    ///
    /// Stops at the first failure. The caller owns the transaction and
    /// decides whether to commit.
    pub async fn execute(&self, conn: &mut PgConnection) -> Result<u64, sqlx::Error> {
        let mut affected = 0;
        for stmt in &self.statements {
            let mut query = sqlx::query(stmt.sql);
            for param in &stmt.params {
                query = match param {
                    Param::Text(v) => query.bind(v.as_str()),
                    Param::Real(v) => query.bind(*v),
                    Param::Int(v) => query.bind(*v),
                };
            }
            affected += query.execute(&mut *conn).await?.rows_affected();
        }
        Ok(affected)
    }

    fn push(&mut self, sql: &'static str, params: Vec<Param>) {
        self.statements.push(Statement { sql, params });
    }

    fn push_singular_parts(&mut self, product: &Product) {
        let ean = &product.ean;
        let nutrition = &product.nutrition;

        self.push(
            queries::UPSERT_PACKAGING,
            vec![
                text(ean),
                Param::Real(product.packaging.value),
                text(&product.packaging.unit),
            ],
        );
        self.push(
            queries::UPSERT_NUTRITION,
            vec![text(ean), Param::Int(nutrition.kcal)],
        );
        self.push(
            queries::UPSERT_NUTRITION_QUANTITY,
            vec![
                text(ean),
                Param::Real(nutrition.per.value),
                text(&nutrition.per.unit),
            ],
        );
    }

    fn push_children(&mut self, product: &Product, replace: bool) -> StoreResult<()> {
        let nutrition = &product.nutrition;
        self.push_table(ConstituentTable::Nutrient, &product.ean, &nutrition.nutrients, replace)?;
        self.push_table(ConstituentTable::Vitamin, &product.ean, &nutrition.vitamins, replace)?;
        self.push_table(ConstituentTable::Mineral, &product.ean, &nutrition.minerals, replace)
    }

    fn push_table<C: Constituent>(
        &mut self,
        table: ConstituentTable,
        ean: &str,
        items: &[C],
        replace: bool,
    ) -> StoreResult<()> {
        if replace {
            self.push(table.delete_sql(), vec![text(ean)]);
        }

        for (ordinal, item) in items.iter().enumerate() {
            let quantity = item.quantity();
            self.push(
                table.insert_sql(),
                vec![
                    text(ean),
                    Param::Int(ordinal_param(table, ordinal)?),
                    text(item.kind()),
                    Param::Real(quantity.value),
                    text(&quantity.unit),
                ],
            );
        }
        Ok(())
    }
}

fn text(s: &str) -> Param {
    Param::Text(s.to_string())
}

/// List position as stored in the `INTEGER` ordinal column.
fn ordinal_param(table: ConstituentTable, ordinal: usize) -> StoreResult<i32> {
    i32::try_from(ordinal).map_err(|_| {
        StoreError::invalid_data(format!(
            "too many {:?} entries: position {} exceeds the ordinal column",
            table, ordinal
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutrifacts_products::{Mineral, Nutrient, Nutrition, Quantity, Vitamin};

    fn sample() -> Product {
        let g = |v| Quantity::new(v, "g");
        Product {
            ean: "12345678".to_string(),
            name: "Peanut butter".to_string(),
            packaging: g(350.0),
            nutrition: Nutrition {
                per: g(100.0),
                kcal: 588,
                nutrients: vec![
                    Nutrient::from_parts("FAT".into(), g(50.0)),
                    Nutrient::from_parts("CARBOHYDRATES".into(), g(20.0)),
                    Nutrient::from_parts("PROTEIN".into(), g(25.0)),
                ],
                vitamins: vec![Vitamin::from_parts("E".into(), Quantity::new(9.0, "mg"))],
                minerals: vec![Mineral::from_parts("MAGNESIUM".into(), Quantity::new(154.0, "mg"))],
            },
        }
    }

    #[test]
    fn create_batch_has_one_write_per_table_and_child() {
        let batch = WriteBatch::for_create(&sample()).unwrap();
        // product + 3 singular parts + 3 nutrients + 1 vitamin + 1 mineral
        assert_eq!(batch.len(), 9);
        assert_eq!(batch.statements()[0].sql, queries::INSERT_PRODUCT);
        assert_eq!(batch.statements()[1].sql, queries::UPSERT_PACKAGING);
        assert_eq!(batch.statements()[2].sql, queries::UPSERT_NUTRITION);
        assert_eq!(batch.statements()[3].sql, queries::UPSERT_NUTRITION_QUANTITY);
        assert!(batch.statements().iter().all(|s| !s.sql.trim_start().starts_with("DELETE")));
    }

    #[test]
    fn update_batch_replaces_children() {
        let batch = WriteBatch::for_update(&sample()).unwrap();
        // create layout + 3 child deletes
        assert_eq!(batch.len(), 12);
        assert_eq!(batch.statements()[0].sql, queries::UPDATE_PRODUCT);

        let deletes: Vec<&str> = batch
            .statements()
            .iter()
            .filter(|s| s.sql.starts_with("DELETE"))
            .map(|s| s.sql)
            .collect();
        assert_eq!(
            deletes,
            vec![
                ConstituentTable::Nutrient.delete_sql(),
                ConstituentTable::Vitamin.delete_sql(),
                ConstituentTable::Mineral.delete_sql(),
            ]
        );
    }

    #[test]
    fn children_carry_ordinal_and_names() {
        let batch = WriteBatch::for_create(&sample()).unwrap();
        let nutrient_inserts: Vec<&Statement> = batch
            .statements()
            .iter()
            .filter(|s| s.sql == ConstituentTable::Nutrient.insert_sql())
            .collect();

        assert_eq!(nutrient_inserts.len(), 3);
        for (idx, stmt) in nutrient_inserts.iter().enumerate() {
            assert_eq!(stmt.params[0], Param::Text("12345678".into()));
            assert_eq!(stmt.params[1], Param::Int(idx as i32));
        }
        assert_eq!(nutrient_inserts[2].params[2], Param::Text("PROTEIN".into()));
        assert_eq!(nutrient_inserts[2].params[3], Param::Real(25.0));
        assert_eq!(nutrient_inserts[2].params[4], Param::Text("g".into()));
    }

    #[test]
    fn deletes_precede_inserts_per_table() {
        let batch = WriteBatch::for_update(&sample()).unwrap();
        let sqls: Vec<&str> = batch.statements().iter().map(|s| s.sql).collect();

        let delete_at = sqls
            .iter()
            .position(|s| *s == ConstituentTable::Vitamin.delete_sql())
            .unwrap();
        let insert_at = sqls
            .iter()
            .position(|s| *s == ConstituentTable::Vitamin.insert_sql())
            .unwrap();
        assert!(delete_at < insert_at);
    }

    #[test]
    fn singular_parts_bind_units_by_name() {
        let batch = WriteBatch::for_create(&sample()).unwrap();
        assert_eq!(
            batch.statements()[1].params,
            vec![Param::Text("12345678".into()), Param::Real(350.0), Param::Text("g".into())]
        );
        assert_eq!(
            batch.statements()[2].params,
            vec![Param::Text("12345678".into()), Param::Int(588)]
        );
    }

    #[test]
    fn ordinal_beyond_integer_range_is_invalid_data() {
        assert_eq!(ordinal_param(ConstituentTable::Vitamin, 7).unwrap(), 7);
        assert_eq!(
            ordinal_param(ConstituentTable::Nutrient, i32::MAX as usize).unwrap(),
            i32::MAX
        );
        assert!(matches!(
            ordinal_param(ConstituentTable::Mineral, i32::MAX as usize + 1),
            Err(StoreError::InvalidData(msg)) if msg.contains("Mineral")
        ));
    }
}

//! Postgres store integration tests.
//!
//! Run only when `TEST_DATABASE_URL` points at a scratch database; every
//! test returns early otherwise. Each test uses its own EANs so they can run
//! in parallel against one database.

use nutrifacts_core::StoreError;
use nutrifacts_infra::postgres::{PgProductStore, PgVocabularyStore, SchemaSeeder};
use nutrifacts_products::{
    Constituent, Mineral, Nutrient, Nutrition, Product, ProductStore, Quantity, VocabularyStore,
    Vitamin,
};
use sqlx::postgres::PgPoolOptions;

async fn connect() -> Option<sqlx::PgPool> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .connect(&url)
        .await
        .expect("connect to TEST_DATABASE_URL");
    SchemaSeeder::new(pool.clone())
        .run()
        .await
        .expect("apply schema and seed");
    Some(pool)
}

fn product(ean: &str, name: &str) -> Product {
    let g = |v| Quantity::new(v, "g");
    Product {
        ean: ean.to_string(),
        name: name.to_string(),
        packaging: g(400.0),
        nutrition: Nutrition {
            per: g(100.0),
            kcal: 364,
            nutrients: vec![
                Nutrient::from_parts("PROTEIN".into(), g(13.0)),
                Nutrient::from_parts("FAT".into(), g(7.0)),
                Nutrient::from_parts("CARBOHYDRATES".into(), g(58.0)),
                Nutrient::from_parts("FIBRE".into(), g(10.0)),
            ],
            vitamins: vec![
                Vitamin::from_parts("B1".into(), Quantity::new(0.5, "mg")),
                Vitamin::from_parts("B6".into(), Quantity::new(0.1, "mg")),
            ],
            minerals: vec![Mineral::from_parts("IRON".into(), Quantity::new(4.0, "mg"))],
        },
    }
}

async fn reset(store: &PgProductStore, eans: &[&str]) {
    for ean in eans {
        let _ = store.delete_product(ean).await;
    }
}

#[tokio::test]
async fn create_then_get_preserves_child_order() {
    let Some(pool) = connect().await else { return };
    let store = PgProductStore::new(pool);
    reset(&store, &["90000001"]).await;

    let p = product("90000001", "Rolled oats");
    store.create_product(&p).await.unwrap();

    assert_eq!(store.get_product("90000001").await.unwrap(), p);
    store.delete_product("90000001").await.unwrap();
}

#[tokio::test]
async fn duplicate_and_unresolved_names_are_invalid_data() {
    let Some(pool) = connect().await else { return };
    let store = PgProductStore::new(pool);
    reset(&store, &["90000002", "90000003"]).await;

    store.create_product(&product("90000002", "Oat bran")).await.unwrap();
    assert!(matches!(
        store.create_product(&product("90000002", "Oat bran")).await,
        Err(StoreError::InvalidData(_))
    ));

    let mut bad_unit = product("90000003", "Spelt");
    bad_unit.nutrition.minerals[0].quantity.unit = "grain".into();
    assert!(matches!(
        store.create_product(&bad_unit).await,
        Err(StoreError::InvalidData(_))
    ));
    // The failed transaction must not leave a product row behind.
    assert_eq!(store.get_product("90000003").await, Err(StoreError::NotFound));

    reset(&store, &["90000002"]).await;
}

#[tokio::test]
async fn update_replaces_children_and_requires_existence() {
    let Some(pool) = connect().await else { return };
    let store = PgProductStore::new(pool);
    reset(&store, &["90000004", "90000005"]).await;

    assert_eq!(
        store.update_product(&product("90000005", "Ghost")).await,
        Err(StoreError::DoesNotExist)
    );
    assert_eq!(store.get_product("90000005").await, Err(StoreError::NotFound));

    store.create_product(&product("90000004", "Muesli")).await.unwrap();
    let mut changed = product("90000004", "Muesli crunchy");
    changed.packaging = Quantity::new(750.0, "g");
    changed.nutrition.vitamins.clear();
    changed.nutrition.nutrients.reverse();
    store.update_product(&changed).await.unwrap();

    assert_eq!(store.get_product("90000004").await.unwrap(), changed);
    reset(&store, &["90000004"]).await;
}

#[tokio::test]
async fn delete_cascades_and_reports_missing() {
    let Some(pool) = connect().await else { return };
    let store = PgProductStore::new(pool.clone());
    reset(&store, &["90000006"]).await;

    store.create_product(&product("90000006", "Barley")).await.unwrap();
    store.delete_product("90000006").await.unwrap();

    let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM nutrient WHERE ean = $1")
        .bind("90000006")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(orphans, 0);
    assert_eq!(store.delete_product("90000006").await, Err(StoreError::DoesNotExist));
}

#[tokio::test]
async fn search_matches_substring_case_insensitively() {
    let Some(pool) = connect().await else { return };
    let store = PgProductStore::new(pool);
    let eans = ["90000007", "90000008", "90000009"];
    reset(&store, &eans).await;

    store.create_product(&product("90000007", "Zqx_Crisp 100% rye")).await.unwrap();
    store.create_product(&product("90000008", "zqxcrisp wheat")).await.unwrap();
    store.create_product(&product("90000009", "ZQX_CRISP spelt")).await.unwrap();

    let found = store.search_products("zqx_crisp", 15).await.unwrap();
    let names: Vec<&str> = found.iter().map(|p| p.name.as_str()).collect();
    // `_` is matched literally, so "zqxcrisp" is not a hit.
    assert_eq!(names, vec!["Zqx_Crisp 100% rye", "ZQX_CRISP spelt"]);

    assert_eq!(store.search_products("zqx_crisp", 1).await.unwrap().len(), 1);
    assert!(store.search_products("100%%", 15).await.unwrap().is_empty());

    reset(&store, &eans).await;
}

#[tokio::test]
async fn incomplete_products_are_hidden_from_get_and_search() {
    let Some(pool) = connect().await else { return };
    let store = PgProductStore::new(pool.clone());
    reset(&store, &["90000010", "90000011"]).await;

    // A product row with no packaging, nutrition or children.
    sqlx::query("INSERT INTO product (ean, name) VALUES ($1, $2)")
        .bind("90000010")
        .bind("Zqy bare")
        .execute(&pool)
        .await
        .unwrap();
    store.create_product(&product("90000011", "Zqy full")).await.unwrap();

    assert_eq!(store.get_product("90000010").await, Err(StoreError::NotFound));
    let found = store.search_products("zqy", 15).await.unwrap();
    let eans: Vec<&str> = found.iter().map(|p| p.ean.as_str()).collect();
    assert_eq!(eans, vec!["90000011"]);

    reset(&store, &["90000010", "90000011"]).await;
}

#[tokio::test]
async fn unstorable_text_is_invalid_data() {
    let Some(pool) = connect().await else { return };
    let store = PgProductStore::new(pool);
    reset(&store, &["90000012"]).await;

    // Postgres text cannot hold NUL; the server rejects it with SQLSTATE 22021.
    assert!(matches!(
        store.create_product(&product("90000012", "Rye\u{0}flakes")).await,
        Err(StoreError::InvalidData(_))
    ));
    assert_eq!(store.get_product("90000012").await, Err(StoreError::NotFound));
}

#[tokio::test]
async fn vocabularies_are_seeded_in_order() {
    let Some(pool) = connect().await else { return };
    let vocabulary = PgVocabularyStore::new(pool);

    let units = vocabulary.get_units().await.unwrap();
    assert_eq!(&units[..3], &["g", "mg", "ug"]);
    assert!(vocabulary.get_nutrient_types().await.unwrap().contains(&"PROTEIN".to_string()));
    assert!(vocabulary.get_vitamin_types().await.unwrap().contains(&"B12".to_string()));
    assert!(vocabulary.get_mineral_types().await.unwrap().contains(&"ZINC".to_string()));
}

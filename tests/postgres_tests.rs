//! PostgreSQL book store tests
//!
//! Need a reachable server: DATABASE_URL=postgres://... cargo test -- --ignored

use book_registry::{
    config::DatabaseConfig,
    error::AppError,
    models::RegisterBook,
    repository::{BookStore, PgBookStore},
};

async fn store() -> PgBookStore {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at PostgreSQL");
    assert!(url.starts_with("postgres"), "DATABASE_URL is not a PostgreSQL URL");
    let config = DatabaseConfig {
        url,
        max_connections: 4,
        min_connections: 1,
    };
    let store = PgBookStore::connect(&config)
        .await
        .expect("Failed to connect to PostgreSQL");
    store.ensure_schema().await.expect("Failed to create books table");
    store
}

/// BN ID not used by earlier runs against the same database
fn fresh_bn_id(tag: &str) -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("PG-{}-{}", tag, nanos)
}

fn book(bn_id: &str) -> RegisterBook {
    RegisterBook {
        title: "Dune".to_string(),
        author: "Herbert".to_string(),
        publisher: "Ace".to_string(),
        bn_id: bn_id.to_string(),
        genre: "SciFi".to_string(),
        language: "English".to_string(),
    }
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_pg_insert_returning_row() {
    let store = store().await;
    let bn_id = fresh_bn_id("insert");

    let created = store.insert(&book(&bn_id)).await.unwrap();
    assert!(created.id > 0);
    assert_eq!(created.bn_id, bn_id);
    assert_eq!(created.title, "Dune");

    let found = store.find_by_bn_id(&bn_id).await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.created_at, created.created_at);
}

#[tokio::test]
#[ignore]
async fn test_pg_unique_constraint_rolls_back() {
    let store = store().await;
    let bn_id = fresh_bn_id("unique");
    store.insert(&book(&bn_id)).await.unwrap();
    let before = store.count().await.unwrap();

    match store.insert(&book(&bn_id)).await {
        Err(AppError::Storage(sqlx::Error::Database(e))) => assert!(e.is_unique_violation()),
        other => panic!("expected a unique violation, got {:?}", other.map(|b| b.id)),
    }
    assert_eq!(store.count().await.unwrap(), before);
    store.ping().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_pg_list_newest_first() {
    let store = store().await;
    let first = store.insert(&book(&fresh_bn_id("first"))).await.unwrap();
    let second = store.insert(&book(&fresh_bn_id("second"))).await.unwrap();

    let books = store.list_all().await.unwrap();
    let ids: Vec<i64> = books.iter().map(|b| b.id).collect();
    assert!(ids.windows(2).all(|w| w[0] > w[1]));
    let pos_first = ids.iter().position(|id| *id == first.id).unwrap();
    let pos_second = ids.iter().position(|id| *id == second.id).unwrap();
    assert!(pos_second < pos_first);
}

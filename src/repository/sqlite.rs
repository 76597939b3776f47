//! SQLite book store, the local fallback when no database URL is configured

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use super::{insert_sql, list_all_sql, select_by_bn_id_sql, BookStore, COUNT_SQL};
use crate::{
    config::DatabaseConfig,
    error::AppResult,
    models::book::{Book, RegisterBook},
};

// SQLite does not enforce VARCHAR lengths; RegisterBook validation does.
const CREATE_BOOKS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS books (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title VARCHAR(255) NOT NULL,
        author VARCHAR(100) NOT NULL,
        publisher VARCHAR(100) NOT NULL,
        bn_id VARCHAR(50) NOT NULL UNIQUE,
        genre VARCHAR(50) NOT NULL,
        language VARCHAR(100) NOT NULL,
        created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
    )
"#;

const BUSY_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct SqliteBookStore {
    pool: SqlitePool,
}

impl SqliteBookStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        // Every connection to `:memory:` opens its own database
        let max_connections = if config.url.contains(":memory:") {
            1
        } else {
            config.max_connections
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(config.min_connections.min(max_connections))
            .connect_with(options)
            .await?;
        Ok(Self::new(pool))
    }

    /// Private in-memory database with the schema already created
    pub async fn in_memory() -> AppResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?)
            .await?;
        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }
}

#[async_trait]
impl BookStore for SqliteBookStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    async fn ensure_schema(&self) -> AppResult<()> {
        sqlx::query(CREATE_BOOKS_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    async fn find_by_bn_id(&self, bn_id: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&select_by_bn_id_sql())
            .bind(bn_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn insert(&self, data: &RegisterBook) -> AppResult<Book> {
        let sql = insert_sql();
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, Book>(&sql)
            .bind(&data.title)
            .bind(&data.author)
            .bind(&data.publisher)
            .bind(&data.bn_id)
            .bind(&data.genre)
            .bind(&data.language)
            .fetch_one(&mut *tx)
            .await;

        match inserted {
            Ok(book) => {
                tx.commit().await?;
                Ok(book)
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::warn!("Rollback failed after insert error: {}", rollback);
                }
                Err(e.into())
            }
        }
    }

    async fn list_all(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(&list_all_sql())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(COUNT_SQL).fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    async fn test_insert_assigns_id_and_timestamp() {
        let store = SqliteBookStore::in_memory().await.unwrap();
        let before = chrono::Utc::now() - chrono::Duration::seconds(5);

        let created = store.insert(&book("BN001")).await.unwrap();
        assert!(created.id > 0);
        assert!(created.created_at >= before);
        assert_eq!(created.bn_id, "BN001");

        let found = store.find_by_bn_id("BN001").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
    }

    #[tokio::test]
    async fn test_unique_constraint_enforced_by_storage() {
        let store = SqliteBookStore::in_memory().await.unwrap();
        store.insert(&book("BN001")).await.unwrap();

        match store.insert(&book("BN001")).await {
            Err(crate::error::AppError::Storage(sqlx::Error::Database(e))) => {
                assert!(e.is_unique_violation())
            }
            other => panic!("expected a unique violation, got {:?}", other.map(|b| b.id)),
        }
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let store = SqliteBookStore::in_memory().await.unwrap();
        for bn_id in ["BN001", "BN002", "BN003"] {
            store.insert(&book(bn_id)).await.unwrap();
        }

        let books = store.list_all().await.unwrap();
        let ids: Vec<&str> = books.iter().map(|b| b.bn_id.as_str()).collect();
        assert_eq!(ids, vec!["BN003", "BN002", "BN001"]);
    }
}

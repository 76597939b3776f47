//! PostgreSQL book store

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};

use super::{insert_sql, list_all_sql, select_by_bn_id_sql, BookStore, COUNT_SQL};
use crate::{
    config::DatabaseConfig,
    error::AppResult,
    models::book::{Book, RegisterBook},
};

const CREATE_BOOKS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS books (
        id BIGSERIAL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        author VARCHAR(100) NOT NULL,
        publisher VARCHAR(100) NOT NULL,
        bn_id VARCHAR(50) NOT NULL UNIQUE,
        genre VARCHAR(50) NOT NULL,
        language VARCHAR(100) NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

#[derive(Clone)]
pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect(&config.url)
            .await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    fn backend(&self) -> &'static str {
        "postgres"
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

//! Repository layer for database operations

pub mod postgres;
pub mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
    models::book::{Book, RegisterBook},
};

pub use postgres::PgBookStore;
pub use sqlite::SqliteBookStore;

const BOOK_COLUMNS: &str = "id, title, author, publisher, bn_id, genre, language, created_at";

pub(crate) fn select_by_bn_id_sql() -> String {
    format!("SELECT {} FROM books WHERE bn_id = $1", BOOK_COLUMNS)
}

pub(crate) fn list_all_sql() -> String {
    format!("SELECT {} FROM books ORDER BY id DESC", BOOK_COLUMNS)
}

pub(crate) fn insert_sql() -> String {
    format!(
        r#"
        INSERT INTO books (title, author, publisher, bn_id, genre, language)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {}
        "#,
        BOOK_COLUMNS
    )
}

pub(crate) const COUNT_SQL: &str = "SELECT COUNT(*) FROM books";

/// Persistence operations on the `books` table.
///
/// `bn_id` carries a UNIQUE constraint in every backend; `insert` must fail
/// with `AppError::Storage` when it is violated.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Backend name, for logs
    fn backend(&self) -> &'static str;

    /// Create the `books` table if it does not exist
    async fn ensure_schema(&self) -> AppResult<()>;

    async fn find_by_bn_id(&self, bn_id: &str) -> AppResult<Option<Book>>;

    /// Insert one book inside a transaction, rolled back on any failure
    async fn insert(&self, data: &RegisterBook) -> AppResult<Book>;

    /// All books, newest id first
    async fn list_all(&self) -> AppResult<Vec<Book>>;

    async fn count(&self) -> AppResult<i64>;

    /// Round-trip to the database (readiness check)
    async fn ping(&self) -> AppResult<()>;

    async fn close(&self);
}

/// Main repository struct holding the book store
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    pub fn new(books: Arc<dyn BookStore>) -> Self {
        Self { books }
    }

    /// Open the store named by the connection string and bootstrap its schema
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let books: Arc<dyn BookStore> = if is_postgres_url(&config.url) {
            Arc::new(PgBookStore::connect(config).await?)
        } else if config.url.starts_with("sqlite:") {
            Arc::new(SqliteBookStore::connect(config).await?)
        } else {
            return Err(AppError::Config(format!(
                "Unsupported database URL scheme: {}",
                redact_url(&config.url)
            )));
        };

        books.ensure_schema().await?;
        tracing::info!("Book store ready ({})", books.backend());

        Ok(Self::new(books))
    }
}

fn is_postgres_url(url: &str) -> bool {
    url.starts_with("postgres://") || url.starts_with("postgresql://")
}

/// Keep only the scheme of a connection string (it may carry credentials)
fn redact_url(url: &str) -> &str {
    url.split_once(':').map(|(scheme, _)| scheme).unwrap_or("<empty>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_schemes() {
        assert!(is_postgres_url("postgres://u:p@localhost/books"));
        assert!(is_postgres_url("postgresql://u:p@localhost/books"));
        assert!(!is_postgres_url("sqlite://books.db"));
    }

    #[test]
    fn test_redact_url() {
        assert_eq!(redact_url("mysql://root:secret@db/books"), "mysql");
        assert_eq!(redact_url("books.db"), "<empty>");
    }

    #[tokio::test]
    async fn test_unsupported_scheme() {
        let config = DatabaseConfig {
            url: "mysql://root:secret@db/books".to_string(),
            ..DatabaseConfig::default()
        };
        match Repository::connect(&config).await {
            Err(AppError::Config(msg)) => assert!(!msg.contains("secret")),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("mysql should be rejected"),
        }
    }
}

//! Book registration and listing service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, RegisterBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new book.
    ///
    /// The BN ID lookup only short-circuits the common duplicate case. Two
    /// concurrent registrations can both pass it; the UNIQUE constraint on
    /// `books.bn_id` then makes the second insert fail as `AppError::Storage`.
    pub async fn register(&self, data: &RegisterBook) -> AppResult<Book> {
        data.validate()?;

        if self.repository.books.find_by_bn_id(&data.bn_id).await?.is_some() {
            tracing::warn!("Registration rejected: BN ID {} already exists", data.bn_id);
            return Err(AppError::DuplicateKey {
                bn_id: data.bn_id.clone(),
            });
        }

        match self.repository.books.insert(data).await {
            Ok(book) => {
                tracing::info!("Registered book id={} bn_id={}", book.id, book.bn_id);
                Ok(book)
            }
            Err(e) => {
                tracing::error!("Registration of BN ID {} rolled back: {}", data.bn_id, e);
                Err(e)
            }
        }
    }

    /// Every registered book, most recent first
    pub async fn list_all(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list_all().await
    }

    /// Number of registered books, logged at startup
    pub async fn count(&self) -> AppResult<i64> {
        self.repository.books.count().await
    }

    /// Check that the database answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.books.ping().await
    }
}

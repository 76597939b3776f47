//! Book model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// System-assigned book identifier
pub type BookId = i64;

/// Registered book record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    #[schema(value_type = i64)]
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub publisher: String,
    /// BN ID number, unique across all books
    pub bn_id: String,
    pub genre: String,
    pub language: String,
    /// Set by the database when the row is inserted
    pub created_at: DateTime<Utc>,
}

/// Book registration request, posted by the form or the JSON API.
///
/// Missing fields deserialize as empty strings so that they are reported
/// by validation rather than by the extractor.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct RegisterBook {
    #[validate(length(min = 1, max = 255, message = "Title is required (at most 255 characters)"))]
    pub title: String,
    #[validate(length(min = 1, max = 100, message = "Author is required (at most 100 characters)"))]
    pub author: String,
    #[validate(length(min = 1, max = 100, message = "Publisher is required (at most 100 characters)"))]
    pub publisher: String,
    #[validate(length(min = 1, max = 50, message = "BN ID is required (at most 50 characters)"))]
    pub bn_id: String,
    #[validate(length(min = 1, max = 50, message = "Genre is required (at most 50 characters)"))]
    pub genre: String,
    #[validate(length(min = 1, max = 100, message = "Language is required (at most 100 characters)"))]
    pub language: String,
}

/// Book list response
#[derive(Debug, Serialize, ToSchema)]
pub struct BookList {
    pub books: Vec<Book>,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> RegisterBook {
        RegisterBook {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            publisher: "Ace".to_string(),
            bn_id: "BN001".to_string(),
            genre: "SciFi".to_string(),
            language: "English".to_string(),
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(dune().validate().is_ok());
    }

    #[test]
    fn test_empty_field_rejected() {
        let book = RegisterBook { publisher: String::new(), ..dune() };
        let errors = book.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("publisher"));
    }

    #[test]
    fn test_length_limits() {
        let at_limit = RegisterBook { bn_id: "x".repeat(50), ..dune() };
        assert!(at_limit.validate().is_ok());

        let over = RegisterBook { bn_id: "x".repeat(51), title: "t".repeat(256), ..dune() };
        let errors = over.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("bn_id"));
        assert!(fields.contains_key("title"));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let book: RegisterBook = serde_json::from_str(r#"{"title": "Dune"}"#).unwrap();
        assert_eq!(book.title, "Dune");
        assert!(book.author.is_empty());
        assert!(book.validate().is_err());
    }
}

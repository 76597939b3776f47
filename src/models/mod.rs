//! Data models for the book registry

pub mod book;

pub use book::{Book, BookId, BookList, RegisterBook};

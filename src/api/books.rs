//! Book API endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::book::{Book, BookList, RegisterBook},
    AppState,
};

/// List all books, most recently registered first
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "Book list", body = BookList)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<BookList>> {
    let books = state.services.books.list_all().await?;
    let total = books.len() as i64;
    Ok(Json(BookList { books, total }))
}

/// Register a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = RegisterBook,
    responses(
        (status = 201, description = "Book registered", body = Book),
        (status = 400, description = "Invalid field", body = crate::error::ErrorResponse),
        (status = 409, description = "BN ID already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn register_book(
    State(state): State<AppState>,
    Json(data): Json<RegisterBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.services.books.register(&data).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

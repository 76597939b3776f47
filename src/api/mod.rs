//! HTTP handlers and routing

pub mod books;
pub mod health;
pub mod openapi;
pub mod pages;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/books", get(books::list_books).post(books::register_book))
        .layer(cors);

    let pages = Router::new()
        .route("/", get(pages::home))
        .route("/register_book", post(pages::register_book))
        .route("/success", get(pages::success))
        .route("/books", get(pages::view_books));

    Router::new()
        .merge(pages)
        .nest("/api/v1", api_v1)
        .with_state(state)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
}

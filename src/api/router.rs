use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_book, delete_book, get_author, get_book, list_authors, list_books,
    search_books, update_book,
};

/// Creates the API router with all catalog endpoints
///
/// Book endpoints:
/// - POST   /api/v1/books          - Create a book
/// - GET    /api/v1/books          - List the whole catalog
/// - GET    /api/v1/books/search   - Search by title and/or author
/// - GET    /api/v1/books/:isbn    - Get a book
/// - PUT    /api/v1/books/:isbn    - Update a book
/// - DELETE /api/v1/books/:isbn    - Remove a book (ADMIN only)
///
/// Author endpoints (read-only):
/// - GET    /api/v1/authors        - List authors, optionally filtered by name
/// - GET    /api/v1/authors/:id    - Get an author
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/api/v1/books", post(create_book).get(list_books))
        .route("/api/v1/books/search", get(search_books))
        .route(
            "/api/v1/books/:isbn",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/api/v1/authors", get(list_authors))
        .route("/api/v1/authors/:id", get(get_author))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

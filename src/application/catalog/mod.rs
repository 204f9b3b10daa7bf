mod author_queries;
mod author_resolver;
mod catalog_service;
mod errors;

pub use author_queries::{find_all_authors, find_author_by_id, find_authors_by_name};
pub use author_resolver::resolve_authors;
pub use catalog_service::{
    ServiceDependencies, add_book, delete_book, find_all_books, find_book_by_isbn, search_books,
    update_book,
};
pub use errors::{CatalogError, Result};

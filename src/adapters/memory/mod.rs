pub mod author_repository;
pub mod book_repository;
pub mod credential_provider;

pub use author_repository::AuthorRepository as InMemoryAuthorRepository;
pub use book_repository::BookRepository as InMemoryBookRepository;
pub use credential_provider::CredentialProvider as StaticCredentialProvider;

/// ロックが毒されていた場合のエラー
pub(crate) fn poisoned<T>(
    err: std::sync::PoisonError<T>,
) -> Box<dyn std::error::Error + Send + Sync> {
    format!("in-memory store lock poisoned: {}", err).into()
}

pub mod author_repository;
pub mod book_repository;
pub mod clock;
pub mod credential_provider;

pub use author_repository::AuthorRepository;
pub use book_repository::BookRepository;
pub use clock::Clock;
pub use credential_provider::{CredentialProvider, Principal, Role};

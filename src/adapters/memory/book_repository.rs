use crate::domain::book::has_matching_author;
use crate::domain::{Author, Book, Isbn};
use crate::ports::book_repository::{BookRepository as BookRepositoryTrait, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use super::author_repository::{AuthorRepository, register_missing};
use super::poisoned;

/// BookRepositoryのインメモリ実装
///
/// データベースなしでの起動とテストに使う。ISBN順に返す。
/// 著者は共有するインメモリの`AuthorRepository`に書き込む。
/// ロックは常に書籍、著者の順に取る。
pub struct BookRepository {
    books: Mutex<BTreeMap<Isbn, Book>>,
    authors: Arc<AuthorRepository>,
}

impl BookRepository {
    pub fn new(authors: Arc<AuthorRepository>) -> Self {
        Self {
            books: Mutex::new(BTreeMap::new()),
            authors,
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl BookRepositoryTrait for BookRepository {
    async fn find_by_isbn(&self, isbn: &Isbn) -> Result<Option<Book>> {
        let books = self.books.lock().map_err(poisoned)?;
        Ok(books.get(isbn).cloned())
    }

    async fn insert(&self, book: Book) -> Result<Option<Book>> {
        let mut books = self.books.lock().map_err(poisoned)?;
        if books.contains_key(&book.isbn) {
            return Ok(None);
        }

        let mut authors = self.authors.lock()?;
        register_missing(&mut authors, &book.authors);
        books.insert(book.isbn.clone(), book.clone());
        Ok(Some(book))
    }

    async fn save(&self, book: Book) -> Result<Book> {
        let mut books = self.books.lock().map_err(poisoned)?;
        let mut authors = self.authors.lock()?;
        register_missing(&mut authors, &book.authors);
        books.insert(book.isbn.clone(), book.clone());
        Ok(book)
    }

    async fn delete_by_isbn(&self, isbn: &Isbn) -> Result<()> {
        let mut books = self.books.lock().map_err(poisoned)?;
        books.remove(isbn);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Book>> {
        let books = self.books.lock().map_err(poisoned)?;
        Ok(books.values().cloned().collect())
    }

    /// 著者条件は、名前が一致する著者を候補として集め、
    /// 候補と著者IDを共有する書籍を返す。
    async fn search(&self, title: Option<&str>, author: Option<&str>) -> Result<Vec<Book>> {
        let books = self.books.lock().map_err(poisoned)?;

        let candidates: Option<Vec<Author>> = author.map(|needle| {
            books
                .values()
                .flat_map(|b| b.authors.iter())
                .filter(|a| contains_ignore_case(&a.name, needle))
                .cloned()
                .collect()
        });

        Ok(books
            .values()
            .filter(|b| title.is_none_or(|t| contains_ignore_case(&b.title, t)))
            .filter(|b| {
                candidates
                    .as_deref()
                    .is_none_or(|c| has_matching_author(&b.authors, c))
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthorId, AuthorSet};
    use crate::ports::AuthorRepository as _;

    fn book(isbn: &str, title: &str, authors: &[&str]) -> Book {
        Book {
            isbn: Isbn::new(isbn),
            title: title.to_string(),
            year: 2020,
            price: 10.0,
            genre: "Fiction".to_string(),
            authors: authors
                .iter()
                .map(|name| Author {
                    id: AuthorId::new(),
                    name: name.to_string(),
                    birthday: None,
                })
                .collect::<AuthorSet>(),
        }
    }

    fn empty() -> BookRepository {
        BookRepository::new(Arc::new(AuthorRepository::new()))
    }

    async fn seeded() -> BookRepository {
        let repo = empty();
        repo.save(book("1111111111", "Test Book", &["Alice Walker"]))
            .await
            .unwrap();
        repo.save(book("2222222222", "Another TEST BOOK", &["Bob Dylan"]))
            .await
            .unwrap();
        repo.save(book("3333333333", "Poems", &["Alice Munro", "Bob Marley"]))
            .await
            .unwrap();
        repo
    }

    #[tokio::test]
    async fn test_search_by_title_ignores_case() {
        let repo = seeded().await;

        let found = repo.search(Some("test book"), None).await.unwrap();

        let isbns: Vec<_> = found.iter().map(|b| b.isbn.as_str()).collect();
        assert_eq!(isbns, vec!["1111111111", "2222222222"]);
    }

    #[tokio::test]
    async fn test_search_by_author() {
        let repo = seeded().await;

        let found = repo.search(None, Some("alice")).await.unwrap();

        let isbns: Vec<_> = found.iter().map(|b| b.isbn.as_str()).collect();
        assert_eq!(isbns, vec!["1111111111", "3333333333"]);
    }

    #[tokio::test]
    async fn test_search_combines_filters_with_and() {
        let repo = seeded().await;

        let found = repo.search(Some("book"), Some("bob")).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].isbn, Isbn::new("2222222222"));
    }

    #[tokio::test]
    async fn test_search_by_author_skips_books_without_authors() {
        let repo = empty();
        repo.save(book("4444444444", "Anonymous", &[])).await.unwrap();

        assert!(repo.search(None, Some("")).await.unwrap().is_empty());
        assert_eq!(repo.search(None, None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_by_isbn() {
        let repo = seeded().await;

        repo.delete_by_isbn(&Isbn::new("1111111111")).await.unwrap();

        assert!(repo
            .find_by_isbn(&Isbn::new("1111111111"))
            .await
            .unwrap()
            .is_none());
        assert_eq!(repo.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_isbn() {
        let repo = empty();
        let first = book("1234567890", "First", &["Alice Walker"]);
        let second = book("1234567890", "Second", &["Bob Dylan"]);

        assert_eq!(repo.insert(first.clone()).await.unwrap(), Some(first));
        assert_eq!(repo.insert(second).await.unwrap(), None);

        let stored = repo.find_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "First");
        // 拒否された書籍の著者は保存されない
        assert_eq!(repo.authors.count(), 1);
    }

    #[tokio::test]
    async fn test_save_stores_new_authors_once() {
        let repo = empty();
        let original = book("1234567890", "Test Book", &["Alice Walker"]);
        repo.save(original.clone()).await.unwrap();

        let mut updated = original.clone();
        updated.title = "Updated".to_string();
        repo.save(updated).await.unwrap();

        assert_eq!(repo.authors.count(), 1);
        let author_id = original.authors.ids()[0];
        assert!(repo.authors.find_by_id(author_id).await.unwrap().is_some());
    }
}

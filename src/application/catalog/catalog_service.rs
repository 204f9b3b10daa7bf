use crate::domain::{self, AddBook, Book, Isbn, UpdateBook};
use crate::ports::*;
use std::sync::Arc;

use super::author_resolver::resolve_authors;
use super::errors::{CatalogError, Result};

/// サービスの依存関係
///
/// 振る舞いは持たず、各操作の関数に引数として渡す。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub book_repository: Arc<dyn BookRepository>,
    pub author_repository: Arc<dyn AuthorRepository>,
    pub clock: Arc<dyn Clock>,
}

/// ISBNで書籍を取得し、存在しなければNotFoundとするヘルパー関数
///
/// update, delete, find で共通利用される。
async fn load_book(book_repository: &Arc<dyn BookRepository>, isbn: &Isbn) -> Result<Book> {
    book_repository
        .find_by_isbn(isbn)
        .await
        .map_err(CatalogError::RepositoryError)?
        .ok_or_else(|| {
            tracing::warn!("Book with ISBN {} not found", isbn);
            CatalogError::NotFound(format!("Book with ISBN: {} not found", isbn))
        })
}

/// 書籍を追加する
///
/// ビジネスルール：
/// - ISBNの書式と出版年の範囲を満たすこと
/// - 同じISBNの書籍が存在しないこと
/// - 著者は記述子ごとに新規作成される
///
/// # 戻り値
/// 保存された書籍
pub async fn add_book(deps: &ServiceDependencies, cmd: AddBook) -> Result<Book> {
    tracing::info!("Adding new book with ISBN: {}", cmd.isbn);

    let result = execute_add_book(deps, &cmd).await;
    if let Err(e) = &result {
        tracing::error!("Error adding book {}: {}", cmd.isbn, e);
    }
    result
}

fn already_exists(isbn: &Isbn) -> CatalogError {
    tracing::warn!("Book with ISBN {} already exists", isbn);
    CatalogError::AlreadyExists(format!("Book with ISBN {} already exists.", isbn))
}

async fn execute_add_book(deps: &ServiceDependencies, cmd: &AddBook) -> Result<Book> {
    // 1. 入力の検証
    domain::validation::validate_new_book(cmd, deps.clock.current_year())?;

    // 2. ISBNの重複確認
    let existing = deps
        .book_repository
        .find_by_isbn(&cmd.isbn)
        .await
        .map_err(CatalogError::RepositoryError)?;

    if existing.is_some() {
        return Err(already_exists(&cmd.isbn));
    }

    // 3. 著者の解決（保存は書籍と一緒に行う）
    let authors = resolve_authors(&cmd.authors);

    // 4. ドメイン層の純粋関数で集約を組み立てる
    let book = domain::book::build_book(cmd, authors);

    // 5. 保存。確認の後に同じISBNが追加されていた場合もここで拒否される
    deps.book_repository
        .insert(book)
        .await
        .map_err(CatalogError::RepositoryError)?
        .ok_or_else(|| already_exists(&cmd.isbn))
}

/// 書籍の内容を置き換える
///
/// ビジネスルール：
/// - 書籍が存在すること
/// - `authors`が指定された場合のみ著者を置き換える（記述子ごとに新規作成）
/// - ISBNは変更されない
///
/// 追加時の検証（ISBNの書式・出版年の範囲）は更新時には行わない。
pub async fn update_book(deps: &ServiceDependencies, isbn: &Isbn, cmd: UpdateBook) -> Result<Book> {
    tracing::info!("Updating book with ISBN: {}", isbn);

    let result = execute_update_book(deps, isbn, &cmd).await;
    if let Err(e) = &result {
        tracing::error!("Error updating book {}: {}", isbn, e);
    }
    result
}

async fn execute_update_book(
    deps: &ServiceDependencies,
    isbn: &Isbn,
    cmd: &UpdateBook,
) -> Result<Book> {
    // 1. 既存の書籍を取得
    let existing = load_book(&deps.book_repository, isbn).await?;

    // 2. 指定された場合のみ著者を解決
    let authors = cmd.authors.as_deref().map(resolve_authors);

    // 3. ドメイン層の純粋関数で更新を適用
    let updated = domain::book::apply_update(existing, cmd, authors);

    // 4. 保存（新しい著者も同じ呼び出しで保存される）
    deps.book_repository
        .save(updated)
        .await
        .map_err(CatalogError::RepositoryError)
}

/// 書籍を削除する
///
/// 著者は削除されない。権限の確認は境界層で済んでいること。
pub async fn delete_book(deps: &ServiceDependencies, isbn: &Isbn) -> Result<()> {
    tracing::info!("Deleting book with ISBN: {}", isbn);

    load_book(&deps.book_repository, isbn).await?;

    deps.book_repository
        .delete_by_isbn(isbn)
        .await
        .map_err(|e| {
            tracing::error!("Error deleting book {}: {}", isbn, e);
            CatalogError::RepositoryError(e)
        })
}

/// ISBNで書籍を取得する
pub async fn find_book_by_isbn(deps: &ServiceDependencies, isbn: &Isbn) -> Result<Book> {
    tracing::info!("Finding book with ISBN: {}", isbn);

    load_book(&deps.book_repository, isbn).await
}

/// タイトル・著者名で書籍を検索する
///
/// どちらも大文字小文字を区別しない部分一致。両方指定された場合はAND条件。
/// 結果が空の場合はNotFound。
pub async fn search_books(
    deps: &ServiceDependencies,
    title: Option<&str>,
    author: Option<&str>,
) -> Result<Vec<Book>> {
    tracing::info!(
        "Searching for books with title: {:?} and author: {:?}",
        title,
        author
    );

    let books = deps
        .book_repository
        .search(title, author)
        .await
        .map_err(CatalogError::RepositoryError)?;

    if books.is_empty() {
        return Err(CatalogError::NotFound(format!(
            "No books found with title containing '{}' and author containing '{}'",
            title.unwrap_or_default(),
            author.unwrap_or_default()
        )));
    }

    Ok(books)
}

/// すべての書籍を取得する
///
/// カタログが空の場合はNotFound。
pub async fn find_all_books(deps: &ServiceDependencies) -> Result<Vec<Book>> {
    tracing::info!("Fetching all books");

    let books = deps
        .book_repository
        .find_all()
        .await
        .map_err(CatalogError::RepositoryError)?;

    if books.is_empty() {
        return Err(CatalogError::NotFound(
            "No books found in the system".to_string(),
        ));
    }

    Ok(books)
}

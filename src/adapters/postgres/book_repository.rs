use crate::domain::{AuthorSet, Book, Isbn};
use crate::ports::book_repository::{BookRepository as BookRepositoryTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, Transaction, postgres::PgRow};
use std::collections::HashMap;
use uuid::Uuid;

use super::author_repository::map_row_to_author;
use super::escape_like;

/// 書籍行（著者を除く）をBookに変換する
fn map_row_to_book(row: &PgRow, authors: AuthorSet) -> Book {
    Book {
        isbn: Isbn::new(row.get::<String, _>("isbn")),
        title: row.get("title"),
        year: row.get("year"),
        price: row.get("price"),
        genre: row.get("genre"),
        authors,
    }
}

/// BookRepositoryのPostgreSQL実装
///
/// 書籍と著者の関連は`book_authors`結合テーブルで明示的に管理する。
/// 書籍の削除は関連行のみを消し、著者は残す。
pub struct BookRepository {
    pool: PgPool,
}

impl BookRepository {
    /// PostgreSQLコネクションプールから新しいBookRepositoryを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 指定した書籍群の著者をまとめて読み込む
    async fn load_authors(&self, isbns: &[String]) -> Result<HashMap<String, AuthorSet>> {
        let mut by_isbn: HashMap<String, AuthorSet> = HashMap::new();
        if isbns.is_empty() {
            return Ok(by_isbn);
        }

        let rows = sqlx::query(
            r#"
            SELECT ba.book_isbn, a.id, a.name, a.birthday
            FROM book_authors ba
            JOIN authors a ON a.id = ba.author_id
            WHERE ba.book_isbn = ANY($1::text[])
            ORDER BY a.created_at ASC, a.id ASC
            "#,
        )
        .bind(isbns)
        .fetch_all(&self.pool)
        .await?;

        for row in &rows {
            let isbn: String = row.get("book_isbn");
            by_isbn
                .entry(isbn)
                .or_default()
                .insert(map_row_to_author(row));
        }

        Ok(by_isbn)
    }

    /// 書籍行に著者を結び付けてBookのリストにする
    async fn assemble(&self, rows: Vec<PgRow>) -> Result<Vec<Book>> {
        let isbns: Vec<String> = rows.iter().map(|r| r.get("isbn")).collect();
        let mut authors = self.load_authors(&isbns).await?;

        Ok(rows
            .iter()
            .zip(isbns.iter())
            .map(|(row, isbn)| map_row_to_book(row, authors.remove(isbn).unwrap_or_default()))
            .collect())
    }
}

/// 未保存の著者を追加し、書籍と著者の関連行を置き換える
async fn write_authors_and_links(
    tx: &mut Transaction<'_, Postgres>,
    book: &Book,
) -> Result<()> {
    for author in &book.authors {
        sqlx::query(
            r#"
            INSERT INTO authors (id, name, birthday)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(author.id.value())
        .bind(&author.name)
        .bind(author.birthday)
        .execute(&mut **tx)
        .await?;
    }

    sqlx::query("DELETE FROM book_authors WHERE book_isbn = $1")
        .bind(book.isbn.as_str())
        .execute(&mut **tx)
        .await?;

    let author_ids: Vec<Uuid> = book.authors.iter().map(|a| a.id.value()).collect();
    if !author_ids.is_empty() {
        sqlx::query(
            r#"
            INSERT INTO book_authors (book_isbn, author_id)
            SELECT $1, * FROM UNNEST($2::uuid[])
            "#,
        )
        .bind(book.isbn.as_str())
        .bind(&author_ids)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

#[async_trait]
impl BookRepositoryTrait for BookRepository {
    async fn find_by_isbn(&self, isbn: &Isbn) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            SELECT isbn, title, year, price, genre
            FROM books
            WHERE isbn = $1
            "#,
        )
        .bind(isbn.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.assemble(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 書籍行のINSERTと著者・関連行の書き込みを1つのトランザクションで行う
    ///
    /// ISBNの一意制約違反は`Ok(None)`として返し、トランザクションは破棄される。
    async fn insert(&self, book: Book) -> Result<Option<Book>> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO books (isbn, title, year, price, genre)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(book.isbn.as_str())
        .bind(&book.title)
        .bind(book.year)
        .bind(book.price)
        .bind(&book.genre)
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {}
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => return Ok(None),
            Err(e) => return Err(e.into()),
        }

        write_authors_and_links(&mut tx, &book).await?;

        tx.commit().await?;
        Ok(Some(book))
    }

    /// 書籍行のupsertと著者・関連行の書き込みを1つのトランザクションで行う
    async fn save(&self, book: Book) -> Result<Book> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO books (isbn, title, year, price, genre)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (isbn)
            DO UPDATE SET
                title = EXCLUDED.title,
                year = EXCLUDED.year,
                price = EXCLUDED.price,
                genre = EXCLUDED.genre
            "#,
        )
        .bind(book.isbn.as_str())
        .bind(&book.title)
        .bind(book.year)
        .bind(book.price)
        .bind(&book.genre)
        .execute(&mut *tx)
        .await?;

        write_authors_and_links(&mut tx, &book).await?;

        tx.commit().await?;
        Ok(book)
    }

    async fn delete_by_isbn(&self, isbn: &Isbn) -> Result<()> {
        // book_authors は ON DELETE CASCADE、authors はそのまま残る
        sqlx::query("DELETE FROM books WHERE isbn = $1")
            .bind(isbn.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Book>> {
        let rows = sqlx::query(
            r#"
            SELECT isbn, title, year, price, genre
            FROM books
            ORDER BY isbn ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        self.assemble(rows).await
    }

    async fn search(&self, title: Option<&str>, author: Option<&str>) -> Result<Vec<Book>> {
        let rows = sqlx::query(
            r#"
            SELECT b.isbn, b.title, b.year, b.price, b.genre
            FROM books b
            WHERE ($1::text IS NULL OR b.title ILIKE '%' || $1 || '%' ESCAPE '\')
              AND ($2::text IS NULL OR EXISTS (
                    SELECT 1
                    FROM book_authors ba
                    JOIN authors a ON a.id = ba.author_id
                    WHERE ba.book_isbn = b.isbn
                      AND a.name ILIKE '%' || $2 || '%' ESCAPE '\'
              ))
            ORDER BY b.isbn ASC
            "#,
        )
        .bind(title.map(escape_like))
        .bind(author.map(escape_like))
        .fetch_all(&self.pool)
        .await?;

        self.assemble(rows).await
    }
}


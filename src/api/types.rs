use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::catalog::CatalogError;
use crate::domain::{AddBook, Author, AuthorDescriptor, Book, Isbn, UpdateBook};

// ============================================================================
// Requests
// ============================================================================

/// 著者の入力
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorRequest {
    pub name: Option<String>,
    pub birthday: Option<NaiveDate>,
}

/// 書籍作成リクエスト（POST /api/v1/books）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookRequest {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub year: Option<i32>,
    pub price: Option<f64>,
    pub genre: Option<String>,
    pub authors: Option<Vec<AuthorRequest>>,
}

/// 書籍更新リクエスト（PUT /api/v1/books/:isbn）
///
/// `authors`を省略すると既存の著者を変更しない。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub price: Option<f64>,
    pub genre: Option<String>,
    pub authors: Option<Vec<AuthorRequest>>,
}

/// 書籍検索のクエリパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct SearchBooksQuery {
    pub title: Option<String>,
    pub author: Option<String>,
}

/// 著者一覧のクエリパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct ListAuthorsQuery {
    pub name: Option<String>,
}

fn invalid(message: &str) -> CatalogError {
    CatalogError::InvalidInput(message.to_string())
}

fn required_text(value: Option<String>, message: &str) -> Result<String, CatalogError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| invalid(message))
}

fn required_year(value: Option<i32>) -> Result<i32, CatalogError> {
    match value {
        None => Err(invalid("Year is required")),
        Some(year) if year < 1 => Err(invalid("Year can not be less than 1")),
        Some(year) => Ok(year),
    }
}

fn required_price(value: Option<f64>) -> Result<f64, CatalogError> {
    match value {
        None => Err(invalid("Price is required")),
        Some(price) if price.is_nan() || price < 1.0 => {
            Err(invalid("Price can not be less than 1"))
        }
        Some(price) => Ok(price),
    }
}

fn to_descriptors(authors: Vec<AuthorRequest>) -> Result<Vec<AuthorDescriptor>, CatalogError> {
    authors
        .into_iter()
        .map(|a| {
            let name = required_text(a.name, "Author name is required")?;
            Ok(AuthorDescriptor::new(name, a.birthday))
        })
        .collect()
}

impl CreateBookRequest {
    /// 入力の形を検証してコマンドに変換する
    pub fn into_command(self) -> Result<AddBook, CatalogError> {
        let isbn = required_text(self.isbn, "ISBN is required")?;
        let title = required_text(self.title, "Title is required")?;
        let year = required_year(self.year)?;
        let price = required_price(self.price)?;
        let genre = required_text(self.genre, "Genre is required")?;
        let authors = self.authors.ok_or_else(|| invalid("Authors are required"))?;

        Ok(AddBook {
            isbn: Isbn::new(isbn),
            title,
            year,
            price,
            genre,
            authors: to_descriptors(authors)?,
        })
    }
}

impl UpdateBookRequest {
    /// 入力の形を検証してコマンドに変換する
    pub fn into_command(self) -> Result<UpdateBook, CatalogError> {
        let title = required_text(self.title, "Title is required")?;
        let year = required_year(self.year)?;
        let price = required_price(self.price)?;
        let genre = required_text(self.genre, "Genre is required")?;
        let authors = self.authors.map(to_descriptors).transpose()?;

        Ok(UpdateBook {
            title,
            year,
            price,
            genre,
            authors,
        })
    }
}

// ============================================================================
// Responses
// ============================================================================

/// 著者レスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub id: Uuid,
    pub name: String,
    pub birthday: Option<NaiveDate>,
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        Self {
            id: author.id.value(),
            name: author.name,
            birthday: author.birthday,
        }
    }
}

/// 書籍レスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookResponse {
    pub isbn: String,
    pub title: String,
    pub year: i32,
    pub price: f64,
    pub genre: String,
    pub authors: Vec<AuthorResponse>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            isbn: book.isbn.into_inner(),
            title: book.title,
            year: book.year,
            price: book.price,
            genre: book.genre,
            authors: book
                .authors
                .iter()
                .cloned()
                .map(AuthorResponse::from)
                .collect(),
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            status,
            error: error.into(),
            message: message.into(),
        }
    }
}

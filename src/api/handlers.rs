use crate::application::catalog::{
    ServiceDependencies, add_book as execute_add_book, delete_book as execute_delete_book,
    find_all_authors, find_all_books, find_author_by_id, find_authors_by_name, find_book_by_isbn,
    search_books as execute_search_books, update_book as execute_update_book,
};
use crate::domain::{AuthorId, Isbn};
use crate::ports::CredentialProvider;
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;

use super::{
    auth::AdminUser,
    error::ApiError,
    types::{
        AuthorResponse, BookResponse, CreateBookRequest, ListAuthorsQuery, SearchBooksQuery,
        UpdateBookRequest,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
    pub credentials: Arc<dyn CredentialProvider>,
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::invalid_input(rejection.body_text()))
}

// ============================================================================
// Command handlers
// ============================================================================

/// POST /api/v1/books - 書籍をカタログに追加
///
/// 強制されるビジネスルール:
/// - ISBNは10〜17文字の数字とハイフン
/// - 出版年は1500年以上、現在年 + 2 以下
/// - 同じISBNの書籍が存在しないこと
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateBookRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let cmd = json_body(payload)?.into_command()?;
    tracing::info!("Creating new catalog entry for book: {}", cmd.title);

    let book = execute_add_book(&state.service_deps, cmd).await?;

    tracing::info!("Successfully created catalog entry with ISBN: {}", book.isbn);
    Ok((StatusCode::CREATED, Json(BookResponse::from(book))))
}

/// PUT /api/v1/books/:isbn - 書籍の内容を更新
///
/// `authors`を省略すると既存の著者はそのまま。空の配列を渡すと著者を外す。
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    Path(isbn): Path<String>,
    payload: Result<Json<UpdateBookRequest>, JsonRejection>,
) -> Result<Json<BookResponse>, ApiError> {
    let cmd = json_body(payload)?.into_command()?;
    let isbn = Isbn::new(isbn);

    let book = execute_update_book(&state.service_deps, &isbn, cmd).await?;

    tracing::info!("Successfully updated catalog entry with ISBN: {}", isbn);
    Ok(Json(BookResponse::from(book)))
}

/// DELETE /api/v1/books/:isbn - 書籍をカタログから削除
///
/// ADMINロールが必要。
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    AdminUser(principal): AdminUser,
    Path(isbn): Path<String>,
) -> Result<StatusCode, ApiError> {
    let isbn = Isbn::new(isbn);
    tracing::info!(
        "Removing book from catalog with ISBN: {} (requested by {})",
        isbn,
        principal.username
    );

    execute_delete_book(&state.service_deps, &isbn).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Query handlers
// ============================================================================

/// GET /api/v1/books - カタログ全体を取得
pub async fn list_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let books = find_all_books(&state.service_deps).await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// GET /api/v1/books/search - タイトル・著者名で検索
///
/// クエリパラメータ:
/// - title: タイトルの部分一致（オプション）
/// - author: 著者名の部分一致（オプション）
pub async fn search_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchBooksQuery>,
) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let books = execute_search_books(
        &state.service_deps,
        query.title.as_deref(),
        query.author.as_deref(),
    )
    .await?;

    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// GET /api/v1/books/:isbn - ISBNで書籍を取得
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(isbn): Path<String>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = find_book_by_isbn(&state.service_deps, &Isbn::new(isbn)).await?;
    Ok(Json(BookResponse::from(book)))
}

/// GET /api/v1/authors - 著者一覧（nameで部分一致の絞り込み）
pub async fn list_authors(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListAuthorsQuery>,
) -> Result<Json<Vec<AuthorResponse>>, ApiError> {
    let authors = match query.name.as_deref() {
        Some(name) => find_authors_by_name(&state.service_deps, name).await?,
        None => find_all_authors(&state.service_deps).await?,
    };

    Ok(Json(authors.into_iter().map(AuthorResponse::from).collect()))
}

/// GET /api/v1/authors/:id - IDで著者を取得
pub async fn get_author(
    State(state): State<Arc<AppState>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<AuthorResponse>, ApiError> {
    let Path(id) = id.map_err(|rejection| ApiError::invalid_input(rejection.body_text()))?;

    let author = find_author_by_id(&state.service_deps, AuthorId::from_uuid(id)).await?;
    Ok(Json(AuthorResponse::from(author)))
}

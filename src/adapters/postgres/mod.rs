pub mod author_repository;
pub mod book_repository;

// パブリックに型を再エクスポート
pub use author_repository::AuthorRepository as PostgresAuthorRepository;
pub use book_repository::BookRepository as PostgresBookRepository;

/// ILIKEパターン中のワイルドカードをエスケープする（エスケープ文字は`\`）
pub(crate) fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

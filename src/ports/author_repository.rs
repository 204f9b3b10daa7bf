use crate::domain::{Author, AuthorId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 著者リポジトリポート
///
/// 参照のみ。著者は書籍と一緒に`BookRepository`経由で保存される。
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// IDで著者を取得する
    async fn find_by_id(&self, id: AuthorId) -> Result<Option<Author>>;

    /// 名前の部分一致（大文字小文字を区別しない）で著者を検索する
    async fn find_by_name_containing(&self, name: &str) -> Result<Vec<Author>>;

    /// すべての著者を取得する
    async fn find_all(&self) -> Result<Vec<Author>>;
}

use crate::domain::{Book, Isbn};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 書籍リポジトリポート
///
/// Book集約の永続化を抽象化する。
/// 各メソッドは1回の呼び出しの範囲でアトミックであること。
/// 書籍の著者も書籍と同じ呼び出しで永続化される。
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// ISBNで書籍を取得する
    async fn find_by_isbn(&self, isbn: &Isbn) -> Result<Option<Book>>;

    /// 新しい書籍を追加する
    ///
    /// 未保存の著者も同時に保存する。同じISBNの書籍が既にある場合は
    /// 何も書き込まずに`Ok(None)`を返す。
    async fn insert(&self, book: Book) -> Result<Option<Book>>;

    /// 書籍を保存する
    ///
    /// 新規の場合はINSERT、既存の場合は内容と著者の関連を置き換える（upsert）。
    /// 未保存の著者も同時に保存する。
    async fn save(&self, book: Book) -> Result<Book>;

    /// ISBNで書籍を削除する
    ///
    /// 書籍と著者の関連は削除されるが、著者は削除されない。
    async fn delete_by_isbn(&self, isbn: &Isbn) -> Result<()>;

    /// すべての書籍を取得する
    async fn find_all(&self) -> Result<Vec<Book>>;

    /// タイトル・著者名の部分一致で書籍を検索する
    ///
    /// 大文字小文字を区別しない。両方指定された場合はAND条件。
    /// `None`の条件は絞り込みに使わない。
    async fn search(&self, title: Option<&str>, author: Option<&str>) -> Result<Vec<Book>>;
}

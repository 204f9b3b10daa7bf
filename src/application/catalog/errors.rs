use crate::domain::ValidationError;
use thiserror::Error;

/// カタログ管理アプリケーション層のエラー
///
/// どの操作も失敗した時点で終了し、部分的な変更は残さない。
/// 境界層はこの分類をそのまま利用者向けの応答に変換する。
#[derive(Debug, Error)]
pub enum CatalogError {
    /// 入力が不正（ISBNの書式、出版年の範囲など）
    #[error("{0}")]
    InvalidInput(String),

    /// 同じキーのエンティティが既に存在する
    #[error("{0}")]
    AlreadyExists(String),

    /// 対象のエンティティが存在しない
    #[error("{0}")]
    NotFound(String),

    /// 呼び出し元に必要な権限がない（境界層で検出される）
    #[error("{0}")]
    Unauthorized(String),

    /// リポジトリのエラー
    #[error("Repository error")]
    RepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<ValidationError> for CatalogError {
    fn from(err: ValidationError) -> Self {
        CatalogError::InvalidInput(err.to_string())
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, CatalogError>;

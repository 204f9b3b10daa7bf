use thiserror::Error;

/// 書籍入力の検証エラー
///
/// メッセージはそのまま利用者へ返されるため、文言を変更しないこと。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// ISBNの書式が不正
    #[error("Invalid ISBN format. Must be 10-17 digits with optional hyphens")]
    InvalidIsbnFormat,

    /// 出版年が未来すぎる（現在年 + 2 を超える）
    #[error("Publication year cannot be more than 2 years in the future")]
    YearTooFarInFuture,

    /// 出版年が1500年より前
    #[error("Publication year cannot be before 1500")]
    YearBeforeMinimum,
}

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// ISBN - 書籍集約の識別子
///
/// 外部から与えられる文字列をそのまま保持する。
/// 書式の検証は`validation`モジュールの責務であり、ここでは行わない
/// （検索や削除では未検証のキーでも照会できる必要があるため）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Isbn(String);

impl Isbn {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Isbn {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Isbn {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// 著者ID - システムが採番するサロゲートキー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorId(Uuid);

impl AuthorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for AuthorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isbn_keeps_raw_value() {
        let isbn = Isbn::new("123-456-789");
        assert_eq!(isbn.as_str(), "123-456-789");
        assert_eq!(isbn.to_string(), "123-456-789");
    }

    #[test]
    fn test_isbn_serializes_as_plain_string() {
        let json = serde_json::to_string(&Isbn::from("1234567890")).unwrap();
        assert_eq!(json, "\"1234567890\"");
    }

    #[test]
    fn test_author_id_creation() {
        let id1 = AuthorId::new();
        let id2 = AuthorId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_author_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = AuthorId::from_uuid(uuid);
        assert_eq!(id.value(), uuid);
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Isbn;

/// 著者記述子：永続化前の著者情報（名前 + 任意の生年月日）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorDescriptor {
    pub name: String,
    pub birthday: Option<NaiveDate>,
}

impl AuthorDescriptor {
    pub fn new(name: impl Into<String>, birthday: Option<NaiveDate>) -> Self {
        Self {
            name: name.into(),
            birthday,
        }
    }
}

/// コマンド：書籍をカタログに追加する
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddBook {
    pub isbn: Isbn,
    pub title: String,
    pub year: i32,
    pub price: f64,
    pub genre: String,
    pub authors: Vec<AuthorDescriptor>,
}

/// コマンド：書籍の内容を置き換える
///
/// `authors`が`None`の場合は既存の著者を変更しない。
/// `Some(vec![])`の場合は著者をすべて外す。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateBook {
    pub title: String,
    pub year: i32,
    pub price: f64,
    pub genre: String,
    pub authors: Option<Vec<AuthorDescriptor>>,
}

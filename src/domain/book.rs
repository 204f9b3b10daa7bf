use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AddBook, AuthorDescriptor, AuthorId, Isbn, UpdateBook};

/// 著者エンティティ
///
/// 書籍とは独立したライフサイクルを持ち、書籍の削除では消えない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
    pub birthday: Option<NaiveDate>,
}

impl Author {
    /// 記述子から新しい著者を生成する（IDは新規採番）
    pub fn from_descriptor(descriptor: &AuthorDescriptor) -> Self {
        Self {
            id: AuthorId::new(),
            name: descriptor.name.clone(),
            birthday: descriptor.birthday,
        }
    }
}

/// 書籍に関連付けられた著者の集合
///
/// 著者IDで重複を排除する。順序は最初に現れた順を保つが、
/// 等価性の判断には使わないこと。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorSet(Vec<Author>);

impl AuthorSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// 著者を追加する。同じIDが既にあれば何もしない。
    pub fn insert(&mut self, author: Author) -> bool {
        if self.contains_id(author.id) {
            return false;
        }
        self.0.push(author);
        true
    }

    pub fn contains_id(&self, id: AuthorId) -> bool {
        self.0.iter().any(|a| a.id == id)
    }

    pub fn ids(&self) -> Vec<AuthorId> {
        self.0.iter().map(|a| a.id).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Author> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Author> for AuthorSet {
    fn from_iter<I: IntoIterator<Item = Author>>(iter: I) -> Self {
        let mut set = AuthorSet::new();
        for author in iter {
            set.insert(author);
        }
        set
    }
}

impl<'a> IntoIterator for &'a AuthorSet {
    type Item = &'a Author;
    type IntoIter = std::slice::Iter<'a, Author>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Book集約 - ISBNで識別されるカタログの1エントリ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    // 識別子（作成後は不変）
    pub isbn: Isbn,

    pub title: String,
    pub year: i32,
    pub price: f64,
    pub genre: String,

    // 他の集約への参照（多対多、所有はしない）
    pub authors: AuthorSet,
}

/// 純粋関数：追加コマンドと解決済みの著者から書籍を組み立てる
///
/// 著者は集合として扱うため、同じIDの著者は1つにまとまる。
/// 副作用なし。永続化は呼び出し側の責務。
pub fn build_book(cmd: &AddBook, authors: Vec<Author>) -> Book {
    Book {
        isbn: cmd.isbn.clone(),
        title: cmd.title.clone(),
        year: cmd.year,
        price: cmd.price,
        genre: cmd.genre.clone(),
        authors: authors.into_iter().collect(),
    }
}

/// 純粋関数：更新コマンドを既存の書籍に適用する
///
/// ビジネスルール：
/// - タイトル・出版年・価格・ジャンルは常に置き換える
/// - 著者は`Some`の場合のみ置き換える（`None`は変更なし）
/// - ISBNは変更しない
pub fn apply_update(book: Book, cmd: &UpdateBook, authors: Option<Vec<Author>>) -> Book {
    let authors = match authors {
        Some(authors) => authors.into_iter().collect(),
        None => book.authors,
    };

    Book {
        title: cmd.title.clone(),
        year: cmd.year,
        price: cmd.price,
        genre: cmd.genre.clone(),
        authors,
        ..book
    }
}

/// 純粋関数：書籍の著者集合と候補の著者リストに共通する著者IDがあるか
pub fn has_matching_author(book_authors: &AuthorSet, candidates: &[Author]) -> bool {
    book_authors
        .iter()
        .any(|author| candidates.iter().any(|c| c.id == author.id))
}

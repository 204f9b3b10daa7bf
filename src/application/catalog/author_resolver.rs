use crate::domain::{Author, AuthorDescriptor};

/// 著者記述子を新しい著者に解決する
///
/// 記述子ごとに新しいIDの著者を作る。名前が同じ著者が既に存在しても
/// 再利用しない（名前による重複排除は行わない）。出力の順序は入力の順序と同じ。
///
/// ここでは保存しない。著者は書籍と同じ`BookRepository`の呼び出しで保存されるため、
/// 書籍の保存に失敗した場合は著者も残らない。
pub fn resolve_authors(descriptors: &[AuthorDescriptor]) -> Vec<Author> {
    descriptors.iter().map(Author::from_descriptor).collect()
}

use crate::domain::{Author, AuthorId};
use crate::ports::author_repository::{AuthorRepository as AuthorRepositoryTrait, Result};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

use super::poisoned;

/// AuthorRepositoryのインメモリ実装
///
/// 保存順を保持し、`find_all`や検索はその順で返す。
/// 書き込みはインメモリの`BookRepository`が書籍と同じロック区間で行う。
pub struct AuthorRepository {
    authors: Mutex<Vec<Author>>,
}

impl AuthorRepository {
    pub fn new() -> Self {
        Self {
            authors: Mutex::new(Vec::new()),
        }
    }

    /// 保存されている著者の数
    pub fn count(&self) -> usize {
        self.authors.lock().map(|a| a.len()).unwrap_or_default()
    }

    pub(super) fn lock(&self) -> Result<MutexGuard<'_, Vec<Author>>> {
        self.authors.lock().map_err(poisoned)
    }
}

/// 未登録の著者だけを追加する（同じIDの著者は変更しない）
pub(super) fn register_missing<'a>(
    store: &mut Vec<Author>,
    authors: impl IntoIterator<Item = &'a Author>,
) {
    for author in authors {
        if !store.iter().any(|a| a.id == author.id) {
            store.push(author.clone());
        }
    }
}

impl Default for AuthorRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthorRepositoryTrait for AuthorRepository {
    async fn find_by_id(&self, id: AuthorId) -> Result<Option<Author>> {
        let authors = self.authors.lock().map_err(poisoned)?;
        Ok(authors.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_name_containing(&self, name: &str) -> Result<Vec<Author>> {
        let needle = name.to_lowercase();
        let authors = self.authors.lock().map_err(poisoned)?;
        Ok(authors
            .iter()
            .filter(|a| a.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Author>> {
        let authors = self.authors.lock().map_err(poisoned)?;
        Ok(authors.clone())
    }
}

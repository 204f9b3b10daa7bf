use crate::domain::{Author, AuthorId};

use super::catalog_service::ServiceDependencies;
use super::errors::{CatalogError, Result};

/// 名前の部分一致で著者を検索する（大文字小文字を区別しない）
///
/// 該当なしの場合はNotFound。
pub async fn find_authors_by_name(deps: &ServiceDependencies, name: &str) -> Result<Vec<Author>> {
    tracing::debug!("Finding authors with name containing: {}", name);

    let authors = deps
        .author_repository
        .find_by_name_containing(name)
        .await
        .map_err(CatalogError::RepositoryError)?;

    if authors.is_empty() {
        return Err(CatalogError::NotFound("No authors found".to_string()));
    }

    Ok(authors)
}

/// IDで著者を取得する
pub async fn find_author_by_id(deps: &ServiceDependencies, id: AuthorId) -> Result<Author> {
    tracing::debug!("Finding author with id: {}", id);

    deps.author_repository
        .find_by_id(id)
        .await
        .map_err(CatalogError::RepositoryError)?
        .ok_or_else(|| CatalogError::NotFound(format!("Author with id: {} not found", id)))
}

/// すべての著者を取得する
///
/// 著者が1人もいない場合はNotFound。
pub async fn find_all_authors(deps: &ServiceDependencies) -> Result<Vec<Author>> {
    tracing::debug!("Fetching all authors");

    let authors = deps
        .author_repository
        .find_all()
        .await
        .map_err(CatalogError::RepositoryError)?;

    if authors.is_empty() {
        return Err(CatalogError::NotFound("No authors found".to_string()));
    }

    Ok(authors)
}

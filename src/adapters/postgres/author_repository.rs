use crate::domain::{Author, AuthorId};
use crate::ports::author_repository::{AuthorRepository as AuthorRepositoryTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use super::escape_like;

/// PostgreSQLの行データをAuthorに変換する
pub(super) fn map_row_to_author(row: &PgRow) -> Author {
    Author {
        id: AuthorId::from_uuid(row.get("id")),
        name: row.get("name"),
        birthday: row.get("birthday"),
    }
}

/// AuthorRepositoryのPostgreSQL実装
///
/// 著者の書き込みは`BookRepository`のトランザクション内で行われる。
pub struct AuthorRepository {
    pool: PgPool,
}

impl AuthorRepository {
    /// PostgreSQLコネクションプールから新しいAuthorRepositoryを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorRepositoryTrait for AuthorRepository {
    async fn find_by_id(&self, id: AuthorId) -> Result<Option<Author>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, birthday
            FROM authors
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_row_to_author))
    }

    async fn find_by_name_containing(&self, name: &str) -> Result<Vec<Author>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, birthday
            FROM authors
            WHERE name ILIKE '%' || $1 || '%' ESCAPE '\'
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(escape_like(name))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_row_to_author).collect())
    }

    async fn find_all(&self) -> Result<Vec<Author>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, birthday
            FROM authors
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_row_to_author).collect())
    }
}

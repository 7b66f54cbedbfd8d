//! Authors repository

use sqlx::SqlitePool;

use crate::{
    error::AppResult,
    models::author::{Author, NewAuthor},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: SqlitePool,
}

impl AuthorsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All authors, ordered by family name then first name
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            r#"
            SELECT id, first_name, family_name, date_of_birth, date_of_death
            FROM authors
            ORDER BY family_name, first_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(authors)
    }

    pub async fn get(&self, id: i64) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(
            r#"
            SELECT id, first_name, family_name, date_of_birth, date_of_death
            FROM authors
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(author)
    }

    /// Insert a new author, returning its id
    pub async fn create(&self, author: &NewAuthor) -> AppResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO authors (first_name, family_name, date_of_birth, date_of_death)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&author.first_name)
        .bind(&author.family_name)
        .bind(author.date_of_birth)
        .bind(author.date_of_death)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

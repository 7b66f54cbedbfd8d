//! Genres repository

use sqlx::SqlitePool;

use crate::{error::AppResult, models::genre::Genre};

#[derive(Clone)]
pub struct GenresRepository {
    pool: SqlitePool,
}

impl GenresRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All genres, ordered by name
    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        let genres = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(genres)
    }

    pub async fn get(&self, id: i64) -> AppResult<Option<Genre>> {
        let genre = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(genre)
    }

    /// Look up a genre by exact name, used for the pre-insert uniqueness check
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let genre = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(genre)
    }

    /// Insert a new genre, returning its id
    pub async fn create(&self, name: &str) -> AppResult<i64> {
        let result = sqlx::query("INSERT INTO genres (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM genres")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

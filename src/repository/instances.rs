//! Book instances (copies) repository

use sqlx::SqlitePool;

use crate::{
    error::AppResult,
    models::book_instance::{BookInstance, InstanceRow, InstanceStatus, NewInstance},
};

#[derive(Clone)]
pub struct InstancesRepository {
    pool: SqlitePool,
}

impl InstancesRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All copies with their book title joined
    pub async fn list(&self) -> AppResult<Vec<InstanceRow>> {
        let instances = sqlx::query_as::<_, InstanceRow>(
            r#"
            SELECT bi.id, bi.book_id, bi.imprint, bi.status, bi.due_back,
                   b.title AS book_title
            FROM book_instances bi
            JOIN books b ON b.id = bi.book_id
            ORDER BY b.title, bi.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(instances)
    }

    pub async fn get(&self, id: i64) -> AppResult<Option<InstanceRow>> {
        let instance = sqlx::query_as::<_, InstanceRow>(
            r#"
            SELECT bi.id, bi.book_id, bi.imprint, bi.status, bi.due_back,
                   b.title AS book_title
            FROM book_instances bi
            JOIN books b ON b.id = bi.book_id
            WHERE bi.id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(instance)
    }

    /// Copies of one book
    pub async fn list_for_book(&self, book_id: i64) -> AppResult<Vec<BookInstance>> {
        let instances = sqlx::query_as::<_, BookInstance>(
            r#"
            SELECT id, book_id, imprint, status, due_back
            FROM book_instances
            WHERE book_id = ?
            ORDER BY id
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(instances)
    }

    /// Insert a new copy, returning its id
    pub async fn create(&self, instance: &NewInstance) -> AppResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO book_instances (book_id, imprint, status, due_back)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(instance.book_id)
        .bind(&instance.imprint)
        .bind(instance.status)
        .bind(instance.due_back)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn count_by_status(&self, status: InstanceStatus) -> AppResult<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM book_instances WHERE status = ?")
                .bind(status)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

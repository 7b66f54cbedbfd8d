//! Books repository

use sqlx::SqlitePool;

use crate::{
    error::AppResult,
    models::{
        author::Author,
        book::{Book, BookListRow, NewBook},
        genre::Genre,
    },
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: SqlitePool,
}

impl BooksRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All books with their author joined, ordered by title
    pub async fn list(&self) -> AppResult<Vec<BookListRow>> {
        let books = sqlx::query_as::<_, BookListRow>(
            r#"
            SELECT b.id, b.title, a.family_name || ', ' || a.first_name AS author_name
            FROM books b
            JOIN authors a ON a.id = b.author_id
            ORDER BY b.title
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Get one book with its author and genres loaded
    pub async fn get(&self, id: i64) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT id, title, author_id, summary, isbn FROM books WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(mut book) = book else {
            return Ok(None);
        };

        book.author = sqlx::query_as::<_, Author>(
            r#"
            SELECT id, first_name, family_name, date_of_birth, date_of_death
            FROM authors
            WHERE id = ?
            "#,
        )
        .bind(book.author_id)
        .fetch_optional(&self.pool)
        .await?;

        book.genres = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.id, g.name
            FROM book_genres bg
            JOIN genres g ON g.id = bg.genre_id
            WHERE bg.book_id = ?
            ORDER BY g.name
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(book))
    }

    /// Books written by one author, ordered by title
    pub async fn list_by_author(&self, author_id: i64) -> AppResult<Vec<BookListRow>> {
        let books = sqlx::query_as::<_, BookListRow>(
            r#"
            SELECT b.id, b.title, a.family_name || ', ' || a.first_name AS author_name
            FROM books b
            JOIN authors a ON a.id = b.author_id
            WHERE b.author_id = ?
            ORDER BY b.title
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Books tagged with one genre, ordered by title
    pub async fn list_by_genre(&self, genre_id: i64) -> AppResult<Vec<BookListRow>> {
        let books = sqlx::query_as::<_, BookListRow>(
            r#"
            SELECT b.id, b.title, a.family_name || ', ' || a.first_name AS author_name
            FROM books b
            JOIN authors a ON a.id = b.author_id
            JOIN book_genres bg ON bg.book_id = b.id
            WHERE bg.genre_id = ?
            ORDER BY b.title
            "#,
        )
        .bind(genre_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Insert a new book and its genre junction rows, returning the book id
    pub async fn create(&self, book: &NewBook) -> AppResult<i64> {
        let result = sqlx::query(
            "INSERT INTO books (title, author_id, summary, isbn) VALUES (?, ?, ?, ?)",
        )
        .bind(&book.title)
        .bind(book.author_id)
        .bind(&book.summary)
        .bind(&book.isbn)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();

        for genre_id in &book.genre_ids {
            sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES (?, ?)")
                .bind(id)
                .bind(genre_id)
                .execute(&self.pool)
                .await?;
        }

        Ok(id)
    }

    /// Delete a book and its genre junction rows
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM book_genres WHERE book_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

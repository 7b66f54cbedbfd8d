//! Book model and list row

use sqlx::FromRow;

use super::{author::Author, genre::Genre};

/// Full book record. The author and genre relations are loaded
/// separately by the repository when a detail view needs them.
#[derive(Debug, Clone, FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author_id: i64,
    pub summary: String,
    pub isbn: String,
    #[sqlx(skip)]
    pub author: Option<Author>,
    #[sqlx(skip)]
    pub genres: Vec<Genre>,
}

impl Book {
    /// Canonical path for a book id
    pub fn path(id: i64) -> String {
        format!("/catalog/book/{}", id)
    }

    pub fn url(&self) -> String {
        Self::path(self.id)
    }
}

/// Short book representation for lists, author joined
#[derive(Debug, Clone, FromRow)]
pub struct BookListRow {
    pub id: i64,
    pub title: String,
    pub author_name: String,
}

impl BookListRow {
    pub fn url(&self) -> String {
        Book::path(self.id)
    }
}

/// Fields for a new book record
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author_id: i64,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<i64>,
}

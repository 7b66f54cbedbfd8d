//! Repository layer for database operations

pub mod authors;
pub mod books;
pub mod genres;
pub mod instances;

use sqlx::SqlitePool;

/// Main repository struct holding the database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: SqlitePool,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
    pub genres: genres::GenresRepository,
    pub instances: instances::InstancesRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            genres: genres::GenresRepository::new(pool.clone()),
            instances: instances::InstancesRepository::new(pool.clone()),
            pool,
        }
    }
}

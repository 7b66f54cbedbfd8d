//! LocalLibrary Catalog Server
//!
//! A server-rendered library catalog (books, authors, genres, copies)
//! backed by SQLite. Every page is either a rendered view or a redirect
//! to a record's canonical path.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub repository: repository::Repository,
}

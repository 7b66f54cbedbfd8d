//! Genre model

use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

impl Genre {
    /// Canonical path for a genre id
    pub fn path(id: i64) -> String {
        format!("/catalog/genre/{}", id)
    }

    pub fn url(&self) -> String {
        Self::path(self.id)
    }
}

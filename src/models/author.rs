//! Author model

use chrono::NaiveDate;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Author {
    pub id: i64,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Canonical path for an author id
    pub fn path(id: i64) -> String {
        format!("/catalog/author/{}", id)
    }

    pub fn url(&self) -> String {
        Self::path(self.id)
    }

    /// Display name, family name first
    pub fn name(&self) -> String {
        format!("{}, {}", self.family_name, self.first_name)
    }

    /// "Birth - death" span with whichever dates are known
    pub fn lifespan(&self) -> String {
        let fmt = |d: &NaiveDate| d.format("%b %-d, %Y").to_string();
        format!(
            "{} - {}",
            self.date_of_birth.as_ref().map(&fmt).unwrap_or_default(),
            self.date_of_death.as_ref().map(&fmt).unwrap_or_default(),
        )
    }
}

/// Fields for a new author record
#[derive(Debug, Clone)]
pub struct NewAuthor {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

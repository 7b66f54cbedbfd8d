//! Book instance (physical copy) model

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use sqlx::FromRow;

/// Copy status. Stored as its variant name; set at creation only, never
/// transitioned by this codebase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
pub enum InstanceStatus {
    Available,
    Maintenance,
    Loaned,
    Reserved,
}

impl InstanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceStatus::Available => "Available",
            InstanceStatus::Maintenance => "Maintenance",
            InstanceStatus::Loaned => "Loaned",
            InstanceStatus::Reserved => "Reserved",
        }
    }

    pub const ALL: [InstanceStatus; 4] = [
        InstanceStatus::Available,
        InstanceStatus::Maintenance,
        InstanceStatus::Loaned,
        InstanceStatus::Reserved,
    ];
}

impl Default for InstanceStatus {
    fn default() -> Self {
        InstanceStatus::Maintenance
    }
}

impl FromStr for InstanceStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(InstanceStatus::Available),
            "Maintenance" => Ok(InstanceStatus::Maintenance),
            "Loaned" => Ok(InstanceStatus::Loaned),
            "Reserved" => Ok(InstanceStatus::Reserved),
            _ => Err(()),
        }
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct BookInstance {
    pub id: i64,
    pub book_id: i64,
    pub imprint: String,
    pub status: InstanceStatus,
    pub due_back: NaiveDate,
}

impl BookInstance {
    /// Canonical path for a book instance id
    pub fn path(id: i64) -> String {
        format!("/catalog/bookinstance/{}", id)
    }

    pub fn url(&self) -> String {
        Self::path(self.id)
    }

    pub fn due_back_formatted(&self) -> String {
        self.due_back.format("%b %-d, %Y").to_string()
    }
}

/// Instance row with its book title joined, for lists and detail pages
#[derive(Debug, Clone, FromRow)]
pub struct InstanceRow {
    pub id: i64,
    pub book_id: i64,
    pub imprint: String,
    pub status: InstanceStatus,
    pub due_back: NaiveDate,
    pub book_title: String,
}

impl InstanceRow {
    pub fn url(&self) -> String {
        BookInstance::path(self.id)
    }

    pub fn due_back_formatted(&self) -> String {
        self.due_back.format("%b %-d, %Y").to_string()
    }
}

/// Fields for a new copy record
#[derive(Debug, Clone)]
pub struct NewInstance {
    pub book_id: i64,
    pub imprint: String,
    pub status: InstanceStatus,
    pub due_back: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_maintenance() {
        assert_eq!(InstanceStatus::default(), InstanceStatus::Maintenance);
    }

    #[test]
    fn status_parses_exact_variant_names() {
        assert_eq!("Available".parse(), Ok(InstanceStatus::Available));
        assert_eq!("Loaned".parse(), Ok(InstanceStatus::Loaned));
        assert!("available".parse::<InstanceStatus>().is_err());
        assert!("Lost".parse::<InstanceStatus>().is_err());
    }

    #[test]
    fn canonical_path_uses_id() {
        assert_eq!(BookInstance::path(12), "/catalog/bookinstance/12");
    }
}

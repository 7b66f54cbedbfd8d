//! Form parsing, sanitization and validation.
//!
//! Every POST handler runs the same pipeline: sanitize (trim + HTML
//! escape), validate per field, then either convert the form into a
//! `New*` record or hand back the list of field-level messages for the
//! form re-render. Validation failures never become `AppError`s.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{
    author::NewAuthor,
    book::NewBook,
    book_instance::{InstanceStatus, NewInstance},
};

/// HTML-escape the markup-significant characters of a form value
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            c => out.push(c),
        }
    }
    out
}

/// Trim then escape a free-text form field
pub fn sanitize(value: &str) -> String {
    escape_html(value.trim())
}

/// Flatten field errors into their display messages
fn messages(result: Result<(), ValidationErrors>) -> Vec<String> {
    match result {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .field_errors()
            .into_values()
            .flatten()
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .collect(),
    }
}

fn alphanumeric(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && !value.chars().all(char::is_alphanumeric) {
        let mut error = ValidationError::new("alphanumeric");
        error.message = Some("Genre name has non-alphanumeric characters.".into());
        return Err(error);
    }
    Ok(())
}

/// Parse an optional ISO-8601 (YYYY-MM-DD) date field
fn parse_date(value: &str) -> Result<Option<NaiveDate>, ()> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ())
}

// =========================================================================
// BOOK
// =========================================================================

/// Book creation form. `genre` arrives as zero, one or many values and is
/// always handled as a list.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BookForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title must not be empty."))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Author must not be empty."))]
    pub author: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Summary must not be empty."))]
    pub summary: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "ISBN must not be empty."))]
    pub isbn: String,
    #[serde(default)]
    pub genre: Vec<i64>,
}

impl BookForm {
    pub fn sanitized(mut self) -> Self {
        self.title = sanitize(&self.title);
        self.author = self.author.trim().to_string();
        self.summary = sanitize(&self.summary);
        self.isbn = sanitize(&self.isbn);
        self
    }

    pub fn author_id(&self) -> Option<i64> {
        self.author.parse().ok()
    }

    pub fn to_new_book(&self) -> Result<NewBook, Vec<String>> {
        let mut problems = messages(self.validate());
        if self.title.chars().count() > 100 {
            problems.push("Title must not exceed 100 characters.".to_string());
        }
        let author_id = self.author_id().unwrap_or_else(|| {
            if !self.author.is_empty() {
                problems.push("Author selection is invalid.".to_string());
            }
            0
        });
        if !problems.is_empty() {
            return Err(problems);
        }
        Ok(NewBook {
            title: self.title.clone(),
            author_id,
            summary: self.summary.clone(),
            isbn: self.isbn.clone(),
            genre_ids: self.genre.clone(),
        })
    }
}

/// Book delete confirmation form body
#[derive(Debug, Deserialize)]
pub struct BookDeleteForm {
    #[serde(default)]
    pub book_id: Option<i64>,
}

// =========================================================================
// AUTHOR
// =========================================================================

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AuthorForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "First name must be specified."))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Family name must be specified."))]
    pub family_name: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub date_of_death: String,
}

impl AuthorForm {
    pub fn sanitized(mut self) -> Self {
        self.first_name = sanitize(&self.first_name);
        self.family_name = sanitize(&self.family_name);
        self.date_of_birth = self.date_of_birth.trim().to_string();
        self.date_of_death = self.date_of_death.trim().to_string();
        self
    }

    pub fn to_new_author(&self) -> Result<NewAuthor, Vec<String>> {
        let mut problems = messages(self.validate());
        if self.first_name.chars().count() > 100 {
            problems.push("First name must not exceed 100 characters.".to_string());
        }
        if self.family_name.chars().count() > 100 {
            problems.push("Family name must not exceed 100 characters.".to_string());
        }
        let date_of_birth = parse_date(&self.date_of_birth).unwrap_or_else(|_| {
            problems.push("Invalid date of birth.".to_string());
            None
        });
        let date_of_death = parse_date(&self.date_of_death).unwrap_or_else(|_| {
            problems.push("Invalid date of death.".to_string());
            None
        });
        if !problems.is_empty() {
            return Err(problems);
        }
        Ok(NewAuthor {
            first_name: self.first_name.clone(),
            family_name: self.family_name.clone(),
            date_of_birth,
            date_of_death,
        })
    }
}

// =========================================================================
// GENRE
// =========================================================================

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct GenreForm {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Genre name must be specified."),
        custom(function = "alphanumeric")
    )]
    pub name: String,
}

impl GenreForm {
    pub fn sanitized(mut self) -> Self {
        self.name = sanitize(&self.name);
        self
    }

    pub fn validated_name(&self) -> Result<String, Vec<String>> {
        let problems = messages(self.validate());
        if problems.is_empty() {
            Ok(self.name.clone())
        } else {
            Err(problems)
        }
    }
}

// =========================================================================
// BOOK INSTANCE
// =========================================================================

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct InstanceForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Book must be specified."))]
    pub book: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Imprint must be specified."))]
    pub imprint: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub due_back: String,
}

impl InstanceForm {
    pub fn sanitized(mut self) -> Self {
        self.book = self.book.trim().to_string();
        self.imprint = sanitize(&self.imprint);
        self.status = self.status.trim().to_string();
        self.due_back = self.due_back.trim().to_string();
        self
    }

    pub fn book_id(&self) -> Option<i64> {
        self.book.parse().ok()
    }

    /// Selected status; an empty field falls back to the default
    pub fn status_value(&self) -> Result<InstanceStatus, ()> {
        if self.status.is_empty() {
            return Ok(InstanceStatus::default());
        }
        self.status.parse()
    }

    pub fn to_new_instance(&self) -> Result<NewInstance, Vec<String>> {
        let mut problems = messages(self.validate());
        let book_id = self.book_id().unwrap_or_else(|| {
            if !self.book.is_empty() {
                problems.push("Book selection is invalid.".to_string());
            }
            0
        });
        let status = self.status_value().unwrap_or_else(|_| {
            problems.push("Invalid status.".to_string());
            InstanceStatus::default()
        });
        let due_back = match parse_date(&self.due_back) {
            Ok(date) => date.unwrap_or_else(|| Utc::now().date_naive()),
            Err(()) => {
                problems.push("Invalid due back date.".to_string());
                Utc::now().date_naive()
            }
        };
        if !problems.is_empty() {
            return Err(problems);
        }
        Ok(NewInstance {
            book_id,
            imprint: self.imprint.clone(),
            status,
            due_back,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_trims_and_escapes() {
        assert_eq!(sanitize("  <b>Dune</b> & co  "), "&lt;b&gt;Dune&lt;&#x2F;b&gt; &amp; co");
    }

    #[test]
    fn book_form_requires_every_field() {
        let form = BookForm::default().sanitized();
        let problems = form.to_new_book().unwrap_err();
        assert!(problems.iter().any(|p| p == "Title must not be empty."));
        assert!(problems.iter().any(|p| p == "Author must not be empty."));
        assert!(problems.iter().any(|p| p == "Summary must not be empty."));
        assert!(problems.iter().any(|p| p == "ISBN must not be empty."));
    }

    #[test]
    fn book_form_caps_title_length() {
        let form = BookForm {
            title: "x".repeat(101),
            author: "1".to_string(),
            summary: "s".to_string(),
            isbn: "i".to_string(),
            genre: vec![],
        };
        let problems = form.to_new_book().unwrap_err();
        assert!(problems.iter().any(|p| p == "Title must not exceed 100 characters."));
    }

    #[test]
    fn valid_book_form_converts() {
        let form = BookForm {
            title: " Dune ".to_string(),
            author: "3".to_string(),
            summary: "Sand.".to_string(),
            isbn: "0441013597".to_string(),
            genre: vec![1, 2],
        }
        .sanitized();
        let book = form.to_new_book().expect("form should be valid");
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author_id, 3);
        assert_eq!(book.genre_ids, vec![1, 2]);
    }

    #[test]
    fn genre_form_rejects_non_alphanumeric() {
        let form = GenreForm {
            name: "Science Fiction".to_string(),
        };
        let problems = form.validated_name().unwrap_err();
        assert!(problems
            .iter()
            .any(|p| p == "Genre name has non-alphanumeric characters."));
    }

    #[test]
    fn genre_form_trims_name() {
        let form = GenreForm {
            name: "  Fantasy  ".to_string(),
        }
        .sanitized();
        assert_eq!(form.validated_name().unwrap(), "Fantasy");
    }

    #[test]
    fn author_form_flags_bad_dates() {
        let form = AuthorForm {
            first_name: "Ursula".to_string(),
            family_name: "Le Guin".to_string(),
            date_of_birth: "not-a-date".to_string(),
            date_of_death: String::new(),
        };
        let problems = form.to_new_author().unwrap_err();
        assert_eq!(problems, vec!["Invalid date of birth.".to_string()]);
    }

    #[test]
    fn instance_form_defaults_status_and_due_back() {
        let form = InstanceForm {
            book: "1".to_string(),
            imprint: "First edition".to_string(),
            status: String::new(),
            due_back: String::new(),
        };
        let instance = form.to_new_instance().expect("form should be valid");
        assert_eq!(instance.status, InstanceStatus::Maintenance);
        assert_eq!(instance.due_back, Utc::now().date_naive());
    }

    #[test]
    fn instance_form_rejects_unknown_status() {
        let form = InstanceForm {
            book: "1".to_string(),
            imprint: "First edition".to_string(),
            status: "Lost".to_string(),
            due_back: String::new(),
        };
        let problems = form.to_new_instance().unwrap_err();
        assert!(problems.iter().any(|p| p == "Invalid status."));
    }

    #[test]
    fn instance_form_rejects_bad_date() {
        let form = InstanceForm {
            book: "1".to_string(),
            imprint: "First edition".to_string(),
            status: "Available".to_string(),
            due_back: "2026-13-40".to_string(),
        };
        let problems = form.to_new_instance().unwrap_err();
        assert!(problems.iter().any(|p| p == "Invalid due back date."));
    }
}

//! HTML views.
//!
//! Free-text values are escaped when the forms accept them, so pages
//! render stored values verbatim. Each function returns the full page
//! body for an `axum::response::Html` wrapper.

use axum::http::StatusCode;

use crate::{
    forms::{AuthorForm, BookForm, GenreForm, InstanceForm},
    models::{
        author::Author,
        book::{Book, BookListRow},
        book_instance::{BookInstance, InstanceRow, InstanceStatus},
        genre::Genre,
    },
};

/// Counts shown on the catalog home page; `None` when the sub-query failed
#[derive(Debug, Default)]
pub struct IndexCounts {
    pub books: Option<i64>,
    pub copies: Option<i64>,
    pub copies_available: Option<i64>,
    pub authors: Option<i64>,
    pub genres: Option<i64>,
}

fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title}</title></head>
<body>
<div class="sidebar">
<ul>
<li><a href="/catalog">Home</a></li>
<li><a href="/catalog/books">All books</a></li>
<li><a href="/catalog/authors">All authors</a></li>
<li><a href="/catalog/genres">All genres</a></li>
<li><a href="/catalog/bookinstances">All book instances</a></li>
<li><a href="/catalog/book/create">Create new book</a></li>
<li><a href="/catalog/author/create">Create new author</a></li>
<li><a href="/catalog/genre/create">Create new genre</a></li>
<li><a href="/catalog/bookinstance/create">Create new book instance</a></li>
</ul>
</div>
<div class="content">
<h1>{title}</h1>
{content}
</div>
</body>
</html>
"#
    )
}

fn errors_block(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let mut out = String::from("<ul class=\"errors\">\n");
    for error in errors {
        out.push_str(&format!("<li>{}</li>\n", error));
    }
    out.push_str("</ul>\n");
    out
}

fn count_line(label: &str, count: Option<i64>) -> String {
    match count {
        Some(n) => format!("<li>{}: {}</li>\n", label, n),
        None => format!("<li>{}: unavailable</li>\n", label),
    }
}

pub fn index(counts: &IndexCounts, error: Option<&str>) -> String {
    let mut content = String::new();
    if let Some(error) = error {
        content.push_str(&format!("<p class=\"error\">{}</p>\n", error));
    }
    content.push_str("<p>The library has the following record counts:</p>\n<ul>\n");
    content.push_str(&count_line("Books", counts.books));
    content.push_str(&count_line("Copies", counts.copies));
    content.push_str(&count_line("Copies available", counts.copies_available));
    content.push_str(&count_line("Authors", counts.authors));
    content.push_str(&count_line("Genres", counts.genres));
    content.push_str("</ul>\n");
    layout("Local Library Home", &content)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    layout(message, &format!("<p>Status: {}</p>\n", status.as_u16()))
}

// =========================================================================
// BOOKS
// =========================================================================

pub fn book_list(books: &[BookListRow]) -> String {
    let mut content = String::from("<ul>\n");
    for book in books {
        content.push_str(&format!(
            "<li><a href=\"{}\">{}</a> ({})</li>\n",
            book.url(),
            book.title,
            book.author_name
        ));
    }
    content.push_str("</ul>\n");
    if books.is_empty() {
        content.push_str("<p>There are no books.</p>\n");
    }
    layout("Book List", &content)
}

pub fn book_detail(book: &Book, copies: &[BookInstance]) -> String {
    let mut content = String::new();
    if let Some(author) = &book.author {
        content.push_str(&format!(
            "<p><strong>Author:</strong> <a href=\"{}\">{}</a></p>\n",
            author.url(),
            author.name()
        ));
    }
    content.push_str(&format!("<p><strong>Summary:</strong> {}</p>\n", book.summary));
    content.push_str(&format!("<p><strong>ISBN:</strong> {}</p>\n", book.isbn));
    let genre_links: Vec<String> = book
        .genres
        .iter()
        .map(|g| format!("<a href=\"{}\">{}</a>", g.url(), g.name))
        .collect();
    content.push_str(&format!(
        "<p><strong>Genre:</strong> {}</p>\n",
        genre_links.join(", ")
    ));
    content.push_str("<h2>Copies</h2>\n");
    if copies.is_empty() {
        content.push_str("<p>There are no copies of this book in the library.</p>\n");
    } else {
        content.push_str("<ul>\n");
        for copy in copies {
            content.push_str(&format!(
                "<li><a href=\"{}\">{}</a> - {} (due back {})</li>\n",
                copy.url(),
                copy.imprint,
                copy.status,
                copy.due_back_formatted()
            ));
        }
        content.push_str("</ul>\n");
    }
    layout(&book.title, &content)
}

pub fn book_form(
    authors: &[Author],
    genres: &[Genre],
    form: &BookForm,
    errors: &[String],
) -> String {
    let selected_author = form.author_id();
    let mut content = errors_block(errors);
    content.push_str("<form method=\"POST\" action=\"\">\n");
    content.push_str(&format!(
        "<label>Title: <input type=\"text\" name=\"title\" value=\"{}\"></label><br>\n",
        form.title
    ));
    content.push_str("<label>Author: <select name=\"author\">\n<option value=\"\"></option>\n");
    for author in authors {
        let selected = if selected_author == Some(author.id) {
            " selected"
        } else {
            ""
        };
        content.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            author.id,
            selected,
            author.name()
        ));
    }
    content.push_str("</select></label><br>\n");
    content.push_str(&format!(
        "<label>Summary: <textarea name=\"summary\">{}</textarea></label><br>\n",
        form.summary
    ));
    content.push_str(&format!(
        "<label>ISBN: <input type=\"text\" name=\"isbn\" value=\"{}\"></label><br>\n",
        form.isbn
    ));
    content.push_str("<fieldset>Genre:\n");
    for genre in genres {
        let checked = if form.genre.contains(&genre.id) {
            " checked"
        } else {
            ""
        };
        content.push_str(&format!(
            "<label><input type=\"checkbox\" name=\"genre\" value=\"{}\"{}> {}</label>\n",
            genre.id, checked, genre.name
        ));
    }
    content.push_str("</fieldset>\n");
    content.push_str("<button type=\"submit\">Submit</button>\n</form>\n");
    layout("Create Book", &content)
}

pub fn book_delete(book: &Book, copies: &[BookInstance]) -> String {
    let mut content = String::new();
    content.push_str(&format!("<p><strong>Title:</strong> {}</p>\n", book.title));
    if let Some(author) = &book.author {
        content.push_str(&format!(
            "<p><strong>Author:</strong> <a href=\"{}\">{}</a></p>\n",
            author.url(),
            author.name()
        ));
    }
    if copies.is_empty() {
        content.push_str("<p>Do you really want to delete this book?</p>\n");
        content.push_str("<form method=\"POST\" action=\"\">\n");
        content.push_str(&format!(
            "<input type=\"hidden\" name=\"book_id\" value=\"{}\">\n",
            book.id
        ));
        content.push_str("<button type=\"submit\">Delete</button>\n</form>\n");
    } else {
        content.push_str(
            "<p>Delete the following copies before deleting this book.</p>\n<ul>\n",
        );
        for copy in copies {
            content.push_str(&format!(
                "<li><a href=\"{}\">{}</a> - {}</li>\n",
                copy.url(),
                copy.imprint,
                copy.status
            ));
        }
        content.push_str("</ul>\n");
    }
    layout("Delete Book", &content)
}

// =========================================================================
// AUTHORS
// =========================================================================

pub fn author_list(authors: &[Author]) -> String {
    let mut content = String::from("<ul>\n");
    for author in authors {
        content.push_str(&format!(
            "<li><a href=\"{}\">{}</a> ({})</li>\n",
            author.url(),
            author.name(),
            author.lifespan()
        ));
    }
    content.push_str("</ul>\n");
    if authors.is_empty() {
        content.push_str("<p>There are no authors.</p>\n");
    }
    layout("Author List", &content)
}

pub fn author_detail(author: &Author, books: &[BookListRow]) -> String {
    let mut content = String::new();
    content.push_str(&format!("<p>{}</p>\n", author.lifespan()));
    content.push_str("<h2>Books</h2>\n");
    if books.is_empty() {
        content.push_str("<p>This author has no books.</p>\n");
    } else {
        content.push_str("<ul>\n");
        for book in books {
            content.push_str(&format!(
                "<li><a href=\"{}\">{}</a></li>\n",
                book.url(),
                book.title
            ));
        }
        content.push_str("</ul>\n");
    }
    layout(&author.name(), &content)
}

pub fn author_form(form: &AuthorForm, errors: &[String]) -> String {
    let mut content = errors_block(errors);
    content.push_str("<form method=\"POST\" action=\"\">\n");
    content.push_str(&format!(
        "<label>First name: <input type=\"text\" name=\"first_name\" value=\"{}\"></label><br>\n",
        form.first_name
    ));
    content.push_str(&format!(
        "<label>Family name: <input type=\"text\" name=\"family_name\" value=\"{}\"></label><br>\n",
        form.family_name
    ));
    content.push_str(&format!(
        "<label>Date of birth: <input type=\"date\" name=\"date_of_birth\" value=\"{}\"></label><br>\n",
        form.date_of_birth
    ));
    content.push_str(&format!(
        "<label>Date of death: <input type=\"date\" name=\"date_of_death\" value=\"{}\"></label><br>\n",
        form.date_of_death
    ));
    content.push_str("<button type=\"submit\">Submit</button>\n</form>\n");
    layout("Create Author", &content)
}

// =========================================================================
// GENRES
// =========================================================================

pub fn genre_list(genres: &[Genre]) -> String {
    let mut content = String::from("<ul>\n");
    for genre in genres {
        content.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            genre.url(),
            genre.name
        ));
    }
    content.push_str("</ul>\n");
    if genres.is_empty() {
        content.push_str("<p>There are no genres.</p>\n");
    }
    layout("Genre List", &content)
}

pub fn genre_detail(genre: &Genre, books: &[BookListRow]) -> String {
    let mut content = String::from("<h2>Books in this genre</h2>\n");
    if books.is_empty() {
        content.push_str("<p>This genre has no books.</p>\n");
    } else {
        content.push_str("<ul>\n");
        for book in books {
            content.push_str(&format!(
                "<li><a href=\"{}\">{}</a> ({})</li>\n",
                book.url(),
                book.title,
                book.author_name
            ));
        }
        content.push_str("</ul>\n");
    }
    layout(&format!("Genre: {}", genre.name), &content)
}

pub fn genre_form(form: &GenreForm, errors: &[String]) -> String {
    let mut content = errors_block(errors);
    content.push_str("<form method=\"POST\" action=\"\">\n");
    content.push_str(&format!(
        "<label>Genre name: <input type=\"text\" name=\"name\" value=\"{}\"></label><br>\n",
        form.name
    ));
    content.push_str("<button type=\"submit\">Submit</button>\n</form>\n");
    layout("Create Genre", &content)
}

// =========================================================================
// BOOK INSTANCES
// =========================================================================

pub fn instance_list(copies: &[InstanceRow]) -> String {
    let mut content = String::from("<ul>\n");
    for copy in copies {
        content.push_str(&format!(
            "<li><a href=\"{}\">{}: {}</a> - {} (due back {})</li>\n",
            copy.url(),
            copy.book_title,
            copy.imprint,
            copy.status,
            copy.due_back_formatted()
        ));
    }
    content.push_str("</ul>\n");
    if copies.is_empty() {
        content.push_str("<p>There are no book instances.</p>\n");
    }
    layout("Book Instance List", &content)
}

pub fn instance_detail(copy: &InstanceRow) -> String {
    let mut content = String::new();
    content.push_str(&format!(
        "<p><strong>Book:</strong> <a href=\"{}\">{}</a></p>\n",
        Book::path(copy.book_id),
        copy.book_title
    ));
    content.push_str(&format!("<p><strong>Imprint:</strong> {}</p>\n", copy.imprint));
    content.push_str(&format!("<p><strong>Status:</strong> {}</p>\n", copy.status));
    content.push_str(&format!(
        "<p><strong>Due back:</strong> {}</p>\n",
        copy.due_back_formatted()
    ));
    layout(&format!("Copy: {}", copy.book_title), &content)
}

pub fn instance_form(books: &[BookListRow], form: &InstanceForm, errors: &[String]) -> String {
    let selected_book = form.book_id();
    let selected_status = form.status_value().unwrap_or_default();
    let mut content = errors_block(errors);
    content.push_str("<form method=\"POST\" action=\"\">\n");
    content.push_str("<label>Book: <select name=\"book\">\n<option value=\"\"></option>\n");
    for book in books {
        let selected = if selected_book == Some(book.id) {
            " selected"
        } else {
            ""
        };
        content.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            book.id, selected, book.title
        ));
    }
    content.push_str("</select></label><br>\n");
    content.push_str(&format!(
        "<label>Imprint: <input type=\"text\" name=\"imprint\" value=\"{}\"></label><br>\n",
        form.imprint
    ));
    content.push_str(&format!(
        "<label>Due back: <input type=\"date\" name=\"due_back\" value=\"{}\"></label><br>\n",
        form.due_back
    ));
    content.push_str("<label>Status: <select name=\"status\">\n");
    for status in InstanceStatus::ALL {
        let selected = if status == selected_status {
            " selected"
        } else {
            ""
        };
        content.push_str(&format!(
            "<option value=\"{status}\"{selected}>{status}</option>\n"
        ));
    }
    content.push_str("</select></label><br>\n");
    content.push_str("<button type=\"submit\">Submit</button>\n</form>\n");
    layout("Create BookInstance", &content)
}

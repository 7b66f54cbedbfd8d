//! Book endpoints

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;

use crate::{
    error::{AppError, AppResult},
    forms::{BookDeleteForm, BookForm},
    models::book::Book,
    views, AppState,
};

/// GET /catalog/books
pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.repository.books.list().await?;
    Ok(Html(views::book_list(&books)))
}

/// GET /catalog/book/:id
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Html<String>> {
    let repo = &state.repository;
    let (book, copies) = tokio::join!(repo.books.get(id), repo.instances.list_for_book(id));
    let book = book?.ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
    Ok(Html(views::book_detail(&book, &copies?)))
}

/// GET /catalog/book/create
pub async fn create_get(State(state): State<AppState>) -> AppResult<Html<String>> {
    let repo = &state.repository;
    let (authors, genres) = tokio::join!(repo.authors.list(), repo.genres.list());
    Ok(Html(views::book_form(
        &authors?,
        &genres?,
        &BookForm::default(),
        &[],
    )))
}

/// POST /catalog/book/create
pub async fn create_post(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    let repo = &state.repository;
    let form = form.sanitized();

    match form.to_new_book() {
        Err(problems) => {
            // Re-render with the entered values and the selected choices
            // marked; nothing is persisted.
            let (authors, genres) = tokio::join!(repo.authors.list(), repo.genres.list());
            Ok(Html(views::book_form(&authors?, &genres?, &form, &problems)).into_response())
        }
        Ok(new_book) => {
            let id = repo.books.create(&new_book).await?;
            Ok(Redirect::to(&Book::path(id)).into_response())
        }
    }
}

/// GET /catalog/book/:id/delete
pub async fn delete_get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let repo = &state.repository;
    let (book, copies) = tokio::join!(repo.books.get(id), repo.instances.list_for_book(id));
    let Some(book) = book? else {
        return Ok(Redirect::to("/catalog/books").into_response());
    };
    Ok(Html(views::book_delete(&book, &copies?)).into_response())
}

/// POST /catalog/book/:id/delete
///
/// Deletion is refused while copies still reference the book. The check
/// and the delete are separate statements; a copy created in between is
/// not guarded against.
pub async fn delete_post(
    State(state): State<AppState>,
    Path(_id): Path<i64>,
    Form(form): Form<BookDeleteForm>,
) -> AppResult<Response> {
    let repo = &state.repository;
    let Some(book_id) = form.book_id else {
        return Ok(Redirect::to("/catalog/books").into_response());
    };

    let (book, copies) = tokio::join!(
        repo.books.get(book_id),
        repo.instances.list_for_book(book_id)
    );
    let (book, copies) = (book?, copies?);

    if !copies.is_empty() {
        // Copies must be removed first; send the user to that flow.
        return Ok(Redirect::to("/catalog/bookinstance/delete").into_response());
    }

    if book.is_some() {
        repo.books.delete(book_id).await?;
    }

    Ok(Redirect::to("/catalog/books").into_response())
}

/// GET /catalog/book/:id/update
pub async fn update_get() -> &'static str {
    "NOT IMPLEMENTED: Book update GET"
}

/// POST /catalog/book/:id/update
pub async fn update_post() -> &'static str {
    "NOT IMPLEMENTED: Book update POST"
}

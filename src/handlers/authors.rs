//! Author endpoints

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;

use crate::{
    error::{AppError, AppResult},
    forms::AuthorForm,
    models::author::Author,
    views, AppState,
};

/// GET /catalog/authors
pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let authors = state.repository.authors.list().await?;
    Ok(Html(views::author_list(&authors)))
}

/// GET /catalog/author/:id
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Html<String>> {
    let repo = &state.repository;
    let (author, books) = tokio::join!(repo.authors.get(id), repo.books.list_by_author(id));
    let author = author?.ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
    Ok(Html(views::author_detail(&author, &books?)))
}

/// GET /catalog/author/create
pub async fn create_get() -> Html<String> {
    Html(views::author_form(&AuthorForm::default(), &[]))
}

/// POST /catalog/author/create
pub async fn create_post(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    let form = form.sanitized();

    match form.to_new_author() {
        Err(problems) => Ok(Html(views::author_form(&form, &problems)).into_response()),
        Ok(new_author) => {
            let id = state.repository.authors.create(&new_author).await?;
            Ok(Redirect::to(&Author::path(id)).into_response())
        }
    }
}

/// GET /catalog/author/:id/delete
pub async fn delete_get() -> &'static str {
    "NOT IMPLEMENTED: Author delete GET"
}

/// POST /catalog/author/:id/delete
pub async fn delete_post() -> &'static str {
    "NOT IMPLEMENTED: Author delete POST"
}

/// GET /catalog/author/:id/update
pub async fn update_get() -> &'static str {
    "NOT IMPLEMENTED: Author update GET"
}

/// POST /catalog/author/:id/update
pub async fn update_post() -> &'static str {
    "NOT IMPLEMENTED: Author update POST"
}

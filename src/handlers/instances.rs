//! Book instance (copy) endpoints

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;

use crate::{
    error::{AppError, AppResult},
    forms::InstanceForm,
    models::book_instance::BookInstance,
    views, AppState,
};

/// GET /catalog/bookinstances
pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let copies = state.repository.instances.list().await?;
    Ok(Html(views::instance_list(&copies)))
}

/// GET /catalog/bookinstance/:id
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Html<String>> {
    let copy = state
        .repository
        .instances
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))?;
    Ok(Html(views::instance_detail(&copy)))
}

/// GET /catalog/bookinstance/create
pub async fn create_get(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.repository.books.list().await?;
    Ok(Html(views::instance_form(
        &books,
        &InstanceForm::default(),
        &[],
    )))
}

/// POST /catalog/bookinstance/create
pub async fn create_post(
    State(state): State<AppState>,
    Form(form): Form<InstanceForm>,
) -> AppResult<Response> {
    let repo = &state.repository;
    let form = form.sanitized();

    match form.to_new_instance() {
        Err(problems) => {
            let books = repo.books.list().await?;
            Ok(Html(views::instance_form(&books, &form, &problems)).into_response())
        }
        Ok(new_instance) => {
            let id = repo.instances.create(&new_instance).await?;
            Ok(Redirect::to(&BookInstance::path(id)).into_response())
        }
    }
}

/// GET /catalog/bookinstance/delete
pub async fn delete_get() -> &'static str {
    "NOT IMPLEMENTED: Book instance delete GET"
}

/// POST /catalog/bookinstance/delete
pub async fn delete_post() -> &'static str {
    "NOT IMPLEMENTED: Book instance delete POST"
}

/// GET /catalog/bookinstance/update
pub async fn update_get() -> &'static str {
    "NOT IMPLEMENTED: Book instance update GET"
}

/// POST /catalog/bookinstance/update
pub async fn update_post() -> &'static str {
    "NOT IMPLEMENTED: Book instance update POST"
}

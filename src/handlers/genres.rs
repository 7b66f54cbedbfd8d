//! Genre endpoints

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;

use crate::{
    error::{AppError, AppResult},
    forms::GenreForm,
    models::genre::Genre,
    views, AppState,
};

/// GET /catalog/genres
pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let genres = state.repository.genres.list().await?;
    Ok(Html(views::genre_list(&genres)))
}

/// GET /catalog/genre/:id
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Html<String>> {
    let repo = &state.repository;
    let (genre, books) = tokio::join!(repo.genres.get(id), repo.books.list_by_genre(id));
    let genre = genre?.ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
    Ok(Html(views::genre_detail(&genre, &books?)))
}

/// GET /catalog/genre/create
pub async fn create_get() -> Html<String> {
    Html(views::genre_form(&GenreForm::default(), &[]))
}

/// POST /catalog/genre/create
///
/// A genre whose name already exists is never inserted twice; the
/// response redirects to the existing record instead.
pub async fn create_post(
    State(state): State<AppState>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    let repo = &state.repository;
    let form = form.sanitized();

    match form.validated_name() {
        Err(problems) => Ok(Html(views::genre_form(&form, &problems)).into_response()),
        Ok(name) => {
            if let Some(existing) = repo.genres.find_by_name(&name).await? {
                return Ok(Redirect::to(&existing.url()).into_response());
            }
            let id = repo.genres.create(&name).await?;
            Ok(Redirect::to(&Genre::path(id)).into_response())
        }
    }
}

/// GET /catalog/genre/delete
pub async fn delete_get() -> &'static str {
    "NOT IMPLEMENTED: Genre delete GET"
}

/// POST /catalog/genre/delete
pub async fn delete_post() -> &'static str {
    "NOT IMPLEMENTED: Genre delete POST"
}

/// GET /catalog/genre/update
pub async fn update_get() -> &'static str {
    "NOT IMPLEMENTED: Genre update GET"
}

/// POST /catalog/genre/update
pub async fn update_post() -> &'static str {
    "NOT IMPLEMENTED: Genre update POST"
}

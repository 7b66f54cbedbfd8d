//! Catalog home page

use axum::{extract::State, response::Html};

use crate::{
    error::AppResult,
    models::book_instance::InstanceStatus,
    views::{self, IndexCounts},
    AppState,
};

/// GET /catalog/
///
/// All five counts always run to completion; the page renders whichever
/// counts came back plus the first error, always with status 200.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let repo = &state.repository;

    let (books, copies, available, authors, genres) = tokio::join!(
        repo.books.count(),
        repo.instances.count(),
        repo.instances.count_by_status(InstanceStatus::Available),
        repo.authors.count(),
        repo.genres.count(),
    );

    let mut error: Option<String> = None;
    let mut take = |result: AppResult<i64>| match result {
        Ok(count) => Some(count),
        Err(e) => {
            error.get_or_insert_with(|| e.to_string());
            None
        }
    };

    let counts = IndexCounts {
        books: take(books),
        copies: take(copies),
        copies_available: take(available),
        authors: take(authors),
        genres: take(genres),
    };

    Html(views::index(&counts, error.as_deref()))
}

//! Application router.
//!
//! Fixed-segment routes ("create", "delete", "update" and the plural
//! list paths) are registered before the generic ":id" capture so the
//! wildcard never shadows them.

use axum::{response::Redirect, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{
    error::AppError,
    handlers::{authors, books, catalog, genres, instances},
    AppState,
};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let catalog_routes = Router::new()
        // Catalog home page
        .route("/", get(catalog::index))
        // Books
        .route("/book/create", get(books::create_get).post(books::create_post))
        .route("/book/:id/delete", get(books::delete_get).post(books::delete_post))
        .route("/book/:id/update", get(books::update_get).post(books::update_post))
        .route("/book/:id", get(books::detail))
        .route("/books", get(books::list))
        // Authors
        .route("/author/create", get(authors::create_get).post(authors::create_post))
        .route("/author/:id/delete", get(authors::delete_get).post(authors::delete_post))
        .route("/author/:id/update", get(authors::update_get).post(authors::update_post))
        .route("/author/:id", get(authors::detail))
        .route("/authors", get(authors::list))
        // Genres
        .route("/genre/create", get(genres::create_get).post(genres::create_post))
        .route("/genre/delete", get(genres::delete_get).post(genres::delete_post))
        .route("/genre/update", get(genres::update_get).post(genres::update_post))
        .route("/genre/:id", get(genres::detail))
        .route("/genres", get(genres::list))
        // Book instances
        .route(
            "/bookinstance/create",
            get(instances::create_get).post(instances::create_post),
        )
        .route(
            "/bookinstance/delete",
            get(instances::delete_get).post(instances::delete_post),
        )
        .route(
            "/bookinstance/update",
            get(instances::update_get).post(instances::update_post),
        )
        .route("/bookinstance/:id", get(instances::detail))
        .route("/bookinstances", get(instances::list));

    Router::new()
        .route("/", get(|| async { Redirect::to("/catalog") }))
        .nest("/catalog", catalog_routes)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound("Page not found".to_string())
}

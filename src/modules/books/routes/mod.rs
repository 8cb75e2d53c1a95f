//! HTTP handlers for the books module.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use shelf_http::error::{AppError, AppResult};

use super::models::{Book, BookIdPath, BookRequest, PublishedDateQuery, RatingQuery};
use super::store::SharedStore;
use crate::utils::{self, rejection, validated};

/// Build the books router over a shared store.
pub fn router(store: SharedStore) -> Router {
    let prefix = utils::log_prefix("books");
    tracing::debug!(target: "project.routes", %prefix, "registering books routes");

    Router::new()
        .route("/", get(list_books))
        .route("/publish", get(books_by_published_date))
        .route("/rating", get(books_by_rating))
        .route("/create-book", post(create_book))
        .route("/update_book", put(update_book))
        .route("/{book_id}", get(read_book).delete(delete_book))
        .with_state(store)
}

async fn list_books(State(store): State<SharedStore>) -> Json<Vec<Book>> {
    let store = store.read().await;
    Json(store.list_all().to_vec())
}

async fn read_book(
    State(store): State<SharedStore>,
    path: Result<Path<BookIdPath>, PathRejection>,
) -> AppResult<Json<Book>> {
    let Path(params) = path.map_err(|e| rejection("book_id", e))?;
    let params = validated(params)?;

    let store = store.read().await;
    let book = store.get_by_id(params.book_id)?.clone();
    Ok(Json(book))
}

async fn books_by_published_date(
    State(store): State<SharedStore>,
    query: Result<Query<PublishedDateQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Book>>> {
    let Query(params) = query.map_err(|e| rejection("book_published_date", e))?;
    let params = validated(params)?;

    let store = store.read().await;
    Ok(Json(
        store.filter_by_published_date(params.book_published_date),
    ))
}

async fn books_by_rating(
    State(store): State<SharedStore>,
    query: Result<Query<RatingQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Book>>> {
    let Query(params) = query.map_err(|e| rejection("book_rating", e))?;
    let params = validated(params)?;

    let store = store.read().await;
    Ok(Json(store.filter_by_rating(params.book_rating)))
}

async fn create_book(
    State(store): State<SharedStore>,
    body: Result<Json<BookRequest>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(request) = body.map_err(|e| rejection("body", e))?;
    let request = validated(request)?;

    let identification = store.write().await.insert(request.into_new_book());
    tracing::info!(module = "books", identification, "book created");
    Ok(StatusCode::CREATED)
}

async fn update_book(
    State(store): State<SharedStore>,
    body: Result<Json<BookRequest>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(request) = body.map_err(|e| rejection("body", e))?;
    let request = validated(request)?;
    let book = request.into_book().ok_or_else(|| {
        AppError::validation(
            vec![serde_json::json!({
                "field": "identification",
                "error": "required",
                "message": "identification is required to update a book",
            })],
            "invalid value for: identification",
        )
    })?;

    let identification = book.identification;
    store.write().await.replace(book)?;
    tracing::info!(module = "books", identification, "book updated");
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_book(
    State(store): State<SharedStore>,
    path: Result<Path<BookIdPath>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(params) = path.map_err(|e| rejection("book_id", e))?;
    let params = validated(params)?;

    store.write().await.delete(params.book_id)?;
    tracing::info!(module = "books", identification = params.book_id, "book deleted");
    Ok(StatusCode::NO_CONTENT)
}

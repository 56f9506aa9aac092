//! HTTP surface for the book store, built on axum.
//!
//! ## Routes
//!
//! - `GET /api/books`: every record.
//! - `GET /api/books/:id`: one record, `404` if unknown.
//! - `POST /api/books`: create; `201` with a `Location` header and the stored record.
//! - `PUT /api/books/:id`: full replacement; `204`, or `404` if unknown.
//! - `DELETE /api/books/:id`: `204`, or `404` if unknown.
//! - `GET /health`: `{ "ok": true, "backend": "<name>" }`.
//!
//! Any `id` in a request body is ignored; the path and the store decide it.
//! Store failures become `500` with `{ "error": "<message>" }`.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use bookstore::{http, memory::MockBookStore};
//!
//! let app = http::router(Arc::new(MockBookStore::default()));
//! ```

use std::{net::SocketAddr, sync::Arc};

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tracing::{debug, error, info};

use bookstore_core::{backend::DynBookStore, book::Book, error::BookStoreError};

/// Store handle shared by every request handler.
pub type SharedStore = Arc<dyn DynBookStore>;

/// Prefix under which the book routes are mounted.
pub const BOOKS_PATH: &str = "/api/books";


/// Failure of a single request.
#[derive(Debug)]
pub enum ApiError {
    NotFound,
    Store(BookStoreError),
}

impl From<BookStoreError> for ApiError {
    fn from(err: BookStoreError) -> Self {
        ApiError::Store(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Store(err) => {
                error!(error = %err, "book store request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": err.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

type ApiResult<T> = Result<T, ApiError>;


/// Build an axum `Router` serving the book routes over `store`.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(BOOKS_PATH, get(list_books).post(create_book))
        .route(
            &format!("{BOOKS_PATH}/:id"),
            get(get_book).put(replace_book).delete(remove_book),
        )
        .with_state(store)
}

/// Serve the book routes at `addr` until `shutdown` resolves.
pub async fn serve(
    store: SharedStore,
    addr: SocketAddr,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %listener.local_addr()?, backend = store.backend_name(), "serving books");

    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn health(State(store): State<SharedStore>) -> impl IntoResponse {
    Json(json!({ "ok": true, "backend": store.backend_name() }))
}

async fn list_books(State(store): State<SharedStore>) -> ApiResult<Json<Vec<Book>>> {
    Ok(Json(store.list().await?))
}

async fn get_book(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> ApiResult<Json<Book>> {
    store
        .get(&id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn create_book(
    State(store): State<SharedStore>,
    Json(candidate): Json<Book>,
) -> ApiResult<impl IntoResponse> {
    let book = store.create(candidate).await?;
    let location = format!("{BOOKS_PATH}/{}", book.id().unwrap_or_default());
    debug!(%location, "created book");

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(book)))
}

async fn replace_book(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Json(candidate): Json<Book>,
) -> ApiResult<StatusCode> {
    store
        .replace(&id, candidate)
        .await?
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(ApiError::NotFound)
}

async fn remove_book(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    store
        .remove(&id)
        .await?
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(ApiError::NotFound)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(ApiError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_errors_map_to_500() {
        let response = ApiError::from(BookStoreError::Backend("connection refused".to_string()))
            .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

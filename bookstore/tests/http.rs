//! HTTP integration tests.
//!
//! Starts the axum router over a mock store and exercises it with reqwest.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use bookstore::{
    backend::BookStore,
    book::Book,
    error::{BookStoreError, BookStoreResult},
    http,
    memory::{MockBookStore, MockState},
};

async fn spawn_app(store: http::SharedStore) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, http::router(store)).await.unwrap();
    });
    format!("http://{addr}")
}

async fn spawn_mock() -> String {
    spawn_app(Arc::new(MockBookStore::new(MockState::shared()))).await
}

fn dune() -> Value {
    json!({
        "bookName": "Dune",
        "author": "Herbert",
        "category": "SciFi",
        "price": 12.5,
    })
}

#[tokio::test]
async fn health_reports_backend() {
    let base = spawn_mock().await;

    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "ok": true, "backend": "mock" }));
}

#[tokio::test]
async fn post_returns_created_record_with_location() {
    let base = spawn_mock().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/books"))
        .json(&dune())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    assert_eq!(resp.headers()["location"], "/api/books/1");

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"], "1");
    assert_eq!(body["bookName"], "Dune");
    assert_eq!(body["price"], 12.5);
}

#[tokio::test]
async fn post_ignores_client_id() {
    let base = spawn_mock().await;
    let client = reqwest::Client::new();

    let mut payload = dune();
    payload["id"] = json!("chosen-by-client");

    let body: Value = client
        .post(format!("{base}/api/books"))
        .json(&payload)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["id"], "1");

    let resp = client
        .get(format!("{base}/api/books/chosen-by-client"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn get_unknown_id_is_404() {
    let base = spawn_mock().await;

    let resp = reqwest::get(format!("{base}/api/books/42")).await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn put_replaces_fields_but_not_id() {
    let base = spawn_mock().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{base}/api/books"))
        .json(&dune())
        .send()
        .await
        .unwrap();

    let resp = client
        .put(format!("{base}/api/books/1"))
        .json(&json!({
            "id": "99",
            "bookName": "Dune (Revised)",
            "author": "Herbert",
            "category": "SciFi",
            "price": 15.0,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let book: Value = reqwest::get(format!("{base}/api/books/1"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(book["id"], "1");
    assert_eq!(book["bookName"], "Dune (Revised)");
    assert_eq!(book["price"], 15.0);

    let resp = reqwest::get(format!("{base}/api/books/99")).await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn put_and_delete_unknown_id_are_404() {
    let base = spawn_mock().await;
    let client = reqwest::Client::new();

    let resp = client
        .put(format!("{base}/api/books/7"))
        .json(&dune())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = client
        .delete(format!("{base}/api/books/7"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let books: Vec<Value> = reqwest::get(format!("{base}/api/books"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(books.is_empty());
}

#[tokio::test]
async fn malformed_body_is_rejected_before_the_store() {
    let base = spawn_mock().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/books"))
        .json(&json!({ "bookName": "Dune", "price": "twelve" }))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_client_error());

    let books: Vec<Value> = reqwest::get(format!("{base}/api/books"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(books.is_empty());
}

#[tokio::test]
async fn full_lifecycle() {
    let base = spawn_mock().await;
    let client = reqwest::Client::new();

    for name in ["A", "B", "C"] {
        let resp = client
            .post(format!("{base}/api/books"))
            .json(&json!({ "bookName": name, "author": "x", "category": "y", "price": 1 }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
    }

    let books: Vec<Book> = reqwest::get(format!("{base}/api/books"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names = books.iter().map(|b| b.book_name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["A", "B", "C"]);

    let resp = client
        .delete(format!("{base}/api/books/2"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let resp = reqwest::get(format!("{base}/api/books/2")).await.unwrap();
    assert_eq!(resp.status(), 404);

    let books: Vec<Book> = reqwest::get(format!("{base}/api/books"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(books.len(), 2);
}

/// Store whose backend is always unreachable.
#[derive(Debug)]
struct UnreachableStore;

#[async_trait]
impl BookStore for UnreachableStore {
    async fn list(&self) -> BookStoreResult<Vec<Book>> {
        Err(BookStoreError::Backend("connection refused".to_string()))
    }

    async fn get(&self, _id: &str) -> BookStoreResult<Option<Book>> {
        Err(BookStoreError::Backend("connection refused".to_string()))
    }

    async fn create(&self, _candidate: Book) -> BookStoreResult<Book> {
        Err(BookStoreError::Backend("connection refused".to_string()))
    }

    async fn replace(&self, _id: &str, _candidate: Book) -> BookStoreResult<Option<Book>> {
        Err(BookStoreError::Backend("connection refused".to_string()))
    }

    async fn remove(&self, _id: &str) -> BookStoreResult<Option<Book>> {
        Err(BookStoreError::Backend("connection refused".to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "unreachable"
    }
}

#[tokio::test]
async fn backend_failure_is_500_with_message() {
    let base = spawn_app(Arc::new(UnreachableStore)).await;

    let resp = reqwest::get(format!("{base}/api/books")).await.unwrap();
    assert_eq!(resp.status(), 500);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Backend error: connection refused");
}

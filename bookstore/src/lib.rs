//! Main bookstore crate: a small CRUD service for book records.
//!
//! This crate ties the workspace together. It re-exports the core types,
//! exposes both store implementations, and provides the configuration and
//! HTTP layers used by the `bookstore` server binary.
//!
//! # Features
//!
//! - **One store contract** - Callers depend on [`backend::DynBookStore`], never on a concrete store
//! - **Two backends** - In-memory mock for development, MongoDB for persistence
//! - **REST routes** - `/api/books` over axum, see [`http`]
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use bookstore::{prelude::*, memory::{MockBookStore, MockState}};
//!
//! #[tokio::main]
//! async fn main() {
//!     // State is created once and injected; every clone of the store shares it
//!     let store = MockBookStore::new(MockState::shared());
//!
//!     let stored = store
//!         .create(Book::new("Dune", "Herbert", "SciFi", 12.5))
//!         .await
//!         .unwrap();
//!
//!     // Ids are assigned by the store
//!     assert_eq!(stored.id(), Some("1"));
//! }
//! ```
//!
//! # Choosing a backend at runtime
//!
//! ```ignore
//! use bookstore::{config::Settings, open_store};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::load()?;
//!     let store = open_store(&settings).await?;
//!
//!     println!("{} books", store.list().await?.len());
//!     Ok(())
//! }
//! ```
//!
//! # Backends
//!
//! - [`memory`] - In-process mock for development and tests
//! - [`mongodb`] - Persistent MongoDB backend (requires `mongodb` feature)

pub mod config;
pub mod http;
pub mod prelude;

pub use bookstore_core::{backend, book, error};

use std::sync::Arc;
use tracing::info;

use crate::{
    backend::DynBookStore,
    config::{BackendKind, Settings},
    error::BookStoreResult,
    memory::MockBookStore,
};

/// In-memory storage backend implementations.
pub mod memory {
    pub use bookstore_memory::{MockBookStore, MockBookStoreBuilder, MockState, SharedMockState};
}

/// MongoDB storage backend implementations.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use bookstore_mongodb::{MongoBookStore, MongoBookStoreBuilder};
}

/// Opens the store selected by `settings`.
///
/// The mock backend gets a fresh [`memory::MockState`] that lives as long as
/// the returned handle.
///
/// # Errors
///
/// Returns [`error::BookStoreError::Initialization`] if the MongoDB client
/// cannot be configured, or if MongoDB was selected in a build without the
/// `mongodb` feature.
pub async fn open_store(settings: &Settings) -> BookStoreResult<Arc<dyn DynBookStore>> {
    let store: Arc<dyn DynBookStore> = match settings.backend {
        BackendKind::Mock => Arc::new(MockBookStore::new(memory::MockState::shared())),
        BackendKind::Mongodb => open_mongodb(settings).await?,
    };

    info!(backend = store.backend_name(), "opened book store");
    Ok(store)
}

#[cfg(feature = "mongodb")]
async fn open_mongodb(settings: &Settings) -> BookStoreResult<Arc<dyn DynBookStore>> {
    use crate::backend::BookStoreBuilder;

    let database = &settings.bookstore_database;
    let store = mongodb::MongoBookStore::builder(
        &database.connection_string,
        &database.database_name,
        &database.books_collection_name,
    )
    .build()
    .await?;

    Ok(Arc::new(store))
}

#[cfg(not(feature = "mongodb"))]
async fn open_mongodb(_settings: &Settings) -> BookStoreResult<Arc<dyn DynBookStore>> {
    Err(error::BookStoreError::Initialization(
        "this build does not include the mongodb backend".to_string(),
    ))
}

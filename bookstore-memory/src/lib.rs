//! In-memory mock book store.
//!
//! This crate provides a process-local implementation of the `BookStore`
//! trait for development and demos without a database. It needs no
//! configuration.
//!
//! # Features
//!
//! - **Explicit shared state** - Records and the id counter live in a [`MockState`] you create and inject
//! - **Serialized access** - One async mutex guards every operation
//! - **Sequential ids** - `"1"`, `"2"`, ... never reused while the state lives
//! - **Simulated latency** - Optional per-operation delay to imitate a remote backend
//!
//! # Quick Start
//!
//! ```ignore
//! use bookstore_core::{backend::BookStore, book::Book};
//! use bookstore_memory::{MockBookStore, MockState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let state = MockState::shared();
//!     let store = MockBookStore::new(state);
//!
//!     let stored = store.create(Book::new("Dune", "Herbert", "SciFi", 12.5)).await?;
//!     assert_eq!(store.list().await?, vec![stored]);
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as bookstore_memory;

pub mod store;

pub use store::{MockBookStore, MockBookStoreBuilder, MockState, SharedMockState};

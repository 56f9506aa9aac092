//! Core types for the bookstore service.
//!
//! This crate defines what every book store has in common:
//!
//! - **Book record** ([`book`]) - The record shape and its identity rules
//! - **Store abstraction** ([`backend`]) - The capability trait implemented by every backend
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! Concrete stores live in `bookstore-memory` (in-process mock) and
//! `bookstore-mongodb` (persistent MongoDB collection).
//!
//! # Example
//!
//! ```ignore
//! use bookstore_core::{backend::BookStore, book::Book};
//!
//! async fn restock(store: &impl BookStore) -> bookstore_core::error::BookStoreResult<()> {
//!     let stored = store.create(Book::new("Dune", "Herbert", "SciFi", 12.5)).await?;
//!     println!("stored {:?}", stored.id());
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as bookstore_core;

pub mod backend;
pub mod book;
pub mod error;

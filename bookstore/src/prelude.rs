//! Convenient re-exports of commonly used types from bookstore.
//!
//! ```ignore
//! use bookstore::prelude::*;
//! ```
//!
//! Only `BookStore` is exported. Concrete stores implement `DynBookStore` as
//! well, and method calls become ambiguous with both traits in scope; import
//! `bookstore::backend::DynBookStore` explicitly when working with trait objects.

pub use bookstore_core::{
    backend::{BookStore, BookStoreBuilder},
    book::Book,
    error::{BookStoreError, BookStoreResult},
};

pub use crate::config::{BackendKind, DatabaseSettings, Settings};

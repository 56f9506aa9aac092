//! Storage abstraction for book records.
//!
//! This module defines the capability interface every book store implements,
//! allowing callers to be written once and pointed at either a persistent
//! backend or an in-process mock chosen at startup.
//!
//! # Traits
//!
//! - [`BookStore`]: The core trait for storage backends
//! - [`DynBookStore`]: A trait for dynamic dispatch over backend implementations
//! - [`BookStoreBuilder`]: Factory trait for creating backend instances
//!
//! # Identity rules
//!
//! Stores own record identifiers. `create` ignores whatever `id` the candidate
//! carries and assigns a fresh one; `replace` forces the stored record's `id`
//! back to the one it was addressed by. Both go through [`Book::with_id`].
//!
//! # Examples
//!
//! ```ignore
//! use bookstore_core::{backend::BookStore, book::Book};
//!
//! let store = MyStoreImpl::new();
//!
//! let stored = store.create(Book::new("Dune", "Herbert", "SciFi", 12.5)).await?;
//! let id = stored.id().unwrap();
//!
//! assert_eq!(store.get(id).await?, Some(stored.clone()));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use async_trait::async_trait;
use std::{any::Any, fmt::Debug, sync::Arc};

use crate::{book::Book, error::BookStoreResult};

/// Abstract interface for book storage backends.
///
/// # Thread Safety
///
/// Implementations must be safe to share across async tasks. Two concurrent
/// `create` calls must never be handed the same identifier.
///
/// # Error Handling
///
/// A missing record is reported as `Ok(None)`, never as an error. An `Err` means
/// the backend itself failed and the operation should be abandoned.
#[async_trait]
pub trait BookStore: Send + Sync + Debug {
    /// Returns every record currently held.
    ///
    /// Ordering is backend-defined: persistent stores return their natural
    /// scan order, the mock returns insertion order.
    async fn list(&self) -> BookStoreResult<Vec<Book>>;

    /// Returns the record with the given identifier, or `None` if there is none.
    async fn get(&self, id: &str) -> BookStoreResult<Option<Book>>;

    /// Stores a new record and returns it with its freshly assigned identifier.
    ///
    /// Any `id` on `candidate` is ignored.
    async fn create(&self, candidate: Book) -> BookStoreResult<Book>;

    /// Overwrites every field of the record `id` with the fields of `candidate`.
    ///
    /// The stored record keeps `id` whatever identifier `candidate` carries.
    /// Returns the stored record, or `None` if no record has this identifier,
    /// in which case nothing is changed.
    async fn replace(&self, id: &str, candidate: Book) -> BookStoreResult<Option<Book>>;

    /// Deletes the record with the given identifier and returns it.
    ///
    /// Returns `None` if there was no such record.
    async fn remove(&self, id: &str) -> BookStoreResult<Option<Book>>;

    /// Releases any resources held by the store.
    ///
    /// The default implementation is a no-op; stores holding network clients
    /// should override it.
    async fn shutdown(self) -> BookStoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }

    /// Short name of the backend, used in logs and health reports.
    fn backend_name(&self) -> &'static str;
}

#[async_trait]
impl<B> BookStore for &B
where
    B: BookStore,
{
    async fn list(&self) -> BookStoreResult<Vec<Book>> {
        (**self).list().await
    }

    async fn get(&self, id: &str) -> BookStoreResult<Option<Book>> {
        (**self).get(id).await
    }

    async fn create(&self, candidate: Book) -> BookStoreResult<Book> {
        (**self).create(candidate).await
    }

    async fn replace(&self, id: &str, candidate: Book) -> BookStoreResult<Option<Book>> {
        (**self).replace(id, candidate).await
    }

    async fn remove(&self, id: &str) -> BookStoreResult<Option<Book>> {
        (**self).remove(id).await
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}

#[async_trait]
impl<B> BookStore for Arc<B>
where
    B: BookStore,
{
    async fn list(&self) -> BookStoreResult<Vec<Book>> {
        (**self).list().await
    }

    async fn get(&self, id: &str) -> BookStoreResult<Option<Book>> {
        (**self).get(id).await
    }

    async fn create(&self, candidate: Book) -> BookStoreResult<Book> {
        (**self).create(candidate).await
    }

    async fn replace(&self, id: &str, candidate: Book) -> BookStoreResult<Option<Book>> {
        (**self).replace(id, candidate).await
    }

    async fn remove(&self, id: &str) -> BookStoreResult<Option<Book>> {
        (**self).remove(id).await
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}

/// Object-safe counterpart of [`BookStore`].
///
/// Every `BookStore` implements this trait automatically, so a store chosen at
/// runtime can be held as `Arc<dyn DynBookStore>` or `Box<dyn DynBookStore>`.
#[async_trait]
pub trait DynBookStore: Send + Sync + Debug {
    async fn list(&self) -> BookStoreResult<Vec<Book>>;
    async fn get(&self, id: &str) -> BookStoreResult<Option<Book>>;
    async fn create(&self, candidate: Book) -> BookStoreResult<Book>;
    async fn replace(&self, id: &str, candidate: Book) -> BookStoreResult<Option<Book>>;
    async fn remove(&self, id: &str) -> BookStoreResult<Option<Book>>;
    async fn shutdown_boxed(self: Box<Self>) -> BookStoreResult<()>;

    fn backend_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

#[async_trait]
impl<B: BookStore + Send + Sync + 'static> DynBookStore for B {
    async fn list(&self) -> BookStoreResult<Vec<Book>> {
        BookStore::list(self).await
    }

    async fn get(&self, id: &str) -> BookStoreResult<Option<Book>> {
        BookStore::get(self, id).await
    }

    async fn create(&self, candidate: Book) -> BookStoreResult<Book> {
        BookStore::create(self, candidate).await
    }

    async fn replace(&self, id: &str, candidate: Book) -> BookStoreResult<Option<Book>> {
        BookStore::replace(self, id, candidate).await
    }

    async fn remove(&self, id: &str) -> BookStoreResult<Option<Book>> {
        BookStore::remove(self, id).await
    }

    async fn shutdown_boxed(self: Box<Self>) -> BookStoreResult<()> {
        BookStore::shutdown(*self).await
    }

    fn backend_name(&self) -> &'static str {
        BookStore::backend_name(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Factory for book stores that need asynchronous setup.
#[async_trait]
pub trait BookStoreBuilder {
    type Store: BookStore;

    async fn build(self) -> BookStoreResult<Self::Store>;
}

//! The book record and its identity rules.
//!
//! A [`Book`] is the only entity handled by the service. Its `id` is owned by
//! the store: it is assigned on create and never changes afterwards. Stores
//! enforce this through [`Book::with_id`], which overwrites whatever `id` a
//! caller-supplied candidate carries.

use bson::{Bson, de::deserialize_from_bson, ser::serialize_to_bson};
use serde::{Deserialize, Serialize};
use serde_json::{Value, from_value, to_value};

use crate::error::BookStoreResult;

/// A single book in the catalogue.
///
/// Serializes to the JSON wire shape
/// `{ "id": "...", "bookName": "...", "author": "...", "category": "...", "price": 12.5 }`,
/// with `id` omitted when the record has not been stored yet.
///
/// # Example
///
/// ```
/// use bookstore_core::book::Book;
///
/// let dune = Book::new("Dune", "Herbert", "SciFi", 12.5);
/// assert!(dune.id().is_none());
///
/// let stored = dune.with_id("1");
/// assert_eq!(stored.id(), Some("1"));
/// assert_eq!(stored.book_name, "Dune");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Store-assigned identifier. Ignored when a record is submitted for create or replace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub book_name: String,
    pub author: String,
    pub category: String,
    pub price: f64,
}

impl Book {
    /// Builds a candidate record without an identifier.
    pub fn new(
        book_name: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: None,
            book_name: book_name.into(),
            author: author.into(),
            category: category.into(),
            price,
        }
    }

    /// Returns the store-assigned identifier, if this record has been stored.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns this record with its identifier forced to `id`.
    ///
    /// Any identifier the record already carries is discarded. Every store
    /// routes create and replace through here so a caller can never choose or
    /// change an id.
    pub fn with_id(self, id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..self
        }
    }

    /// Returns this record with its identifier cleared.
    pub fn without_id(self) -> Self {
        Self { id: None, ..self }
    }

    /// Converts this record to a BSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_bson(&self) -> BookStoreResult<Bson> {
        Ok(serialize_to_bson(self)?)
    }

    /// Creates a record from a BSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not have the shape of a book.
    pub fn from_bson(bson: Bson) -> BookStoreResult<Self> {
        Ok(deserialize_from_bson(bson)?)
    }

    /// Converts this record to its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> BookStoreResult<Value> {
        Ok(to_value(self)?)
    }

    /// Creates a record from its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not have the shape of a book.
    pub fn from_json(value: Value) -> BookStoreResult<Self> {
        Ok(from_value(value)?)
    }
}

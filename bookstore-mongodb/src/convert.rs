//! Conversion between book records and MongoDB documents.
//!
//! Records are stored with their identifier in MongoDB's `_id` field as an
//! `ObjectId`. The record's string `id` is the 24-character hex form of that
//! `ObjectId`; it is never written as a separate field.

use bson::{Bson, Document, doc, oid::ObjectId};

use bookstore_core::{
    book::Book,
    error::{BookStoreError, BookStoreResult},
};

const ID_FIELD: &str = "_id";


/// Parses a record id into the `ObjectId` it was derived from.
///
/// Returns `None` for strings that are not valid `ObjectId` hex, which can
/// never name a stored record.
pub(crate) fn parse_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

/// Builds the `{ "_id": ... }` filter addressing a single record.
pub(crate) fn id_filter(oid: ObjectId) -> Document {
    doc! { ID_FIELD: oid }
}

/// Turns a record into a document ready for storage.
///
/// The record's own `id` is dropped. When `oid` is given it becomes the
/// document's `_id`; otherwise MongoDB assigns one on insert.
pub(crate) fn prepare_document(book: &Book, oid: Option<ObjectId>) -> BookStoreResult<Document> {
    let mut document = match book.clone().without_id().to_bson()? {
        Bson::Document(document) => document,
        other => {
            return Err(BookStoreError::InvalidDocument(format!(
                "expected a document, got {:?}",
                other.element_type()
            )));
        }
    };

    if let Some(oid) = oid {
        document.insert(ID_FIELD, oid);
    }

    Ok(document)
}

/// Returns `candidate` as it is stored under `oid`.
///
/// The id is always the canonical lowercase hex of `oid`, whatever casing the
/// caller used to address the record.
pub(crate) fn stored_record(candidate: Book, oid: ObjectId) -> Book {
    candidate.with_id(oid.to_hex())
}

/// Turns a stored document back into a record, exposing `_id` as `id`.
///
/// Only `ObjectId` identifiers are accepted, since those are the only ones
/// `get`, `replace` and `remove` can address.
pub(crate) fn restore_document(mut document: Document) -> BookStoreResult<Book> {
    let id = match document.remove(ID_FIELD) {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(other) => {
            return Err(BookStoreError::InvalidDocument(format!(
                "unsupported _id type {:?}",
                other.element_type()
            )));
        }
        None => return Err(BookStoreError::InvalidDocument("missing _id".to_string())),
    };

    Ok(Book::from_bson(Bson::Document(document))?.with_id(id))
}

/// Reads the identifier MongoDB reported for an inserted document.
pub(crate) fn inserted_id(inserted: &Bson) -> BookStoreResult<ObjectId> {
    inserted
        .as_object_id()
        .ok_or_else(|| BookStoreError::InvalidDocument(format!("unexpected inserted id {inserted}")))
}

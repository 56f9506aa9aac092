//! MongoDB implementation of the book store.
//!
//! This crate provides a MongoDB-backed implementation of the `BookStore`
//! trait for persistent storage of book records.
//!
//! To use this backend through the facade crate, enable its `mongodb` feature:
//!
//! ```toml
//! [dependencies]
//! bookstore = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! # Identifiers
//!
//! Record ids are assigned by MongoDB as `ObjectId`s and exposed as their
//! 24-character hex form. Ids that are not valid `ObjectId` hex can never
//! match a stored record and are reported as not found without contacting
//! the server.
//!
//! # Example
//!
//! ```ignore
//! use bookstore_core::backend::BookStoreBuilder;
//! use bookstore_mongodb::MongoBookStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MongoBookStore::builder("mongodb://localhost:27017", "BookStore", "Books")
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as bookstore_mongodb;

pub mod store;
mod convert;

pub use store::{MongoBookStore, MongoBookStoreBuilder};

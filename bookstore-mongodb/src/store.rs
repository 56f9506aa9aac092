use async_trait::async_trait;
use futures::TryStreamExt;
use bson::{Document, doc};
use mongodb::{
    Client, Collection as MongoCollection,
    options::ClientOptions,
};
use tracing::{debug, warn};

use bookstore_core::{
    backend::{BookStore, BookStoreBuilder},
    book::Book,
    error::{BookStoreError, BookStoreResult},
};

use crate::convert::{
    id_filter, inserted_id, parse_id, prepare_document, restore_document, stored_record,
};


/// Book store backed by a MongoDB collection.
///
/// Each operation is exactly one round trip to the server. Nothing is cached
/// and nothing is retried; driver failures surface as
/// [`BookStoreError::Backend`].
#[derive(Debug)]
pub struct MongoBookStore {
    client: Client,
    database: String,
    collection: String,
}

impl MongoBookStore {
    pub fn new(client: Client, database: String, collection: String) -> Self {
        Self { client, database, collection }
    }

    pub fn builder(dsn: &str, database: &str, collection: &str) -> MongoBookStoreBuilder {
        MongoBookStoreBuilder::new(dsn, database, collection)
    }

    fn get_collection(&self) -> MongoCollection<Document> {
        self.client
            .database(&self.database)
            .collection(&self.collection)
    }

    async fn shutdown(self) -> BookStoreResult<()> {
        self.client.shutdown().await;

        Ok(())
    }
}

fn backend_error(operation: &'static str) -> impl FnOnce(mongodb::error::Error) -> BookStoreError {
    move |e| {
        warn!(operation, error = %e, "mongodb operation failed");
        BookStoreError::Backend(e.to_string())
    }
}

#[async_trait]
impl BookStore for MongoBookStore {
    async fn list(&self) -> BookStoreResult<Vec<Book>> {
        self.get_collection()
            .find(doc! {})
            .await
            .map_err(backend_error("list"))?
            .try_collect::<Vec<Document>>()
            .await
            .map_err(backend_error("list"))?
            .into_iter()
            .map(restore_document)
            .collect::<BookStoreResult<Vec<Book>>>()
    }

    async fn get(&self, id: &str) -> BookStoreResult<Option<Book>> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };

        self.get_collection()
            .find_one(id_filter(oid))
            .await
            .map_err(backend_error("get"))?
            .map(restore_document)
            .transpose()
    }

    async fn create(&self, candidate: Book) -> BookStoreResult<Book> {
        let result = self.get_collection()
            .insert_one(prepare_document(&candidate, None)?)
            .await
            .map_err(backend_error("create"))?;

        let oid = inserted_id(&result.inserted_id)?;
        debug!(id = %oid, collection = %self.collection, "mongodb store created book");

        Ok(stored_record(candidate, oid))
    }

    async fn replace(&self, id: &str, candidate: Book) -> BookStoreResult<Option<Book>> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };

        let previous = self.get_collection()
            .find_one_and_replace(id_filter(oid), prepare_document(&candidate, Some(oid))?)
            .await
            .map_err(backend_error("replace"))?;

        Ok(previous.map(|_| stored_record(candidate, oid)))
    }

    async fn remove(&self, id: &str) -> BookStoreResult<Option<Book>> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };

        self.get_collection()
            .find_one_and_delete(id_filter(oid))
            .await
            .map_err(backend_error("remove"))?
            .map(restore_document)
            .transpose()
    }

    async fn shutdown(self) -> BookStoreResult<()> {
        self.shutdown().await
    }

    fn backend_name(&self) -> &'static str {
        "mongodb"
    }
}

/// Builder for [`MongoBookStore`], mirroring the settings a deployment provides:
/// a connection string, a database name and a collection name.
pub struct MongoBookStoreBuilder {
    dsn: String,
    database: String,
    collection: String,
}

impl MongoBookStoreBuilder {
    pub fn new(dsn: &str, database: &str, collection: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: database.to_string(),
            collection: collection.to_string(),
        }
    }
}

#[async_trait]
impl BookStoreBuilder for MongoBookStoreBuilder {
    type Store = MongoBookStore;

    async fn build(self) -> BookStoreResult<Self::Store> {
        Ok(MongoBookStore::new(
            Client::with_options(
                ClientOptions::parse(&self.dsn)
                    .await
                    .map_err(|e| BookStoreError::Initialization(e.to_string()))?,
            )
            .map_err(|e| BookStoreError::Initialization(e.to_string()))?,
            self.database,
            self.collection,
        ))
    }
}

use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use bson::{Document, Bson, doc};
use mongodb::{
    Client, Collection as MongoCollection,
    error::{Error as MongoError, ErrorKind},
    options::{ClientOptions, FindOptions},
};
use tracing::{debug, info};
use workdesk_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    error::{StoreError, StoreResult},
    query::{Query, QueryVisitor},
};

use crate::query::MongoQueryTranslator;


/// Maps driver errors onto store errors; failing to select a server means the database is unreachable.
fn store_error(err: MongoError) -> StoreError {
    match *err.kind {
        ErrorKind::ServerSelection { .. } => StoreError::Unavailable(err.to_string()),
        _ => StoreError::Backend(err.to_string()),
    }
}

#[derive(Debug)]
pub struct MongoDbStore {
    client: Client,
    database: String,
}

impl MongoDbStore {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    pub fn builder(dsn: &str, database: &str) -> MongoDbStoreBuilder {
        MongoDbStoreBuilder::new(dsn, database)
    }

    /// Name of the database this store reads and writes.
    pub fn database_name(&self) -> &str {
        &self.database
    }

    fn get_collection(&self, collection_name: &str) -> MongoCollection<Document> {
        self.client
            .database(&self.database)
            .collection(collection_name)
    }

    /// Shuts down a handle to the shared client; every clone of it stops working.
    async fn close_client(&self) -> StoreResult<()> {
        self.client.clone().shutdown().await;

        Ok(())
    }
}

#[async_trait]
impl StoreBackend for MongoDbStore {
    async fn insert_document(&self, document: Document, collection: &str) -> StoreResult<Bson> {
        let result = self.get_collection(collection)
            .insert_one(document)
            .await
            .map_err(store_error)?;

        debug!(collection, id = %result.inserted_id, "inserted document");

        Ok(result.inserted_id)
    }

    async fn query_documents(&self, query: Query, collection: &str) -> StoreResult<Vec<Document>> {
        let mut options = FindOptions::default();

        // MongoDB reads a limit of 0 as "no limit"
        match query.limit {
            Some(0) => return Ok(vec![]),
            Some(limit) => options.limit = Some(i64::try_from(limit).unwrap_or(i64::MAX)),
            None => {}
        }

        self.get_collection(collection)
            .find(MongoQueryTranslator.visit_filter(&query.filter)?)
            .with_options(options)
            .await
            .map_err(store_error)?
            .try_collect::<Vec<Document>>()
            .await
            .map_err(store_error)
    }

    async fn list_collections(&self) -> StoreResult<Vec<String>> {
        self.client
            .database(&self.database)
            .list_collection_names()
            .await
            .map_err(store_error)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(store_error)?;

        Ok(())
    }

    async fn shutdown(&self) -> StoreResult<()> {
        info!(database = %self.database, "closing MongoDB client");
        self.close_client().await
    }
}

pub struct MongoDbStoreBuilder {
    dsn: String,
    database: String,
    server_selection_timeout: Option<Duration>,
}

impl MongoDbStoreBuilder {
    pub fn new(dsn: &str, database: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: database.to_string(),
            server_selection_timeout: None,
        }
    }

    /// How long an operation waits for a reachable server before failing.
    ///
    /// Unset keeps the driver default.
    pub fn server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.server_selection_timeout = Some(timeout);
        self
    }
}

#[async_trait]
impl StoreBackendBuilder for MongoDbStoreBuilder {
    type Backend = MongoDbStore;

    async fn build(self) -> StoreResult<Self::Backend> {
        let mut options = ClientOptions::parse(&self.dsn)
            .await
            .map_err(|e| StoreError::Initialization(e.to_string()))?;

        if let Some(timeout) = self.server_selection_timeout {
            options.server_selection_timeout = Some(timeout);
        }
        options.app_name.get_or_insert_with(|| "workdesk".to_string());

        Ok(MongoDbStore::new(
            Client::with_options(options)
                .map_err(|e| StoreError::Initialization(e.to_string()))?,
            self.database,
        ))
    }
}

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::{Client, Collection, Database, IndexModel};
use serde::{de::DeserializeOwned, Serialize};

use crate::utils::error::AppError;

pub const USERS: &str = "users";
pub const CLASSES: &str = "classes";
pub const BUDGET: &str = "budget";
pub const STUDY_TASKS: &str = "study_tasks";
pub const QUESTIONS: &str = "questions";

/// `(collection, field)` pairs that must hold distinct values.
pub const UNIQUE_KEYS: &[(&str, &str)] = &[(USERS, "email")];

const DUPLICATE_KEY_CODE: i32 = 11000;

/// Schema-less document operations the handlers rely on.
///
/// Filters are plain equality matches on top-level fields; updates are a
/// partial `$set` of the supplied fields.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, AppError>;

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, AppError>;

    /// Inserts one document and returns its generated `_id`.
    async fn insert_one(&self, collection: &str, document: Document) -> Result<ObjectId, AppError>;

    /// Applies `$set: changes` to the first match; returns the matched count.
    async fn update_one(&self, collection: &str, filter: Document, changes: Document) -> Result<u64, AppError>;

    /// Removes the first match; returns the deleted count.
    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, AppError>;

    async fn ping(&self) -> Result<(), AppError>;

    async fn shutdown(&self);
}

pub fn to_document<T: Serialize>(value: &T) -> Result<Document, AppError> {
    bson::to_document(value).map_err(|e| AppError::DatabaseError(format!("Failed to encode document: {}", e)))
}

pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T, AppError> {
    bson::from_document(document).map_err(|e| AppError::DatabaseError(format!("Failed to decode document: {}", e)))
}

fn db_error(e: mongodb::error::Error) -> AppError {
    if let ErrorKind::Write(WriteFailure::WriteError(ref write_error)) = *e.kind {
        if write_error.code == DUPLICATE_KEY_CODE {
            return AppError::DuplicateKey(write_error.message.clone());
        }
    }
    AppError::DatabaseError(e.to_string())
}

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, AppError> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri)
            .await
            .map_err(db_error)?;

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));
        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));
        client_options.app_name = Some("school-service".to_string());

        let client = Client::with_options(client_options).map_err(db_error)?;
        let db = client.database(db_name);

        // Test connection
        db.run_command(doc! { "ping": 1 }).await.map_err(db_error)?;

        let mongodb = Self { client, db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the indexes owner-scoped queries and the user upsert rely on
    async fn ensure_indexes(&self) -> Result<(), AppError> {
        log::info!("🔧 Creating database indexes...");

        for (name, field) in UNIQUE_KEYS {
            let mut keys = Document::new();
            keys.insert(*field, 1);
            let unique_index = IndexModel::builder()
                .keys(keys)
                .options(mongodb::options::IndexOptions::builder().unique(true).build())
                .build();

            match self.collection(name).create_index(unique_index).await {
                Ok(_) => log::info!("   ✅ Index created: {}({}) unique", name, field),
                Err(e) => log::warn!("   ⚠️  Could not create {}({}) index: {}", name, field, e),
            }
        }

        for name in [CLASSES, BUDGET, STUDY_TASKS] {
            let owner_index = IndexModel::builder().keys(doc! { "email": 1 }).build();
            match self.collection(name).create_index(owner_index).await {
                Ok(_) => log::info!("   ✅ Index created: {}(email)", name),
                Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
            }
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection(name)
    }
}

#[async_trait]
impl DocumentStore for MongoDB {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, AppError> {
        let cursor = self.collection(collection).find(filter).await.map_err(db_error)?;
        cursor.try_collect().await.map_err(db_error)
    }

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, AppError> {
        self.collection(collection).find_one(filter).await.map_err(db_error)
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<ObjectId, AppError> {
        let result = self.collection(collection).insert_one(document).await.map_err(db_error)?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::DatabaseError("Inserted document has no ObjectId".to_string()))
    }

    async fn update_one(&self, collection: &str, filter: Document, changes: Document) -> Result<u64, AppError> {
        let result = self
            .collection(collection)
            .update_one(filter, doc! { "$set": changes })
            .await
            .map_err(db_error)?;
        Ok(result.matched_count)
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, AppError> {
        let result = self.collection(collection).delete_one(filter).await.map_err(db_error)?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.db.run_command(doc! { "ping": 1 }).await.map_err(db_error)?;
        Ok(())
    }

    async fn shutdown(&self) {
        log::info!("🔌 Closing MongoDB connections...");
        self.client.clone().shutdown().await;
    }
}

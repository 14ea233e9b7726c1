// Operações compartilhadas pelas collections com dono (classes, budget, study_tasks).
// Todo filtro inclui o email do dono; zero documentos afetados = não encontrado/não autorizado.

use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{de::DeserializeOwned, Serialize};

use crate::database::{from_document, to_document, DocumentStore};
use crate::utils::error::AppError;

pub async fn list<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &str,
    email: &str,
) -> Result<Vec<T>, AppError> {
    store
        .find(collection, doc! { "email": email })
        .await?
        .into_iter()
        .map(from_document)
        .collect()
}

/// Inserts `record` and returns its generated id.
pub async fn insert<T: Serialize>(
    store: &dyn DocumentStore,
    collection: &str,
    record: &T,
) -> Result<ObjectId, AppError> {
    store.insert_one(collection, to_document(record)?).await
}

/// `$set`s `changes` on the document matching both id and owner.
pub async fn update(
    store: &dyn DocumentStore,
    collection: &str,
    id: ObjectId,
    email: &str,
    changes: Document,
) -> Result<u64, AppError> {
    if changes.is_empty() {
        return Err(AppError::InvalidRequest("No fields to update".to_string()));
    }
    store
        .update_one(collection, doc! { "_id": id, "email": email }, changes)
        .await
}

pub async fn delete(
    store: &dyn DocumentStore,
    collection: &str,
    id: ObjectId,
    email: &str,
) -> Result<u64, AppError> {
    store
        .delete_one(collection, doc! { "_id": id, "email": email })
        .await
}

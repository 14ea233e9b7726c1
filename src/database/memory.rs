use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use tokio::sync::RwLock;

use super::{DocumentStore, UNIQUE_KEYS};
use crate::utils::error::AppError;

/// In-memory DocumentStore for tests and `STORE_BACKEND=memory` local runs.
///
/// Collections keep insertion order. Filters match on equality of every
/// top-level key, which is all the handlers ever ask for. `UNIQUE_KEYS` are
/// enforced on insert the same way the MongoDB unique indexes are.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<String, Vec<Document>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`.
    #[cfg(test)]
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, AppError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| matches(d, &filter)).cloned().collect())
            .unwrap_or_default())
    }

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, AppError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| matches(d, &filter)).cloned()))
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> Result<ObjectId, AppError> {
        let id = match document.get("_id") {
            Some(Bson::ObjectId(id)) => *id,
            Some(_) => {
                return Err(AppError::DatabaseError("_id must be an ObjectId".to_string()));
            }
            None => {
                let id = ObjectId::new();
                document.insert("_id", id);
                id
            }
        };

        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.iter().any(|d| d.get("_id") == Some(&Bson::ObjectId(id))) {
            return Err(AppError::DuplicateKey(format!("_id {} already exists", id)));
        }
        for (_, field) in UNIQUE_KEYS.iter().filter(|(name, _)| *name == collection) {
            if let Some(value) = document.get(*field) {
                if docs.iter().any(|d| d.get(*field) == Some(value)) {
                    return Err(AppError::DuplicateKey(format!("{}.{} {} already exists", collection, field, value)));
                }
            }
        }
        docs.push(document);

        Ok(id)
    }

    async fn update_one(&self, collection: &str, filter: Document, changes: Document) -> Result<u64, AppError> {
        let mut collections = self.collections.write().await;
        let target = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| matches(d, &filter)));

        match target {
            Some(document) => {
                for (key, value) in changes {
                    document.insert(key, value);
                }
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, AppError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };

        match docs.iter().position(|d| matches(d, &filter)) {
            Some(index) => {
                docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn shutdown(&self) {
        log::info!("🧹 Dropping in-memory store");
        self.collections.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::USERS;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn test_insert_assigns_id_and_find_filters() {
        let store = MemoryStore::new();

        let a = store.insert_one("classes", doc! { "email": "a@x.com", "name": "Math" }).await.unwrap();
        store.insert_one("classes", doc! { "email": "b@x.com", "name": "Art" }).await.unwrap();

        let found = store.find("classes", doc! { "email": "a@x.com" }).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get_object_id("_id").unwrap(), a);
        assert_eq!(store.find("classes", doc! {}).await.unwrap().len(), 2);
        assert!(store.find("missing", doc! {}).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_merges_fields_of_first_match_only() {
        let store = MemoryStore::new();
        let id = store.insert_one("budget", doc! { "email": "a@x.com", "amount": 5.0, "category": "food" }).await.unwrap();

        let matched = store
            .update_one("budget", doc! { "_id": id, "email": "a@x.com" }, doc! { "amount": 7.5 })
            .await
            .unwrap();
        assert_eq!(matched, 1);

        let doc = store.find_one("budget", doc! { "_id": id }).await.unwrap().unwrap();
        assert_eq!(doc.get_f64("amount").unwrap(), 7.5);
        assert_eq!(doc.get_str("category").unwrap(), "food");

        let matched = store
            .update_one("budget", doc! { "_id": id, "email": "b@x.com" }, doc! { "amount": 1.0 })
            .await
            .unwrap();
        assert_eq!(matched, 0);
    }

    #[tokio::test]
    async fn test_duplicate_user_email_rejected() {
        let store = MemoryStore::new();
        store.insert_one(USERS, doc! { "email": "ana@school.edu" }).await.unwrap();

        let second = store.insert_one(USERS, doc! { "email": "ana@school.edu", "name": "Ana" }).await;
        assert!(matches!(second, Err(AppError::DuplicateKey(_))));
        assert_eq!(store.count(USERS).await, 1);

        // Only users.email is unique
        store.insert_one("classes", doc! { "email": "ana@school.edu" }).await.unwrap();
        store.insert_one("classes", doc! { "email": "ana@school.edu" }).await.unwrap();
        assert_eq!(store.count("classes").await, 2);
    }

    #[tokio::test]
    async fn test_delete_respects_filter() {
        let store = MemoryStore::new();
        let id = store.insert_one("study_tasks", doc! { "email": "a@x.com" }).await.unwrap();

        assert_eq!(store.delete_one("study_tasks", doc! { "_id": id, "email": "b@x.com" }).await.unwrap(), 0);
        assert_eq!(store.count("study_tasks").await, 1);
        assert_eq!(store.delete_one("study_tasks", doc! { "_id": id, "email": "a@x.com" }).await.unwrap(), 1);
        assert_eq!(store.count("study_tasks").await, 0);
    }
}

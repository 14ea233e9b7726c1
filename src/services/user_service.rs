use mongodb::bson::doc;

use crate::{
    database::{from_document, to_document, DocumentStore, USERS},
    models::{CreateUserRequest, User, UserResponse},
    utils::{require_email, AppError},
};

/// Outcome of the create-or-return upsert
#[derive(Debug)]
pub enum UserUpsert {
    Created(UserResponse),
    Existing(UserResponse),
}

pub async fn list_users(store: &dyn DocumentStore) -> Result<Vec<UserResponse>, AppError> {
    store
        .find(USERS, doc! {})
        .await?
        .into_iter()
        .map(|d| from_document::<User>(d).map(UserResponse::from))
        .collect()
}

async fn find_by_email(store: &dyn DocumentStore, email: &str) -> Result<Option<User>, AppError> {
    store
        .find_one(USERS, doc! { "email": email })
        .await?
        .map(from_document)
        .transpose()
}

/// Creates the user on first sight of `email`; later calls return the stored
/// record unchanged.
pub async fn create_or_get_user(
    store: &dyn DocumentStore,
    request: CreateUserRequest,
) -> Result<UserUpsert, AppError> {
    let email = require_email(request.email.as_deref())?;

    if let Some(existing) = find_by_email(store, &email).await? {
        log::info!("👤 User {} already registered", email);
        return Ok(UserUpsert::Existing(UserResponse::from(existing)));
    }

    let now = chrono::Utc::now().timestamp();
    let mut user = User {
        id: None,
        email,
        name: request.name,
        photo_url: request.photo_url,
        role: request.role,
        created_at: now,
        last_login: now,
    };

    match store.insert_one(USERS, to_document(&user)?).await {
        Ok(id) => {
            user.id = Some(id);
            log::info!("✅ User {} created ({})", user.email, id);
            Ok(UserUpsert::Created(UserResponse::from(user)))
        }
        // Lost a race against a concurrent first create; the unique index kept one copy
        Err(AppError::DuplicateKey(_)) => find_by_email(store, &user.email)
            .await?
            .map(|existing| UserUpsert::Existing(UserResponse::from(existing)))
            .ok_or_else(|| AppError::DatabaseError("User vanished after duplicate key".to_string())),
        Err(e) => Err(e),
    }
}
